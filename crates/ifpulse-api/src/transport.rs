// Shared transport configuration for building protocol clients.
//
// The SNMP session and the memcached connection share the same timeout
// policy through this module, so the binary configures both in one place.

use std::time::Duration;

use crate::error::Error;
use crate::memcached::MemcachedClient;
use crate::snmp::SnmpClient;

/// Default SNMP agent port.
pub const DEFAULT_SNMP_PORT: u16 = 161;

/// Default memcached endpoint.
pub const DEFAULT_CACHE_SERVER: &str = "memcache://127.0.0.1:11211";

/// Shared transport configuration for building clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub snmp_port: u16,
    pub timeout: Duration,
    pub cache_servers: Vec<String>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            snmp_port: DEFAULT_SNMP_PORT,
            timeout: Duration::from_secs(5),
            cache_servers: vec![DEFAULT_CACHE_SERVER.into()],
        }
    }
}

impl TransportConfig {
    /// Open an SNMPv2c session to `host` using this config's port and timeout.
    pub fn build_snmp(&self, host: &str, community: &[u8]) -> Result<SnmpClient, Error> {
        SnmpClient::connect(host, self.snmp_port, community, self.timeout)
    }

    /// Connect to the configured memcached servers.
    pub fn build_cache(&self) -> Result<MemcachedClient, Error> {
        MemcachedClient::connect(&self.cache_servers, self.timeout)
    }
}
