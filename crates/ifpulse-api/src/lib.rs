// ifpulse-api: Blocking SNMPv2c and memcached clients (transport layer only)

pub mod error;
pub mod memcached;
pub mod oid;
pub mod snmp;
pub mod transport;

pub use error::Error;
pub use memcached::{MAX_RELATIVE_EXPIRY, MemcachedClient};
pub use oid::Oid;
pub use crate::snmp::{SnmpClient, SnmpValue};
pub use transport::TransportConfig;
