// ── memcached client ──
//
// String-in, string-out access to memcached. Typed encoding of cached
// values lives above this layer.

use std::fmt;
use std::time::Duration;

use crate::error::Error;

/// Longest expiry memcached treats as relative; larger values are read as
/// an absolute Unix time.
pub const MAX_RELATIVE_EXPIRY: u64 = 2_592_000;

/// Blocking memcached client over one or more servers.
pub struct MemcachedClient {
    client: memcache::Client,
    servers: Vec<String>,
}

impl fmt::Debug for MemcachedClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemcachedClient")
            .field("servers", &self.servers)
            .finish_non_exhaustive()
    }
}

impl MemcachedClient {
    /// Connect to every server URL (e.g. `memcache://127.0.0.1:11211`).
    pub fn connect(servers: &[String], timeout: Duration) -> Result<Self, Error> {
        let client = memcache::connect(servers.to_vec())?;
        client.set_read_timeout(Some(timeout))?;
        client.set_write_timeout(Some(timeout))?;
        tracing::debug!(?servers, "connected to memcached");
        Ok(Self {
            client,
            servers: servers.to_vec(),
        })
    }

    /// Fetch a key. A missing key is `Ok(None)`, not an error.
    pub fn get(&self, key: &str) -> Result<Option<String>, Error> {
        let value = self.client.get::<String>(key)?;
        tracing::trace!(key, hit = value.is_some(), "memcached get");
        Ok(value)
    }

    /// Store a key with an expiry in seconds, capped at
    /// [`MAX_RELATIVE_EXPIRY`].
    pub fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), Error> {
        let expiration = relative_expiry(ttl);
        tracing::trace!(key, value, expiration, "memcached set");
        self.client.set(key, value, expiration)?;
        Ok(())
    }
}

fn relative_expiry(ttl: Duration) -> u32 {
    u32::try_from(ttl.as_secs().min(MAX_RELATIVE_EXPIRY)).unwrap_or(u32::MAX)
}
