use thiserror::Error;

/// Top-level error type for the `ifpulse-api` crate.
///
/// Covers every failure mode of the two wire protocols the checker speaks:
/// SNMP to the monitored agent and the memcached text protocol to the
/// counter cache. `ifpulse-core` maps these into domain errors.
#[derive(Debug, Error)]
pub enum Error {
    // ── SNMP ────────────────────────────────────────────────────────
    /// Socket setup or send/receive failure.
    #[error("SNMP socket error for {target}: {source}")]
    Socket {
        target: String,
        #[source]
        source: std::io::Error,
    },

    /// The agent did not answer, answered garbage, or the session failed.
    #[error("SNMP request to {target} failed: {reason}")]
    Snmp { target: String, reason: String },

    /// The agent answered with a non-zero error-status.
    #[error("SNMP agent {target} returned error-status {status} (index {index})")]
    Agent {
        target: String,
        status: u32,
        index: u32,
    },

    /// An OID string that is not a dotted sequence of integers.
    #[error("Invalid OID: {0}")]
    InvalidOid(String),

    // ── Cache ───────────────────────────────────────────────────────
    /// memcached connection, protocol, or server error.
    #[error("memcached error: {0}")]
    Memcache(#[from] memcache::MemcacheError),
}

impl Error {
    /// Returns `true` if the failure happened talking to memcached.
    pub fn is_cache(&self) -> bool {
        matches!(self, Self::Memcache(_))
    }
}
