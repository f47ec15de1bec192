// ── Core error types ──
//
// Every failure that ends a check early with UNKNOWN severity. Findings
// about the interface itself (down, over threshold) are not errors; they
// are `Outcome`s. The `From<ifpulse_api::Error>` impl keeps SNMP and
// cache failures distinguishable.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Configuration errors ─────────────────────────────────────────
    #[error("{message}")]
    Config { message: String },

    // ── Resolution errors ────────────────────────────────────────────
    #[error("Interface not found: {interface}")]
    InterfaceNotFound { host: String, interface: String },

    #[error("{counter} at {oid} is not a number (got {value:?})")]
    NotNumeric {
        counter: &'static str,
        oid: String,
        value: Option<String>,
    },

    // ── Sample errors ────────────────────────────────────────────────
    #[error("Elapsed time since the previous sample is not positive ({elapsed_secs}s); clock skew or duplicate sample")]
    NonPositiveElapsed { elapsed_secs: f64 },

    // ── Collaborator failures ────────────────────────────────────────
    #[error("Could not query remote host: {reason}")]
    Transport { reason: String },

    #[error("Counter cache unavailable: {reason}")]
    Cache { reason: String },
}

impl CoreError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<ifpulse_api::Error> for CoreError {
    fn from(err: ifpulse_api::Error) -> Self {
        if err.is_cache() {
            CoreError::Cache {
                reason: err.to_string(),
            }
        } else {
            CoreError::Transport {
                reason: err.to_string(),
            }
        }
    }
}
