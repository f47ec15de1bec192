use serde::{Deserialize, Serialize};

/// One reading of an interface's octet counters.
///
/// Counters are octets (bytes), monotonically increasing, and wrap to zero
/// at either the 32-bit or the 64-bit ceiling depending on which OIDs they
/// were read from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Seconds since the Unix epoch.
    pub timestamp: f64,
    pub in_octets: u64,
    pub out_octets: u64,
}

impl Sample {
    pub fn new(timestamp: f64, in_octets: u64, out_octets: u64) -> Self {
        Self {
            timestamp,
            in_octets,
            out_octets,
        }
    }
}
