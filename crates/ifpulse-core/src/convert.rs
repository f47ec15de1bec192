// ── Transport-to-domain conversions ──
//
// Bridges the raw `ifpulse_api` clients onto the `CounterSource` and
// `CounterStore` seams, and parses the textual values both protocols
// hand back into numbers.

use std::time::Duration;

use ifpulse_api::{MemcachedClient, Oid, SnmpClient};

use crate::error::CoreError;
use crate::source::CounterSource;
use crate::store::CounterStore;

// ── Parsing ────────────────────────────────────────────────────────

/// Parse a counter or speed value.
///
/// Accepts plain integers and integral floats (`"1e3"`, `"42.0"`), which
/// older writers of the cache produced.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::as_conversions
)]
pub fn parse_counter(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    if let Ok(v) = raw.parse::<u64>() {
        return Some(v);
    }
    let v = raw.parse::<f64>().ok()?;
    (v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= u64::MAX as f64).then_some(v as u64)
}

/// Parse an epoch-seconds timestamp.
pub fn parse_timestamp(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|t| t.is_finite())
}

// ── SNMP ───────────────────────────────────────────────────────────

impl CounterSource for SnmpClient {
    fn fetch(&mut self, oid: &Oid) -> Result<Option<String>, CoreError> {
        Ok(self.get(oid)?.map(|value| value.to_string()))
    }

    fn walk(&mut self, column: &Oid) -> Result<Vec<(Oid, String)>, CoreError> {
        let rows = SnmpClient::walk(self, column)?;
        Ok(rows
            .into_iter()
            .map(|(oid, value)| (oid, value.to_string()))
            .collect())
    }
}

// ── memcached ──────────────────────────────────────────────────────

impl CounterStore for MemcachedClient {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(MemcachedClient::get(self, key)?)
    }

    fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CoreError> {
        Ok(MemcachedClient::set(self, key, value, ttl)?)
    }
}
