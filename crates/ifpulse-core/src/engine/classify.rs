//! Threshold classification of utilization percentages.

use serde::Serialize;

use crate::model::{Severity, Thresholds};

/// Utilization percentages and the severity they map to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Classification {
    pub percent_in: f64,
    pub percent_out: f64,
    pub severity: Severity,
}

/// Percentage of `baseline_bps` used by `bits_per_sec`.
///
/// Divides by `baseline / 100` rather than multiplying by 100 afterwards,
/// which keeps rounding identical to earlier releases.
#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
pub fn percent_of(bits_per_sec: f64, baseline_bps: u64) -> f64 {
    bits_per_sec / (baseline_bps as f64 / 100.0)
}

/// Map in/out rates to a severity. A percentage must strictly exceed a
/// threshold to trigger it; without thresholds the result is always OK.
pub fn classify(
    in_bits_per_sec: f64,
    out_bits_per_sec: f64,
    baseline_bps: u64,
    thresholds: Option<Thresholds>,
) -> Classification {
    let percent_in = percent_of(in_bits_per_sec, baseline_bps);
    let percent_out = percent_of(out_bits_per_sec, baseline_bps);

    let severity = match thresholds {
        None => Severity::Ok,
        Some(t) => {
            let over = |limit: u8| {
                let limit = f64::from(limit);
                percent_in > limit || percent_out > limit
            };
            if over(t.crit()) {
                Severity::Critical
            } else if over(t.warn()) {
                Severity::Warning
            } else {
                Severity::Ok
            }
        }
    };

    Classification {
        percent_in,
        percent_out,
        severity,
    }
}
