//! Rate derivation and human-readable rate formatting.

use std::fmt;

use serde::Serialize;

use super::wrap::counter_delta;
use crate::error::CoreError;
use crate::model::Sample;

/// Bits-per-second below which rates are shown unscaled.
const MBPS_FROM_BITS: u64 = 1_000_000;

/// Bytes-per-second below which rates are shown in Mbps.
const GBPS_FROM_BYTES: f64 = 125_000_000.0;

/// Traffic between two samples, normalized by elapsed time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Utilization {
    pub elapsed_secs: f64,
    pub in_octets: u64,
    pub out_octets: u64,
    pub in_wrapped: bool,
    pub out_wrapped: bool,
    pub in_bits_per_sec: f64,
    pub out_bits_per_sec: f64,
}

/// Derive per-second bit rates from two samples of the same interface.
///
/// Counters that went backwards are corrected as a single wrap at the
/// ceiling implied by `wide`. Elapsed time must be positive.
#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
pub fn compute_utilization(
    previous: &Sample,
    current: &Sample,
    wide: bool,
) -> Result<Utilization, CoreError> {
    let elapsed_secs = current.timestamp - previous.timestamp;
    if elapsed_secs.is_nan() || elapsed_secs <= 0.0 {
        return Err(CoreError::NonPositiveElapsed { elapsed_secs });
    }

    let delta_in = counter_delta(previous.in_octets, current.in_octets, wide);
    let delta_out = counter_delta(previous.out_octets, current.out_octets, wide);
    if delta_in.wrapped {
        tracing::debug!(previous = previous.in_octets, current = current.in_octets, "in octets wrapped");
    }
    if delta_out.wrapped {
        tracing::debug!(previous = previous.out_octets, current = current.out_octets, "out octets wrapped");
    }

    let utilization = Utilization {
        elapsed_secs,
        in_octets: delta_in.octets,
        out_octets: delta_out.octets,
        in_wrapped: delta_in.wrapped,
        out_wrapped: delta_out.wrapped,
        in_bits_per_sec: (delta_in.octets as f64 / elapsed_secs) * 8.0,
        out_bits_per_sec: (delta_out.octets as f64 / elapsed_secs) * 8.0,
    };
    tracing::debug!(
        elapsed_secs,
        in_octets = utilization.in_octets,
        out_octets = utilization.out_octets,
        in_bps = utilization.in_bits_per_sec,
        out_bps = utilization.out_bits_per_sec,
        "derived rates"
    );
    Ok(utilization)
}

/// A bit rate scaled for display.
///
/// Under 1,000,000 bits/s it stays in whole bits; under 125,000,000
/// bytes/s it is shown in Mbps; otherwise in Gbps. The second boundary is
/// tested on the byte rate, not the bit rate, to match historical output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "unit", content = "value")]
pub enum HumanRate {
    #[serde(rename = "bps")]
    Bps(u64),
    #[serde(rename = "Mbps")]
    Mbps(f64),
    #[serde(rename = "Gbps")]
    Gbps(f64),
}

impl HumanRate {
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss,
        clippy::as_conversions
    )]
    pub fn from_bits_per_sec(bits_per_sec: f64) -> Self {
        let bytes = bits_per_sec / 8.0;
        let bits = (bytes * 8.0) as u64;

        if bits < MBPS_FROM_BITS {
            Self::Bps(bits)
        } else if bytes < GBPS_FROM_BYTES {
            Self::Mbps(round2(bits as f64 / 1_000_000.0))
        } else {
            Self::Gbps(round2((bits as f64 / 1000.0) / 1_000_000.0))
        }
    }

    /// Unit suffix as shown to operators.
    pub fn unit(&self) -> &'static str {
        match self {
            Self::Bps(_) => "bps",
            Self::Mbps(_) => "Mbps",
            Self::Gbps(_) => "Gbps",
        }
    }

    /// Performance-data form: the display string without its trailing
    /// `ps` (`64133b`, `12.50Mb`, `1.20Gb`).
    pub fn perfdata(&self) -> String {
        let shown = self.to_string();
        shown
            .strip_suffix("ps")
            .map_or_else(|| shown.clone(), str::to_owned)
    }
}

impl fmt::Display for HumanRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bps(v) => write!(f, "{v}bps"),
            Self::Mbps(v) | Self::Gbps(v) => write!(f, "{v:.2}{}", self.unit()),
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
