// ── Runtime check configuration ──
//
// These types describe *what* one invocation checks and how long cached
// state lives. The binary builds a `CheckConfig` from flags and the
// config file and hands it in; core never reads config files.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::model::Thresholds;

/// Unit of an explicit `--bandwidth` override.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
pub enum BandwidthUnit {
    #[strum(serialize = "b")]
    #[serde(rename = "b")]
    Bit,
    #[default]
    #[strum(serialize = "M")]
    #[serde(rename = "M")]
    Megabit,
    #[strum(serialize = "G")]
    #[serde(rename = "G")]
    Gigabit,
}

impl BandwidthUnit {
    /// Bits per one of this unit.
    pub fn multiplier(self) -> u64 {
        match self {
            Self::Bit => 1,
            Self::Megabit => 1_000_000,
            Self::Gigabit => 1_000_000_000,
        }
    }
}

/// An operator-supplied maximum bandwidth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bandwidth {
    pub value: u64,
    pub unit: BandwidthUnit,
}

impl Bandwidth {
    pub fn new(value: u64, unit: BandwidthUnit) -> Self {
        Self { value, unit }
    }

    pub fn bits_per_second(self) -> u64 {
        self.value.saturating_mul(self.unit.multiplier())
    }
}

/// Expiry applied to each kind of cached state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheTtl {
    /// Previous sample (timestamp + both counters).
    pub sample: Duration,
    /// Counter-width flag.
    pub width: Duration,
    /// Link-speed baseline.
    pub baseline: Duration,
    /// ifDescr → ifIndex mapping, before jitter.
    pub index: Duration,
    /// Upper bound of the random spread added to `index`, so mappings
    /// learned in one walk do not all expire together.
    pub index_jitter: Duration,
}

impl Default for CacheTtl {
    fn default() -> Self {
        Self {
            sample: Duration::from_secs(3600),
            width: Duration::from_secs(86_400),
            baseline: Duration::from_secs(86_400),
            index: Duration::from_secs(86_400),
            index_jitter: Duration::from_secs(1800),
        }
    }
}

impl CacheTtl {
    /// Index TTL plus a spread in `0..=index_jitter` derived from `seed`.
    pub fn index_with_jitter(&self, seed: u32) -> Duration {
        let spread = self.index_jitter.as_secs();
        if spread == 0 {
            return self.index;
        }
        self.index + Duration::from_secs(u64::from(seed) % (spread + 1))
    }
}

/// Everything one invocation needs to know about the interface it checks.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckConfig {
    /// Agent host name or address, used verbatim in cache keys.
    pub host: String,
    /// Interface descriptor (ifDescr) as given by the operator.
    pub interface: String,
    /// Explicit maximum bandwidth; overrides cached and agent-reported link speed.
    pub bandwidth: Option<Bandwidth>,
    /// Alerting thresholds; `None` disables alerting.
    pub thresholds: Option<Thresholds>,
    /// Require ifAdminStatus and ifOperStatus to be up.
    pub check_status: bool,
    pub ttl: CacheTtl,
}

impl CheckConfig {
    pub fn new(host: impl Into<String>, interface: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            interface: interface.into(),
            bandwidth: None,
            thresholds: None,
            check_status: false,
            ttl: CacheTtl::default(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn bandwidth_units_convert_to_bits() {
        assert_eq!(Bandwidth::new(250, BandwidthUnit::Bit).bits_per_second(), 250);
        assert_eq!(
            Bandwidth::new(100, BandwidthUnit::Megabit).bits_per_second(),
            100_000_000
        );
        assert_eq!(
            Bandwidth::new(10, BandwidthUnit::Gigabit).bits_per_second(),
            10_000_000_000
        );
    }

    #[test]
    fn bandwidth_saturates_instead_of_overflowing() {
        let huge = Bandwidth::new(u64::MAX, BandwidthUnit::Gigabit);
        assert_eq!(huge.bits_per_second(), u64::MAX);
    }

    #[test]
    fn unit_defaults_to_megabit_and_parses_flag_letters() {
        assert_eq!(BandwidthUnit::default(), BandwidthUnit::Megabit);
        assert_eq!("G".parse::<BandwidthUnit>().unwrap(), BandwidthUnit::Gigabit);
        assert_eq!("b".parse::<BandwidthUnit>().unwrap(), BandwidthUnit::Bit);
        assert!("k".parse::<BandwidthUnit>().is_err());
    }

    #[test]
    fn index_jitter_stays_within_bounds() {
        let ttl = CacheTtl::default();
        assert_eq!(ttl.index_with_jitter(0), Duration::from_secs(86_400));
        assert_eq!(ttl.index_with_jitter(1800), Duration::from_secs(88_200));
        assert_eq!(ttl.index_with_jitter(1801), Duration::from_secs(86_400));
    }

    #[test]
    fn zero_jitter_is_plain_index_ttl() {
        let ttl = CacheTtl {
            index_jitter: Duration::ZERO,
            ..CacheTtl::default()
        };
        assert_eq!(ttl.index_with_jitter(12_345), ttl.index);
    }
}
