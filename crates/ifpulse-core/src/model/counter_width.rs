use serde::Serialize;
use strum::Display;

/// Whether an interface exposes 64-bit ("high capacity") octet counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CounterWidth {
    /// Not yet inferred for this interface.
    #[default]
    Unknown,
    /// 32-bit ifInOctets / ifOutOctets.
    Narrow,
    /// 64-bit ifHCInOctets / ifHCOutOctets.
    Wide,
}

impl CounterWidth {
    pub fn is_wide(self) -> bool {
        matches!(self, Self::Wide)
    }
}
