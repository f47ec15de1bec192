// ── Thresholds and severities ──

use serde::Serialize;
use strum::Display;

use crate::error::CoreError;

/// Plugin result severity, ordered from best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Display)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Severity {
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl Severity {
    /// Process exit code expected by Nagios-compatible schedulers.
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Ok => 0,
            Self::Warning => 1,
            Self::Critical => 2,
            Self::Unknown => 3,
        }
    }
}

/// Validated warning/critical utilization percentages.
///
/// Both lie in `0..=99` and `warn < crit`; there is no way to build one
/// that breaks this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Thresholds {
    warn: u8,
    crit: u8,
}

impl Thresholds {
    pub fn new(warn: u8, crit: u8) -> Result<Self, CoreError> {
        Self::from_options(Some(i64::from(warn)), Some(i64::from(crit)))?
            .ok_or_else(|| CoreError::config("thresholds are required"))
    }

    /// Validate a raw `(warn, crit)` pair as given on the command line.
    ///
    /// Both absent means alerting is disabled and yields `Ok(None)`.
    pub fn from_options(warn: Option<i64>, crit: Option<i64>) -> Result<Option<Self>, CoreError> {
        let (warn, crit) = match (warn, crit) {
            (None, None) => return Ok(None),
            (None, Some(_)) => {
                return Err(CoreError::config(
                    "--crit_percent was supplied, but no --warn_percent",
                ));
            }
            (Some(_), None) => {
                return Err(CoreError::config(
                    "--warn_percent was supplied, but no --crit_percent",
                ));
            }
            (Some(w), Some(c)) => (w, c),
        };

        let warn = percentage(warn, "--warn_percent")?;
        let crit = percentage(crit, "--crit_percent")?;
        if warn >= crit {
            return Err(CoreError::config(
                "--warn_percent must be less than --crit_percent",
            ));
        }
        Ok(Some(Self { warn, crit }))
    }

    pub fn warn(self) -> u8 {
        self.warn
    }

    pub fn crit(self) -> u8 {
        self.crit
    }
}

fn percentage(raw: i64, flag: &str) -> Result<u8, CoreError> {
    u8::try_from(raw)
        .ok()
        .filter(|p| *p <= 99)
        .ok_or_else(|| CoreError::config(format!("{flag} must be a valid percentage (without %)")))
}
