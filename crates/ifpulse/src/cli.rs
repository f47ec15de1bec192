//! Clap derive structures for the `ifpulse` check.
//!
//! Flag spellings follow the Nagios plugin convention of underscores
//! (`--warn_percent`); hyphenated aliases are accepted too. This file is
//! also compiled by `build.rs`, so it may only depend on `clap`.

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

/// ifpulse -- SNMP interface utilization check
#[derive(Debug, Parser)]
#[command(
    name = "ifpulse",
    version,
    about = "Check SNMP interface bandwidth utilization (Nagios plugin)",
    long_about = "Polls an interface's octet counters over SNMPv2c, compares them with\n\
        the sample stored in memcached by the previous run, and reports the\n\
        in/out rate, utilization and Nagios perfdata.\n\n\
        Exit codes: 0 OK, 1 WARNING, 2 CRITICAL, 3 UNKNOWN."
)]
pub struct Cli {
    /// SNMP agent host name or address
    #[arg(long)]
    pub host: String,

    /// Interface description (ifDescr), e.g. "GigabitEthernet0/1"
    #[arg(long)]
    pub interface: String,

    /// SNMPv2c read community (overrides config and keyring)
    #[arg(long, env = "IFPULSE_COMMUNITY", hide_env_values = true)]
    pub community: Option<String>,

    /// SNMP agent port [default: 161]
    #[arg(long = "snmp_port", visible_alias = "snmp-port")]
    pub snmp_port: Option<u16>,

    /// Maximum interface bandwidth (overrides the reported link speed)
    #[arg(long)]
    pub bandwidth: Option<u64>,

    /// Unit of --bandwidth: b (bits), M (megabits) or G (gigabits)
    #[arg(
        long = "bandwidth_unit",
        visible_alias = "bandwidth-unit",
        default_value = "M",
        value_parser = ["b", "M", "G"]
    )]
    pub bandwidth_unit: String,

    /// Warning threshold in percent (0-99, requires --crit_percent)
    #[arg(long = "warn_percent", visible_alias = "warn-percent", allow_hyphen_values = true)]
    pub warn_percent: Option<String>,

    /// Critical threshold in percent (0-99, requires --warn_percent)
    #[arg(long = "crit_percent", visible_alias = "crit-percent", allow_hyphen_values = true)]
    pub crit_percent: Option<String>,

    /// Also require ifAdminStatus and ifOperStatus to be up
    #[arg(long = "check_status", visible_alias = "check-status")]
    pub check_status: bool,

    /// Write diagnostic output to stderr (same as -v)
    #[arg(long)]
    pub debug: bool,

    /// Increase verbosity (-v, -vv)
    #[arg(long, short = 'v', action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(long, env = "IFPULSE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Per-request timeout in seconds (overrides config)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(long, short = 'o', default_value = "nagios")]
    pub output: OutputFormat,
}

// ── Output Enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One plugin line with perfdata (default)
    Nagios,
    /// One compact JSON object
    Json,
}

impl Cli {
    /// Whether diagnostic logging was requested in any form.
    pub fn diagnostics(&self) -> bool {
        self.debug || self.verbose > 0
    }
}
