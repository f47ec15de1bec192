//! CLI error types with miette diagnostics.
//!
//! Every failure ends the check with UNKNOWN; the diagnostic code and
//! help text are shown on stderr when diagnostics are enabled.

use miette::Diagnostic;
use thiserror::Error;

use ifpulse_config::ConfigError;
use ifpulse_core::CoreError;

/// Nagios plugin exit codes.
pub mod exit_code {
    use ifpulse_core::Severity;

    pub const OK: i32 = 0;
    pub const WARNING: i32 = 1;
    pub const CRITICAL: i32 = 2;
    pub const UNKNOWN: i32 = 3;

    pub fn for_severity(severity: Severity) -> i32 {
        match severity {
            Severity::Ok => OK,
            Severity::Warning => WARNING,
            Severity::Critical => CRITICAL,
            Severity::Unknown => UNKNOWN,
        }
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Usage ────────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(ifpulse::usage), help("Run: ifpulse --help"))]
    Usage { message: String },

    #[error("{message}")]
    #[diagnostic(code(ifpulse::invalid_argument), help("Run: ifpulse --help"))]
    InvalidArgument { message: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Invalid configuration: {message}")]
    #[diagnostic(
        code(ifpulse::config),
        help("Check the config file (--config / IFPULSE_CONFIG) and IFPULSE_* environment variables.")
    )]
    Config { message: String },

    #[error("No SNMP community configured for host '{host}'")]
    #[diagnostic(
        code(ifpulse::no_community),
        help(
            "Pass --community, set IFPULSE_COMMUNITY, add [hosts.{host}] to the config file,\n\
             or store it in the system keyring (service 'ifpulse', entry '{host}/community')."
        )
    )]
    NoCommunity { host: String },

    // ── Interface ────────────────────────────────────────────────────
    #[error("Interface not found: {interface}")]
    #[diagnostic(
        code(ifpulse::interface_not_found),
        help(
            "--interface must match ifDescr on {host} exactly.\n\
             Try: snmpwalk -v2c -c <community> {host} 1.3.6.1.2.1.2.2.1.2"
        )
    )]
    InterfaceNotFound { host: String, interface: String },

    #[error("{message}")]
    #[diagnostic(
        code(ifpulse::counter),
        help("The agent answered, but not with a counter value. Check the interface's MIB support.")
    )]
    Counter { message: String },

    #[error("{message}")]
    #[diagnostic(
        code(ifpulse::sample),
        help("The stored sample is newer than this run. Check the clocks of hosts sharing the cache.")
    )]
    Sample { message: String },

    // ── Collaborators ────────────────────────────────────────────────
    #[error("Could not query remote host: {reason}")]
    #[diagnostic(
        code(ifpulse::snmp),
        help("Check that the agent is reachable, the port and community are correct, or raise --timeout.")
    )]
    Snmp { reason: String },

    #[error("Counter cache unavailable: {reason}")]
    #[diagnostic(
        code(ifpulse::cache),
        help("Check that memcached is running at the [cache] servers in the config file.")
    )]
    Cache { reason: String },
}

impl CliError {
    /// Every error is an UNKNOWN plugin result.
    pub fn exit_code(&self) -> i32 {
        exit_code::UNKNOWN
    }
}

// ── Library error → CliError mapping ─────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Config { message } => CliError::InvalidArgument { message },

            CoreError::InterfaceNotFound { host, interface } => {
                CliError::InterfaceNotFound { host, interface }
            }

            err @ CoreError::NotNumeric { .. } => CliError::Counter {
                message: err.to_string(),
            },

            err @ CoreError::NonPositiveElapsed { .. } => CliError::Sample {
                message: err.to_string(),
            },

            CoreError::Transport { reason } => CliError::Snmp { reason },

            CoreError::Cache { reason } => CliError::Cache { reason },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCommunity { host } => CliError::NoCommunity { host },
            other => CliError::Config {
                message: other.to_string(),
            },
        }
    }
}

impl From<ifpulse_api::Error> for CliError {
    fn from(err: ifpulse_api::Error) -> Self {
        CoreError::from(err).into()
    }
}
