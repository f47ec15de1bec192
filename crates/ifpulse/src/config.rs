//! CLI-aware settings resolution.
//!
//! Wraps `ifpulse_config` with the command-line override layer: flags
//! beat the config file, which beats built-in defaults.

use std::str::FromStr;
use std::time::Duration;

use secrecy::SecretString;

use ifpulse_api::TransportConfig;
use ifpulse_config::Config;
use ifpulse_core::{Bandwidth, BandwidthUnit, CheckConfig, Thresholds};

use crate::cli::Cli;
use crate::error::CliError;

/// Everything `run` needs, resolved before any network I/O.
#[derive(Debug)]
pub struct Settings {
    pub check: CheckConfig,
    pub transport: TransportConfig,
    pub community: SecretString,
}

/// Validate arguments, then load config and resolve the community.
///
/// Threshold and bandwidth arguments are checked before the config file
/// is read, so a usage error never depends on local configuration.
pub fn resolve(cli: &Cli) -> Result<Settings, CliError> {
    let thresholds = resolve_thresholds(cli)?;
    let bandwidth = resolve_bandwidth(cli)?;

    let cfg = ifpulse_config::load_config(cli.config.as_deref())?;
    let community = resolve_community(cli, &cfg)?;

    let mut transport = cfg.transport(&cli.host);
    if let Some(port) = cli.snmp_port {
        transport.snmp_port = port;
    }
    if let Some(secs) = cli.timeout {
        if secs == 0 {
            return Err(CliError::InvalidArgument {
                message: "--timeout must be at least 1 second".into(),
            });
        }
        transport.timeout = Duration::from_secs(secs);
    }

    let check = CheckConfig {
        bandwidth,
        thresholds,
        check_status: cli.check_status,
        ttl: cfg.cache.ttl(),
        ..CheckConfig::new(cli.host.as_str(), cli.interface.as_str())
    };
    tracing::debug!(?check, ?transport, "resolved settings");

    Ok(Settings {
        check,
        transport,
        community,
    })
}

fn resolve_thresholds(cli: &Cli) -> Result<Option<Thresholds>, CliError> {
    let warn = parse_percent(cli.warn_percent.as_deref(), "--warn_percent")?;
    let crit = parse_percent(cli.crit_percent.as_deref(), "--crit_percent")?;
    Ok(Thresholds::from_options(warn, crit)?)
}

fn parse_percent(raw: Option<&str>, flag: &str) -> Result<Option<i64>, CliError> {
    raw.map(|value| {
        value
            .trim()
            .parse::<i64>()
            .map_err(|_| CliError::InvalidArgument {
                message: format!("{flag} must be a valid percentage (without %)"),
            })
    })
    .transpose()
}

fn resolve_bandwidth(cli: &Cli) -> Result<Option<Bandwidth>, CliError> {
    let unit = BandwidthUnit::from_str(&cli.bandwidth_unit).map_err(|_| CliError::InvalidArgument {
        message: format!(
            "--bandwidth_unit must be one of b, M or G (got '{}')",
            cli.bandwidth_unit
        ),
    })?;
    Ok(cli.bandwidth.map(|value| Bandwidth::new(value, unit)))
}

/// Flag / `IFPULSE_COMMUNITY` first, then the config crate's chain.
fn resolve_community(cli: &Cli, cfg: &Config) -> Result<SecretString, CliError> {
    if let Some(community) = cli.community.as_deref().filter(|c| !c.is_empty()) {
        return Ok(SecretString::from(community.to_owned()));
    }
    Ok(ifpulse_config::resolve_community(cfg, &cli.host)?)
}
