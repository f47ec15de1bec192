//! Configuration for the ifpulse check.
//!
//! An optional TOML file merged with `IFPULSE_*` environment variables,
//! per-host SNMP settings, community resolution (env + keyring +
//! plaintext), and translation to the transport and cache settings the
//! lower crates consume. Command-line overrides are applied by the binary.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use ifpulse_api::{MAX_RELATIVE_EXPIRY, TransportConfig};
use ifpulse_api::transport::{DEFAULT_CACHE_SERVER, DEFAULT_SNMP_PORT};
use ifpulse_core::CacheTtl;

/// Keyring service under which communities are stored.
pub const KEYRING_SERVICE: &str = "ifpulse";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no SNMP community configured for host '{host}'")]
    NoCommunity { host: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub defaults: Defaults,

    #[serde(default)]
    pub cache: CacheSettings,

    /// Per-agent settings, keyed by the name passed to `--host`.
    #[serde(default)]
    pub hosts: HashMap<String, HostProfile>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_snmp_port")]
    pub snmp_port: u16,

    /// Per-request timeout for SNMP and memcached, in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            snmp_port: default_snmp_port(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_snmp_port() -> u16 {
    DEFAULT_SNMP_PORT
}
fn default_timeout() -> u64 {
    5
}

/// Counter Store endpoints and expiries (seconds).
#[derive(Debug, Deserialize, Serialize)]
pub struct CacheSettings {
    #[serde(default = "default_servers")]
    pub servers: Vec<String>,

    #[serde(default = "default_sample_ttl")]
    pub sample_ttl: u64,

    #[serde(default = "default_long_ttl")]
    pub width_ttl: u64,

    #[serde(default = "default_long_ttl")]
    pub baseline_ttl: u64,

    #[serde(default = "default_long_ttl")]
    pub index_ttl: u64,

    #[serde(default = "default_index_jitter")]
    pub index_ttl_jitter: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            servers: default_servers(),
            sample_ttl: default_sample_ttl(),
            width_ttl: default_long_ttl(),
            baseline_ttl: default_long_ttl(),
            index_ttl: default_long_ttl(),
            index_ttl_jitter: default_index_jitter(),
        }
    }
}

fn default_servers() -> Vec<String> {
    vec![DEFAULT_CACHE_SERVER.into()]
}
fn default_sample_ttl() -> u64 {
    3600
}
fn default_long_ttl() -> u64 {
    86_400
}
fn default_index_jitter() -> u64 {
    1800
}

impl CacheSettings {
    pub fn ttl(&self) -> CacheTtl {
        CacheTtl {
            sample: Duration::from_secs(self.sample_ttl),
            width: Duration::from_secs(self.width_ttl),
            baseline: Duration::from_secs(self.baseline_ttl),
            index: Duration::from_secs(self.index_ttl),
            index_jitter: Duration::from_secs(self.index_ttl_jitter),
        }
    }
}

/// Settings for one SNMP agent.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct HostProfile {
    /// Community (plaintext; prefer keyring or env var).
    pub community: Option<String>,

    /// Environment variable name containing the community.
    pub community_env: Option<String>,

    /// Override the default SNMP port.
    pub snmp_port: Option<u16>,
}

impl Config {
    pub fn host(&self, name: &str) -> Option<&HostProfile> {
        self.hosts.get(name)
    }

    /// Reject settings that would make every run fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.defaults.timeout_secs == 0 {
            return Err(ConfigError::Validation {
                field: "defaults.timeout_secs".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.cache.servers.is_empty() {
            return Err(ConfigError::Validation {
                field: "cache.servers".into(),
                reason: "at least one memcached server is required".into(),
            });
        }
        let ttls = [
            ("cache.sample_ttl", self.cache.sample_ttl),
            ("cache.width_ttl", self.cache.width_ttl),
            ("cache.baseline_ttl", self.cache.baseline_ttl),
            ("cache.index_ttl", self.cache.index_ttl),
            (
                "cache.index_ttl + cache.index_ttl_jitter",
                self.cache.index_ttl.saturating_add(self.cache.index_ttl_jitter),
            ),
        ];
        // memcached reads larger expiries as absolute Unix times.
        if let Some((field, _)) = ttls.iter().find(|(_, secs)| *secs > MAX_RELATIVE_EXPIRY) {
            return Err(ConfigError::Validation {
                field: (*field).into(),
                reason: format!("must not exceed {MAX_RELATIVE_EXPIRY} seconds (30 days)"),
            });
        }
        if let Some((name, _)) = self.hosts.iter().find(|(_, h)| h.snmp_port == Some(0)) {
            return Err(ConfigError::Validation {
                field: format!("hosts.{name}.snmp_port"),
                reason: "port 0 is not valid".into(),
            });
        }
        Ok(())
    }

    /// Transport settings for `host`, before command-line overrides.
    pub fn transport(&self, host: &str) -> TransportConfig {
        let snmp_port = self
            .host(host)
            .and_then(|h| h.snmp_port)
            .unwrap_or(self.defaults.snmp_port);
        TransportConfig {
            snmp_port,
            timeout: Duration::from_secs(self.defaults.timeout_secs),
            cache_servers: self.cache.servers.clone(),
        }
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "ifpulse", "ifpulse").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("ifpulse");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load config from `path` (or the platform default) plus the environment.
///
/// A missing file is not an error; a malformed one is.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = path.map_or_else(config_path, Path::to_path_buf);
    tracing::debug!(path = %path.display(), "loading configuration");

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .merge(
            Env::prefixed("IFPULSE_")
                .ignore(&["community", "config", "log"])
                .split("__"),
        );

    let config: Config = figment.extract()?;
    config.validate()?;
    Ok(config)
}

// ── Community resolution (without CLI flags) ────────────────────────

/// Resolve the SNMP community for `host` from the credential chain.
pub fn resolve_community(config: &Config, host: &str) -> Result<SecretString, ConfigError> {
    resolve_community_with(config, host, keyring_community)
}

/// Same chain as [`resolve_community`] with a pluggable keyring lookup.
pub fn resolve_community_with<F>(
    config: &Config,
    host: &str,
    keyring: F,
) -> Result<SecretString, ConfigError>
where
    F: FnOnce(&str) -> Option<SecretString>,
{
    let profile = config.host(host);

    // 1. Host's community_env → env var lookup
    if let Some(env_name) = profile.and_then(|p| p.community_env.as_deref()) {
        if let Ok(val) = std::env::var(env_name) {
            tracing::debug!(host, env = env_name, "community from environment");
            return Ok(SecretString::from(val));
        }
    }

    // 2. System keyring
    if let Some(secret) = keyring(host) {
        tracing::debug!(host, "community from keyring");
        return Ok(secret);
    }

    // 3. Plaintext in config
    if let Some(community) = profile.and_then(|p| p.community.clone()) {
        tracing::debug!(host, "community from config file");
        return Ok(SecretString::from(community));
    }

    Err(ConfigError::NoCommunity { host: host.into() })
}

fn keyring_community(host: &str) -> Option<SecretString> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, &format!("{host}/community")).ok()?;
    entry.get_password().ok().map(SecretString::from)
}
