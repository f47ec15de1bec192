//! Integration tests for the `ifpulse` binary.
//!
//! These cover argument handling and validation paths that end before any
//! SNMP or memcached traffic, so no agent or cache is needed.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `ifpulse` binary with env isolation.
///
/// Clears all `IFPULSE_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn ifpulse_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("ifpulse");
    cmd.env("HOME", "/tmp/ifpulse-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/ifpulse-cli-test-nonexistent")
        .env_remove("IFPULSE_COMMUNITY")
        .env_remove("IFPULSE_CONFIG")
        .env_remove("IFPULSE_DEFAULTS__TIMEOUT_SECS")
        .env_remove("IFPULSE_DEFAULTS__SNMP_PORT")
        .env_remove("IFPULSE_CACHE__SERVERS")
        .env_remove("RUST_LOG");
    cmd
}

/// A command with the two required arguments already supplied.
fn check_cmd() -> assert_cmd::Command {
    let mut cmd = ifpulse_cmd();
    cmd.args(["--host", "192.0.2.10", "--interface", "GigabitEthernet0/1"]);
    cmd
}

fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Assert an UNKNOWN result whose single stdout line contains `needle`.
fn assert_unknown(output: &std::process::Output, needle: &str) {
    assert_eq!(output.status.code(), Some(3), "expected exit code 3");
    let stdout = stdout_of(output);
    assert_eq!(stdout.lines().count(), 1, "expected one stdout line:\n{stdout}");
    assert!(stdout.starts_with("UNKNOWN - "), "expected UNKNOWN line:\n{stdout}");
    assert!(stdout.contains(needle), "expected '{needle}' in:\n{stdout}");
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_help_flag() {
    ifpulse_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("--warn_percent")
            .and(predicate::str::contains("--crit_percent"))
            .and(predicate::str::contains("--bandwidth_unit"))
            .and(predicate::str::contains("--check_status")),
    );
}

#[test]
fn test_version_flag() {
    ifpulse_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("ifpulse"));
}

// ── Usage errors are UNKNOWN, not clap's exit code 2 ────────────────

#[test]
fn test_no_args_is_unknown() {
    let output = ifpulse_cmd().output().unwrap();
    assert_unknown(&output, "required arguments were not provided");
}

#[test]
fn test_missing_host_is_unknown() {
    let output = ifpulse_cmd()
        .args(["--interface", "eth0"])
        .output()
        .unwrap();
    assert_unknown(&output, "--host");
}

#[test]
fn test_bad_bandwidth_unit_is_unknown() {
    let output = check_cmd()
        .args(["--bandwidth", "10", "--bandwidth_unit", "K"])
        .output()
        .unwrap();
    assert_unknown(&output, "invalid value 'K'");
}

// ── Threshold validation ────────────────────────────────────────────

#[test]
fn test_crit_without_warn() {
    let output = check_cmd().args(["--crit_percent", "90"]).output().unwrap();
    assert_unknown(&output, "--crit_percent was supplied, but no --warn_percent");
}

#[test]
fn test_warn_without_crit() {
    let output = check_cmd().args(["--warn_percent", "70"]).output().unwrap();
    assert_unknown(&output, "--warn_percent was supplied, but no --crit_percent");
}

#[test]
fn test_warn_not_below_crit() {
    let output = check_cmd()
        .args(["--warn_percent", "90", "--crit_percent", "90"])
        .output()
        .unwrap();
    assert_unknown(&output, "--warn_percent must be less than --crit_percent");
}

#[test]
fn test_percent_out_of_range() {
    let output = check_cmd()
        .args(["--warn_percent", "70", "--crit_percent", "100"])
        .output()
        .unwrap();
    assert_unknown(&output, "--crit_percent must be a valid percentage (without %)");
}

#[test]
fn test_percent_with_sign() {
    let output = check_cmd()
        .args(["--warn_percent", "70%", "--crit_percent", "90"])
        .output()
        .unwrap();
    assert_unknown(&output, "--warn_percent must be a valid percentage (without %)");
}

#[test]
fn test_threshold_errors_win_over_missing_community() {
    // No community anywhere, but the threshold error is reported first.
    let output = check_cmd().args(["--crit_percent", "90"]).output().unwrap();
    let stdout = stdout_of(&output);
    assert!(!stdout.contains("community"), "unexpected output:\n{stdout}");
}

// ── Configuration ───────────────────────────────────────────────────

#[test]
fn test_missing_community_is_unknown() {
    let output = check_cmd().output().unwrap();
    assert_unknown(&output, "No SNMP community configured for host '192.0.2.10'");
}

#[test]
fn test_malformed_config_is_unknown() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[defaults]\ntimeout_secs = \"soon\"\n").unwrap();

    let output = check_cmd()
        .arg("--config")
        .arg(&path)
        .output()
        .unwrap();
    assert_unknown(&output, "Invalid configuration");
}

#[test]
fn test_zero_timeout_is_unknown() {
    let output = check_cmd()
        .args(["--community", "public", "--timeout", "0"])
        .output()
        .unwrap();
    assert_unknown(&output, "--timeout must be at least 1 second");
}

#[test]
fn test_json_error_output() {
    let output = check_cmd()
        .args(["--output", "json", "--warn_percent", "70"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));
    let value: serde_json::Value = serde_json::from_str(stdout_of(&output).trim()).unwrap();
    assert_eq!(value["severity"], "UNKNOWN");
    assert_eq!(
        value["error"],
        "--warn_percent was supplied, but no --crit_percent"
    );
}

#[test]
fn test_debug_writes_diagnostics_to_stderr_only() {
    let output = check_cmd()
        .args(["--debug", "--crit_percent", "90"])
        .output()
        .unwrap();
    assert_eq!(stdout_of(&output).lines().count(), 1);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ifpulse::invalid_argument"), "stderr:\n{stderr}");
}
