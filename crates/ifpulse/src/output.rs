//! Plugin output: one Nagios line with perfdata, or one JSON object.
//!
//! Whatever happens, stdout carries exactly one line; diagnostics go to
//! stderr through `tracing` and miette.

use serde::Serialize;

use ifpulse_core::{Measurement, Outcome, Severity};

use crate::cli::OutputFormat;
use crate::error::CliError;

#[derive(Serialize)]
struct JsonReport<'a> {
    severity: Severity,
    summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    outcome: Option<&'a Outcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a completed check.
pub fn render_outcome(format: OutputFormat, outcome: &Outcome) -> String {
    let summary = summary_line(outcome);
    match format {
        OutputFormat::Nagios => summary,
        OutputFormat::Json => render_json(
            &JsonReport {
                severity: outcome.severity(),
                summary: summary.clone(),
                outcome: Some(outcome),
                error: None,
            },
            summary,
        ),
    }
}

/// Render a failed check.
pub fn render_error(format: OutputFormat, err: &CliError) -> String {
    let summary = format!("{} - {err}", Severity::Unknown);
    match format {
        OutputFormat::Nagios => summary,
        OutputFormat::Json => render_json(
            &JsonReport {
                severity: Severity::Unknown,
                summary: summary.clone(),
                outcome: None,
                error: Some(err.to_string()),
            },
            summary,
        ),
    }
}

/// Collapse a clap error into a single usage message.
///
/// Keeps the lines before the `Usage:` block and drops clap's `error:`
/// prefix, e.g. `the following required arguments were not provided:
/// --host <HOST>`.
pub fn usage_message(rendered: &str) -> String {
    rendered
        .lines()
        .take_while(|line| !line.starts_with("Usage:"))
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("For more information"))
        .map(|line| line.strip_prefix("error:").map_or(line, str::trim_start))
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_json(report: &JsonReport<'_>, fallback: String) -> String {
    serde_json::to_string(report).unwrap_or_else(|err| {
        tracing::warn!(error = %err, "JSON rendering failed, falling back to plugin line");
        fallback
    })
}

// ── Plugin line ──────────────────────────────────────────────────────

fn summary_line(outcome: &Outcome) -> String {
    match outcome {
        Outcome::NoPreviousData => format!(
            "{} - Had no previous data, waiting for next run",
            outcome.severity()
        ),
        Outcome::InterfaceDown { finding } => format!("{} - {finding}", outcome.severity()),
        Outcome::Measured(m) => format!("{} - {}", m.severity, measurement_line(m)),
    }
}

fn measurement_line(m: &Measurement) -> String {
    format!(
        "In: {} ({:.1}%), Out: {} ({:.1}%) |inBandwidth={} outBandwidth={} inAbsolut={}B OutAbsolut={}B",
        m.in_rate,
        m.percent_in,
        m.out_rate,
        m.percent_out,
        m.in_rate.perfdata(),
        m.out_rate.perfdata(),
        m.in_absolute,
        m.out_absolute,
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use ifpulse_core::{
        Baseline, BaselineSource, CounterWidth, HumanRate, StatusFinding, Utilization,
    };
    use insta::assert_snapshot;

    use super::*;

    fn measurement(severity: Severity) -> Measurement {
        Measurement {
            width: CounterWidth::Narrow,
            baseline: Baseline {
                bits_per_second: 100_000_000,
                source: BaselineSource::Cached,
            },
            utilization: Utilization {
                elapsed_secs: 60.0,
                in_octets: 481_000,
                out_octets: 93_750_000,
                in_wrapped: false,
                out_wrapped: false,
                in_bits_per_sec: 64_133.333_333_333_33,
                out_bits_per_sec: 12_500_000.0,
            },
            in_rate: HumanRate::Bps(64_133),
            out_rate: HumanRate::Mbps(12.5),
            percent_in: 0.064_133_333,
            percent_out: 12.5,
            in_absolute: 1_481_000,
            out_absolute: 740_000,
            severity,
        }
    }

    #[test]
    fn measured_line_has_rates_percentages_and_perfdata() {
        let out = render_outcome(OutputFormat::Nagios, &Outcome::Measured(measurement(Severity::Ok)));
        assert_snapshot!(out, @"OK - In: 64133bps (0.1%), Out: 12.50Mbps (12.5%) |inBandwidth=64133b outBandwidth=12.50Mb inAbsolut=1481000B OutAbsolut=740000B");
    }

    #[test]
    fn severity_prefix_follows_classification() {
        let out = render_outcome(
            OutputFormat::Nagios,
            &Outcome::Measured(measurement(Severity::Warning)),
        );
        assert!(out.starts_with("WARNING - In: "));
    }

    #[test]
    fn terminal_states_render_as_messages() {
        assert_snapshot!(
            render_outcome(OutputFormat::Nagios, &Outcome::NoPreviousData),
            @"OK - Had no previous data, waiting for next run"
        );
        assert_snapshot!(
            render_outcome(
                OutputFormat::Nagios,
                &Outcome::InterfaceDown { finding: StatusFinding::OperDown }
            ),
            @"CRITICAL - Interface is not operational"
        );
    }

    #[test]
    fn errors_render_as_unknown() {
        let err = CliError::InterfaceNotFound {
            host: "core-sw1".into(),
            interface: "Gi0/9".into(),
        };
        assert_snapshot!(render_error(OutputFormat::Nagios, &err), @"UNKNOWN - Interface not found: Gi0/9");
    }

    #[test]
    fn json_is_a_single_line() {
        let out = render_outcome(
            OutputFormat::Json,
            &Outcome::InterfaceDown { finding: StatusFinding::AdminDown },
        );
        assert!(!out.contains('\n'));
        assert_snapshot!(out, @r#"{"severity":"CRITICAL","summary":"CRITICAL - Interface is not admin up","outcome":{"state":"interface_down","finding":"admin_down"}}"#);
    }

    #[test]
    fn json_measurement_carries_rates() {
        let out = render_outcome(OutputFormat::Json, &Outcome::Measured(measurement(Severity::Ok)));
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["severity"], "OK");
        assert_eq!(value["outcome"]["state"], "measured");
        assert_eq!(value["outcome"]["in_rate"]["unit"], "bps");
        assert_eq!(value["outcome"]["in_rate"]["value"], 64_133);
        assert_eq!(value["outcome"]["out_absolute"], 740_000);
    }

    #[test]
    fn json_error_has_message() {
        let err = CliError::Cache {
            reason: "connection refused".into(),
        };
        assert_snapshot!(render_error(OutputFormat::Json, &err), @r#"{"severity":"UNKNOWN","summary":"UNKNOWN - Counter cache unavailable: connection refused","error":"Counter cache unavailable: connection refused"}"#);
    }

    #[test]
    fn usage_message_flattens_clap_output() {
        let rendered = "error: the following required arguments were not provided:\n  --host <HOST>\n\nUsage: ifpulse --host <HOST> --interface <INTERFACE>\n\nFor more information, try '--help'.\n";
        assert_eq!(
            usage_message(rendered),
            "the following required arguments were not provided: --host <HOST>"
        );
    }
}
