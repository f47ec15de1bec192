mod cli;
mod config;
mod error;
mod output;

use clap::Parser;
use clap::error::ErrorKind;
use secrecy::ExposeSecret;
use tracing_subscriber::EnvFilter;

use ifpulse_core::{InterfaceCheck, Outcome};

use crate::cli::Cli;
use crate::error::{CliError, exit_code};

fn main() {
    // Parse CLI arguments; a scheduler reads exit code 2 as CRITICAL, so
    // usage errors are reported as UNKNOWN instead of clap's default.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                let _ = err.print();
                std::process::exit(exit_code::OK);
            }
            let usage = CliError::Usage {
                message: output::usage_message(&err.render().to_string()),
            };
            println!("{}", output::render_error(cli::OutputFormat::Nagios, &usage));
            let _ = err.print();
            std::process::exit(usage.exit_code());
        }
    };

    init_tracing(&cli);

    match run(&cli) {
        Ok(outcome) => {
            println!("{}", output::render_outcome(cli.output, &outcome));
            std::process::exit(exit_code::for_severity(outcome.severity()));
        }
        Err(err) => {
            let code = err.exit_code();
            println!("{}", output::render_error(cli.output, &err));
            if cli.diagnostics() {
                eprintln!("{:?}", miette::Report::new(err));
            }
            std::process::exit(code);
        }
    }
}

fn init_tracing(cli: &Cli) {
    let filter = match (cli.verbose, cli.debug) {
        (0, false) => "warn",
        (0 | 1, _) => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<Outcome, CliError> {
    let settings = config::resolve(cli)?;

    let mut snmp = settings
        .transport
        .build_snmp(&settings.check.host, settings.community.expose_secret().as_bytes())?;
    let cache = settings.transport.build_cache()?;

    let check = InterfaceCheck::new(settings.check);
    tracing::debug!(host = %check.config().host, interface = %check.config().interface, "running check");
    Ok(check.run(&mut snmp, &cache)?)
}
