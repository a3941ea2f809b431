//! CLI for ci-scout.
//!
//! Searches GitHub for repositories matching a plain-language description and
//! prints the ones with recorded GitHub Actions runs as JSON.

use ci_scout::{
    config_path_from_env, fetch_token, write_report, OutputFormat, RunSummary, Runner,
    RunnerConfig, RunnerError, Settings, TokenCommand, API_KEY_ENV,
};
use clap::Parser;
use std::io::Write;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// ci-scout - Find GitHub repositories with active CI from a plain-language description.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// What you are looking for, e.g. "fast json parser in rust".
    intent: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Both ring and aws-lc-rs end up in the dependency graph; pick one.
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    init_tracing();

    let args = Args::parse();

    match run(args).await {
        Ok((summary, format)) => match print_summary(&summary, format) {
            Ok(()) => ExitCode::from(0),
            Err(e) => {
                error!(error = %e, "Failed to write results");
                ExitCode::from(2)
            }
        },
        Err(e @ RunnerError::Credential(_)) => {
            error!(error = %e, "Could not obtain a GitHub token");
            ExitCode::from(1)
        }
        Err(e) => {
            error!(error = %e, "Critical failure");
            ExitCode::from(2)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Sets up the global tracing subscriber with:
/// - Compact log formatting (single-line output) on stderr, keeping stdout for JSON
/// - Log level filtering via `RUST_LOG` env var (defaults to "info")
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Main execution logic.
async fn run(args: Args) -> Result<(RunSummary, OutputFormat), RunnerError> {
    let token = fetch_token(&TokenCommand::default()).await?;

    let settings = Settings::load(&config_path_from_env())?;
    let format = settings.output.format;
    let config = RunnerConfig::new(token, settings)
        .with_rewrite_api_key(std::env::var(API_KEY_ENV).ok());

    let runner = Runner::new(config)?;
    let summary = runner.run(&args.intent).await?;
    Ok((summary, format))
}

/// Prints the surviving repositories to stdout and a short tally to the log.
fn print_summary(summary: &RunSummary, format: OutputFormat) -> std::io::Result<()> {
    info!(
        query = %summary.query.text,
        candidates = summary.candidates,
        active = summary.active,
        inactive = summary.inactive,
        probe_failures = summary.probe_failures,
        "Run complete"
    );

    write_no_results_notice(summary, &mut std::io::stderr().lock())?;

    let stdout = std::io::stdout();
    write_report(&mut stdout.lock(), &summary.repositories, format)
}

/// Tells the user nothing survived, independent of the log filter.
///
/// Goes to stderr so stdout stays valid JSON.
fn write_no_results_notice<W: Write>(summary: &RunSummary, out: &mut W) -> std::io::Result<()> {
    if !summary.is_empty() {
        return Ok(());
    }
    if summary.search_failed {
        writeln!(out, "No results found: the search request failed.")
    } else {
        writeln!(out, "No results found.")
    }
}
