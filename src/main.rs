//! idm-config-diff: configuration drift comparison tool
//!
//! Compares a pilot configuration export against a production baseline and
//! renders the differences for change review.

use clap::Parser;
use idm_config_diff::pipeline::{
    exit_codes, run_pipeline, DomainSelection, OutputTarget, PipelineConfig,
};
use idm_config_diff::reports::{ReportConfig, ReportFormat};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "idm-config-diff")]
#[command(version)]
#[command(about = "Configuration drift comparison for identity-management exports", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  The exports are equivalent
    1  Changes detected
    2  Comparison degraded (schema version mismatch)
    3  Error occurred

EXAMPLES:
    # Compare two export folders and write the HTML report
    idm-config-diff exports/pilot exports/prod -O drift.html

    # CI check on the sync engine only
    idm-config-diff exports/pilot exports/prod --mode sync-only -o summary

    # Export JSON for processing
    idm-config-diff exports/pilot exports/prod -o json > drift.json")]
struct Cli {
    /// Pilot (candidate) export folder
    pilot: PathBuf,

    /// Baseline (reference) export folder
    baseline: PathBuf,

    /// Which configuration domains to compare
    #[arg(long, default_value = "full")]
    mode: DomainSelection,

    /// Output format
    #[arg(short, long, default_value = "html")]
    output: ReportFormat,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Report title
    #[arg(long)]
    title: Option<String>,

    /// Omit unchanged rows entirely instead of marking them hideable
    #[arg(long)]
    only_changes: bool,

    /// Suppress the generation timestamp for reproducible output
    #[arg(long)]
    no_timestamp: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let generated_at = if cli.no_timestamp {
        None
    } else {
        Some(chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string())
    };

    let config = PipelineConfig {
        pilot: cli.pilot,
        baseline: cli.baseline,
        selection: cli.mode,
        format: cli.output,
        report: ReportConfig {
            title: cli.title,
            generated_at,
            only_changes: cli.only_changes,
        },
        target: OutputTarget::from_option(cli.output_file),
    };

    match run_pipeline(&config) {
        Ok(outcome) => {
            if outcome.exit_code != 0 {
                std::process::exit(outcome.exit_code);
            }
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_codes::ERROR);
        }
    }
}
