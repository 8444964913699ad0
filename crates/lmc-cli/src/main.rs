//! # lmc CLI entry point
//!
//! Parses command-line arguments, builds the rule set once, and dispatches
//! to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use lmc_cli::alerts::{run_alerts, AlertsArgs};
use lmc_cli::bulk::{run_bulk, BulkArgs};
use lmc_cli::check::{run_check, CheckArgs};
use lmc_cli::field::{run_field, FieldArgs};
use lmc_cli::rules::run_rules;
use lmc_cli::{load_rules, OutputFormat};

/// Legal Metrology compliance checker for e-commerce listings.
///
/// Flags non-standard units of measurement and missing pre-packaged
/// commodity declarations under the Legal Metrology Act 2009.
#[derive(Parser, Debug)]
#[command(name = "lmc", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    /// Path to a YAML rules file overriding the built-in unit tables.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check a single product listing and print its compliance report.
    Check(CheckArgs),

    /// Audit a batch of listings and print summary counters.
    Bulk(BulkArgs),

    /// List critical and high-priority alerts for a batch of listings.
    Alerts(AlertsArgs),

    /// Check one field value in isolation.
    ValidateField(FieldArgs),

    /// Print the violation catalog, unit tables and statute sections.
    Rules,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if cli.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "lmc starting");

    let rules = match load_rules(cli.config.as_deref()) {
        Ok(rules) => rules,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(1);
        }
    };

    let result = match &cli.command {
        Commands::Check(args) => run_check(args, &rules, cli.format),
        Commands::Bulk(args) => run_bulk(args, &rules, cli.format),
        Commands::Alerts(args) => run_alerts(args, &rules, cli.format),
        Commands::ValidateField(args) => run_field(args, &rules, cli.format),
        Commands::Rules => run_rules(&rules, cli.format),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
