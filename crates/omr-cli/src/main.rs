//! # omr CLI entry point
//!
//! Parses command-line arguments, sets up logging, loads the optional
//! configuration file, and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use omr_cli::check::{run_check, CheckArgs};
use omr_cli::config::CliConfig;
use omr_cli::digest::{run_digest, DigestArgs};
use omr_cli::resolve::{run_resolve, ResolveArgs};
use omr_cli::EXIT_ERROR;

/// Ontology metadata resolver.
///
/// Turns an ontology IR document into normalized, bidirectional,
/// client-facing metadata.
#[derive(Parser, Debug)]
#[command(name = "omr", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    /// Path to configuration file (default: ./omr.yaml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve an IR document and print, write, or check the result.
    Resolve(ResolveArgs),

    /// Resolve an IR document and report success or the first violation.
    Check(CheckArgs),

    /// Print the content digest of the resolved document.
    Digest(DigestArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    let working_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config = match CliConfig::discover(cli.config.as_deref(), &working_dir) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("failed to load configuration: {e}");
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let result = match cli.command {
        Commands::Resolve(args) => run_resolve(&args, &config),
        Commands::Check(args) => run_check(&args, &config),
        Commands::Digest(args) => run_digest(&args, &config),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Initialize tracing based on verbosity level. Logs go to stderr so that
/// stdout carries only the resolved document.
fn init_tracing(verbose: u8, json: bool) {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
