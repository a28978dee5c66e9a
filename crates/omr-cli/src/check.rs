//! # Check Subcommand
//!
//! Resolves an IR document without emitting it. Used as a CI gate: the exit
//! code says whether the document resolves, and a failure prints the first
//! violation with the IR element that caused it.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::config::CliConfig;
use crate::{load_and_resolve, report_failure, EXIT_FAILURE, EXIT_OK};

/// Arguments for the `omr check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// IR document (JSON, or YAML when the name ends in .yaml/.yml).
    #[arg(value_name = "IR")]
    pub ir: PathBuf,
}

/// Execute the check subcommand.
pub fn run_check(args: &CheckArgs, config: &CliConfig) -> Result<u8> {
    match load_and_resolve(&args.ir, &config.resolve_options())? {
        Ok(resolved) => {
            println!(
                "OK: {} resolves ({} object types, {} action types, {} interface types, {} shared property types)",
                args.ir.display(),
                resolved.object_types.len(),
                resolved.action_types.len(),
                resolved.interface_types.len(),
                resolved.shared_property_types.len(),
            );
            Ok(EXIT_OK)
        }
        Err(err) => {
            report_failure(&args.ir, &err);
            Ok(EXIT_FAILURE)
        }
    }
}
