//! # Digest Subcommand
//!
//! Prints the content digest of the resolved document: SHA-256 over its
//! canonical JSON bytes, rendered as `sha256:<hex>`. Two IR documents that
//! resolve to the same metadata share a digest regardless of how either
//! was formatted.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::config::CliConfig;
use crate::{load_and_resolve, report_failure, EXIT_FAILURE, EXIT_OK};

/// Arguments for the `omr digest` subcommand.
#[derive(Args, Debug)]
pub struct DigestArgs {
    /// IR document (JSON, or YAML when the name ends in .yaml/.yml).
    #[arg(value_name = "IR")]
    pub ir: PathBuf,
}

/// Execute the digest subcommand.
pub fn run_digest(args: &DigestArgs, config: &CliConfig) -> Result<u8> {
    let resolved = match load_and_resolve(&args.ir, &config.resolve_options())? {
        Ok(resolved) => resolved,
        Err(err) => {
            report_failure(&args.ir, &err);
            return Ok(EXIT_FAILURE);
        }
    };
    let digest = resolved
        .digest()
        .context("failed to digest resolved document")?;
    println!("{digest}");
    Ok(EXIT_OK)
}
