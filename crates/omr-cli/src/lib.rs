//! # omr-cli: Ontology Metadata Resolver Command-Line Interface
//!
//! Thin front end over [`omr_resolve::resolve_ontology`]: loads an IR
//! document from disk, resolves it, and writes, checks, or fingerprints the
//! result.
//!
//! ## Subcommands
//!
//! - `resolve`: Resolve and print or write the metadata document, or
//!   `--check` it against a committed copy
//! - `check`: Resolve and report success or the first violation
//! - `digest`: Print the content digest of the resolved document
//!
//! ## Exit Codes
//!
//! | Code | Meaning                                                     |
//! |------|-------------------------------------------------------------|
//! | 0    | Success                                                     |
//! | 1    | The IR failed to resolve, or `--check` found a difference   |
//! | 2    | Operational error: unreadable input, unparsable file, I/O   |
//!
//! ## Crate Policy
//!
//! - Argument parsing lives in `main.rs`; handlers return an exit code.
//! - No resolution logic here: handlers delegate to `omr-resolve`.

use std::path::Path;

use anyhow::{Context, Result};

use omr_core::ResolvedOntology;
use omr_resolve::{ResolveError, ResolveOptions};

pub mod check;
pub mod config;
pub mod digest;
pub mod input;
pub mod resolve;

pub const EXIT_OK: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_ERROR: u8 = 2;

/// Load `ir_path` and resolve it.
///
/// The outer `Result` carries operational errors (exit 2); the inner one
/// carries resolution failures (exit 1).
pub fn load_and_resolve(
    ir_path: &Path,
    options: &ResolveOptions,
) -> Result<Result<ResolvedOntology, ResolveError>> {
    let ir = input::load_ir(ir_path)
        .with_context(|| format!("failed to load IR document: {}", ir_path.display()))?;
    Ok(omr_resolve::resolve_ontology(&ir, options))
}

/// Print and log a resolution failure.
pub fn report_failure(ir_path: &Path, err: &ResolveError) {
    tracing::error!(ir = %ir_path.display(), owner = %err.owner(), "resolution failed");
    println!("FAIL: {}: {err}", ir_path.display());
}
