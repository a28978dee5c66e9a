//! # Resolve Subcommand
//!
//! Resolves an IR document and prints it, writes it to `--output`, or with
//! `--check` compares it against a previously committed resolved document.
//! The comparison is made over canonical JSON bytes, so formatting and key
//! order in the committed file do not matter.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use omr_core::{sha256_hex, CanonicalBytes, ResolvedOntology};

use crate::config::CliConfig;
use crate::input::load_json_typed;
use crate::{load_and_resolve, report_failure, EXIT_FAILURE, EXIT_OK};

/// Arguments for the `omr resolve` subcommand.
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// IR document (JSON, or YAML when the name ends in .yaml/.yml).
    #[arg(value_name = "IR")]
    pub ir: PathBuf,

    /// Write the resolved document here instead of stdout.
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Pretty-print the resolved document.
    #[arg(long)]
    pub pretty: bool,

    /// Compare with a committed resolved document instead of writing.
    #[arg(long, value_name = "RESOLVED", conflicts_with = "output")]
    pub check: Option<PathBuf>,
}

/// Execute the resolve subcommand.
///
/// Returns exit code: 0 on success, 1 on resolution failure or a `--check`
/// difference.
pub fn run_resolve(args: &ResolveArgs, config: &CliConfig) -> Result<u8> {
    let resolved = match load_and_resolve(&args.ir, &config.resolve_options())? {
        Ok(resolved) => resolved,
        Err(err) => {
            report_failure(&args.ir, &err);
            return Ok(EXIT_FAILURE);
        }
    };

    let canonical = resolved
        .canonical_bytes()
        .context("failed to canonicalize resolved document")?;
    tracing::info!(
        ir = %args.ir.display(),
        digest = %sha256_hex(&canonical),
        "resolved document"
    );

    if let Some(committed) = &args.check {
        return check_against(&canonical, committed);
    }

    let text = render(&resolved, args.pretty || config.pretty)?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, text)
                .with_context(|| format!("failed to write resolved document: {}", path.display()))?;
            println!("OK: wrote resolved document to {}", path.display());
        }
        None => print!("{text}"),
    }
    Ok(EXIT_OK)
}

fn render(resolved: &ResolvedOntology, pretty: bool) -> Result<String> {
    let mut text = resolved
        .to_json(pretty)
        .context("failed to serialize resolved document")?;
    text.push('\n');
    Ok(text)
}

fn check_against(computed: &CanonicalBytes, committed_path: &Path) -> Result<u8> {
    let committed: serde_json::Value = load_json_typed(committed_path).with_context(|| {
        format!("failed to load committed document: {}", committed_path.display())
    })?;
    let committed = CanonicalBytes::new(&committed)
        .context("failed to canonicalize committed document")?;

    if committed.as_bytes() == computed.as_bytes() {
        println!("OK: {} is up to date", committed_path.display());
        Ok(EXIT_OK)
    } else {
        println!(
            "FAIL: {} differs from the resolved document",
            committed_path.display()
        );
        println!("  Expected digest: {}", sha256_hex(computed));
        println!("  Existing digest: {}", sha256_hex(&committed));
        Ok(EXIT_FAILURE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IR: &str = r##"{
        "objectTypes": {
            "Restaurant": { "objectType": {
                "apiName": "Restaurant",
                "displayMetadata": {
                    "displayName": "Restaurant",
                    "pluralDisplayName": "Restaurants",
                    "icon": { "type": "blueprint", "blueprint": { "locator": "shop", "color": "#2D72D2" } }
                },
                "primaryKeys": ["id"],
                "propertyTypes": {
                    "id": { "apiName": "id", "displayMetadata": { "displayName": "Id" },
                            "type": { "type": "string", "string": {} },
                            "status": { "type": "active", "active": {} } },
                    "location": { "apiName": "location", "displayMetadata": { "displayName": "Location" },
                            "type": { "type": "geohash", "geohash": {} },
                            "status": { "type": "active", "active": {} } }
                },
                "titlePropertyTypeRid": "id",
                "status": { "type": "active", "active": {} }
            } }
        }
    }"##;

    fn args(ir: &Path) -> ResolveArgs {
        ResolveArgs {
            ir: ir.to_path_buf(),
            output: None,
            pretty: false,
            check: None,
        }
    }

    fn write_ir(dir: &Path, contents: &str) -> PathBuf {
        let path = dir.join("ontology.json");
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn writes_resolved_document_to_output() {
        let dir = tempfile::tempdir().unwrap();
        let ir = write_ir(dir.path(), IR);
        let out = dir.path().join("resolved.json");
        let args = ResolveArgs {
            output: Some(out.clone()),
            ..args(&ir)
        };

        assert_eq!(run_resolve(&args, &CliConfig::default()).unwrap(), EXIT_OK);
        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        let object_type = &written["objectTypes"]["Restaurant"]["objectType"];
        assert_eq!(object_type["rid"], "ri.Restaurant");
        assert_eq!(object_type["properties"]["location"]["dataType"]["type"], "geopoint");
    }

    #[test]
    fn check_accepts_reformatted_committed_copy() {
        let dir = tempfile::tempdir().unwrap();
        let ir = write_ir(dir.path(), IR);
        let out = dir.path().join("resolved.json");
        let write = ResolveArgs {
            output: Some(out.clone()),
            pretty: true,
            ..args(&ir)
        };
        assert_eq!(run_resolve(&write, &CliConfig::default()).unwrap(), EXIT_OK);

        let check = ResolveArgs {
            check: Some(out),
            ..args(&ir)
        };
        assert_eq!(run_resolve(&check, &CliConfig::default()).unwrap(), EXIT_OK);
    }

    #[test]
    fn check_reports_difference() {
        let dir = tempfile::tempdir().unwrap();
        let ir = write_ir(dir.path(), IR);
        let stale = dir.path().join("stale.json");
        std::fs::write(&stale, r#"{ "objectTypes": {} }"#).unwrap();
        let check = ResolveArgs {
            check: Some(stale),
            ..args(&ir)
        };
        assert_eq!(run_resolve(&check, &CliConfig::default()).unwrap(), EXIT_FAILURE);
    }

    #[test]
    fn resolution_failure_exits_one() {
        let dir = tempfile::tempdir().unwrap();
        let broken = IR.replace(r#""primaryKeys": ["id"]"#, r#""primaryKeys": ["id", "location"]"#);
        let ir = write_ir(dir.path(), &broken);
        assert_eq!(run_resolve(&args(&ir), &CliConfig::default()).unwrap(), EXIT_FAILURE);
    }

    #[test]
    fn missing_input_is_an_operational_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_resolve(&args(&dir.path().join("absent.json")), &CliConfig::default())
            .unwrap_err();
        assert!(format!("{err:#}").contains("absent.json"));
    }
}
