//! # Input Loading
//!
//! Reads IR documents and configuration files from disk. The format is
//! chosen by extension: `.yaml` / `.yml` are YAML, everything else is JSON.
//! Both paths deserialize straight into the typed model, so IR unions decode
//! identically whichever format the document was written in.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

use omr_core::OntologyIr;

/// Errors raised while reading an input file.
#[derive(Debug, Error)]
pub enum InputError {
    /// YAML parsing failed.
    #[error("failed to parse YAML at {path}: {source}")]
    YamlParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// JSON parsing failed.
    #[error("failed to parse JSON at {path}: {source}")]
    JsonParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The file does not exist.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type InputResult<T> = Result<T, InputError>;

/// Document format, chosen from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Yaml,
}

impl InputFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Self::Yaml
            }
            _ => Self::Json,
        }
    }
}

/// Load an IR document.
pub fn load_ir(path: &Path) -> InputResult<OntologyIr> {
    let ir: OntologyIr = match InputFormat::from_path(path) {
        InputFormat::Yaml => load_yaml_typed(path)?,
        InputFormat::Json => load_json_typed(path)?,
    };
    tracing::debug!(
        path = %path.display(),
        object_types = ir.object_types.len(),
        link_types = ir.link_types.len(),
        action_types = ir.action_types.len(),
        "loaded IR document"
    );
    Ok(ir)
}

/// Load a YAML file into a strongly-typed struct.
pub fn load_yaml_typed<T: DeserializeOwned>(path: &Path) -> InputResult<T> {
    let content = read_to_string(path)?;
    serde_yaml::from_str(&content).map_err(|source| InputError::YamlParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a JSON file into a strongly-typed struct.
pub fn load_json_typed<T: DeserializeOwned>(path: &Path) -> InputResult<T> {
    let content = read_to_string(path)?;
    serde_json::from_str(&content).map_err(|source| InputError::JsonParse {
        path: path.to_path_buf(),
        source,
    })
}

fn read_to_string(path: &Path) -> InputResult<String> {
    std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            InputError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            InputError::Io(e)
        }
    })
}
