//! # CLI Configuration
//!
//! Optional `omr.yaml` carrying the settings that would otherwise be
//! repeated on every invocation:
//!
//! ```yaml
//! ontology:
//!   apiName: restaurants
//!   rid: ri.ontology.restaurants
//!   displayName: Restaurants
//! plural_display_names: preserve   # or: omit
//! pretty: true
//! ```
//!
//! An explicit `--config PATH` must exist. Without it, `omr.yaml` in the
//! working directory is used when present. Command-line flags override
//! file values.

use std::path::Path;

use serde::Deserialize;

use omr_core::OntologyHeader;
use omr_resolve::{PluralDisplayNames, ResolveOptions};

use crate::input::{load_yaml_typed, InputResult};

/// File name looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "omr.yaml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub ontology: OntologyHeader,
    pub plural_display_names: PluralDisplayNames,
    /// Pretty-print resolved documents.
    pub pretty: bool,
}

impl CliConfig {
    /// Locate and load the configuration.
    pub fn discover(explicit: Option<&Path>, working_dir: &Path) -> InputResult<Self> {
        if let Some(path) = explicit {
            tracing::debug!(path = %path.display(), "loading configuration");
            return load_yaml_typed(path);
        }
        let default = working_dir.join(DEFAULT_CONFIG_FILE);
        if default.is_file() {
            tracing::debug!(path = %default.display(), "loading configuration");
            load_yaml_typed(&default)
        } else {
            Ok(Self::default())
        }
    }

    pub fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            ontology: self.ontology.clone(),
            plural_display_names: self.plural_display_names,
        }
    }
}
