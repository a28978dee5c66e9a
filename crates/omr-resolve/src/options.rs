//! Resolution options.

use omr_core::OntologyHeader;
use serde::{Deserialize, Serialize};

/// What to emit for an object type's `pluralDisplayName`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PluralDisplayNames {
    /// Carry the IR value through, falling back to the display name.
    #[default]
    Preserve,
    /// Always emit an empty string.
    Omit,
}

impl PluralDisplayNames {
    pub fn project(self, display_name: &str, plural: Option<&str>) -> String {
        match self {
            Self::Preserve => plural.unwrap_or(display_name).to_string(),
            Self::Omit => String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Header copied verbatim into the resolved document.
    pub ontology: OntologyHeader,
    pub plural_display_names: PluralDisplayNames,
}
