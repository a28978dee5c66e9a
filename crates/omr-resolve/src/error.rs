//! Resolution error types.
//!
//! Leaf projectors return narrow errors ([`StatusError`], [`TypeError`],
//! [`PrimaryKeyError`], [`LinkError`]) that know nothing about where they
//! occurred. Callers lift them into [`ResolveError`] together with the
//! [`Owner`] of the offending IR element, so every failure that reaches the
//! caller names the object, link, action, interface, or shared property type
//! that caused it.

use std::fmt;

use thiserror::Error;

/// The top-level IR element a resolution failure is attributed to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Owner {
    ObjectType(String),
    LinkType(String),
    ActionType(String),
    InterfaceType(String),
    SharedPropertyType(String),
}

impl Owner {
    /// The API name or relationship id of the element.
    pub fn id(&self) -> &str {
        match self {
            Self::ObjectType(id)
            | Self::LinkType(id)
            | Self::ActionType(id)
            | Self::InterfaceType(id)
            | Self::SharedPropertyType(id) => id,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::ObjectType(_) => "object type",
            Self::LinkType(_) => "link type",
            Self::ActionType(_) => "action type",
            Self::InterfaceType(_) => "interface type",
            Self::SharedPropertyType(_) => "shared property type",
        }
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} `{}`", self.kind(), self.id())
    }
}

/// Errors from projecting a lifecycle status onto the simplified enum.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatusError {
    #[error("unknown status variant `{tag}`")]
    Unrecognized { tag: String },

    /// A recognized IR status with no client-facing label (`endorsed`,
    /// `example`).
    #[error("status `{tag}` has no client-facing mapping")]
    NoMapping { tag: String },
}

/// Errors from the property-side and parameter-side type tables.
#[derive(Debug, Error)]
pub enum TypeError {
    #[error("unknown type tag `{tag}`")]
    UnknownTag { tag: String },

    /// A recognized tag the client-facing vocabulary cannot express.
    #[error("type `{tag}` is not supported")]
    Unsupported { tag: String },

    #[error("struct field `{field}` has unsupported type `{tag}`")]
    UnsupportedStructField { field: String, tag: String },

    #[error("failed to fingerprint struct fields: {0}")]
    Canonicalization(#[from] omr_core::CanonicalizationError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrimaryKeyError {
    #[error("no primary key declared")]
    Missing,

    #[error("composite primary key not supported: {keys:?}")]
    Composite { keys: Vec<String> },
}

/// Structural problems in a relationship or interface link declaration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    #[error(
        "expected exactly one primary-key-to-foreign-key mapping, found {found} (composite joins are not supported)"
    )]
    MappingCount { found: usize },

    #[error("mapping {side} endpoint names `{found}`, expected `{expected}`")]
    MappingEndpoint {
        side: &'static str,
        expected: String,
        found: String,
    },

    #[error("unknown link definition `{tag}`")]
    UnrecognizedDefinition { tag: String },

    #[error("link `{link}` targets an object type; only interface targets are supported")]
    ObjectTypeTarget { link: String },

    #[error("link `{link}` has unknown target kind `{tag}`")]
    UnrecognizedTarget { link: String, tag: String },
}

/// A resolution failure. Resolution is all-or-nothing: the first violation
/// aborts the whole document.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("{owner}: {source}")]
    Status {
        owner: Owner,
        #[source]
        source: StatusError,
    },

    #[error("{owner}: {element}: {source}")]
    Type {
        owner: Owner,
        element: String,
        #[source]
        source: TypeError,
    },

    #[error("{owner}: {source}")]
    PrimaryKey {
        owner: Owner,
        #[source]
        source: PrimaryKeyError,
    },

    #[error("{owner}: {source}")]
    Link {
        owner: Owner,
        #[source]
        source: LinkError,
    },

    #[error("{owner}: references unknown {target_kind} `{target}`")]
    DanglingReference {
        owner: Owner,
        target_kind: &'static str,
        target: String,
    },

    #[error("{owner}: parameter `{parameter}` must be of type {expected}")]
    InvalidRuleParameter {
        owner: Owner,
        parameter: String,
        expected: &'static str,
    },

    #[error("{owner}: logic rule `{tag}` is not supported")]
    UnsupportedRule { owner: Owner, tag: String },

    #[error("{owner}: icon `{tag}` is not supported, only blueprint icons are")]
    UnsupportedIcon { owner: Owner, tag: String },

    #[error("{owner}: interface inheritance cycle through `{through}`")]
    InterfaceCycle { owner: Owner, through: String },

    #[error("duplicate rid `{rid}` synthesized for {first} and {second}")]
    DuplicateRid {
        rid: String,
        first: Owner,
        second: Owner,
    },
}

impl ResolveError {
    /// The IR element the failure is attributed to. For duplicate rids this
    /// is the second claimant.
    pub fn owner(&self) -> &Owner {
        match self {
            Self::Status { owner, .. }
            | Self::Type { owner, .. }
            | Self::PrimaryKey { owner, .. }
            | Self::Link { owner, .. }
            | Self::DanglingReference { owner, .. }
            | Self::InvalidRuleParameter { owner, .. }
            | Self::UnsupportedRule { owner, .. }
            | Self::UnsupportedIcon { owner, .. }
            | Self::InterfaceCycle { owner, .. } => owner,
            Self::DuplicateRid { second, .. } => second,
        }
    }

    pub(crate) fn dangling(owner: &Owner, target_kind: &'static str, target: &str) -> Self {
        Self::DanglingReference {
            owner: owner.clone(),
            target_kind,
            target: target.to_string(),
        }
    }
}

/// Result type alias for resolution.
pub type ResolveResult<T> = Result<T, ResolveError>;
