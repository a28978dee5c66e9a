//! # Resolved Metadata: Client-Facing Document
//!
//! The normalized, bidirectional form produced by `omr-resolve`. These types
//! are output-only: they serialize to the camelCase JSON contract consumed by
//! client-binding generators and runtime validators, and are never read back.
//!
//! All maps are `BTreeMap`, so the serialized document is independent of the
//! iteration order of the IR it was resolved from.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::canonical::CanonicalBytes;
use crate::digest::{sha256_digest, ContentDigest};
use crate::error::{CanonicalizationError, CoreError};
use crate::ir::{DeprecatedStatus, TypeClass};

/// Identity block emitted at the top of every resolved document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OntologyHeader {
    pub api_name: String,
    pub rid: String,
    pub display_name: String,
    pub description: String,
}

impl Default for OntologyHeader {
    fn default() -> Self {
        Self {
            api_name: "ontology".to_string(),
            rid: "ri.00000".to_string(),
            display_name: "ontology".to_string(),
            description: String::new(),
        }
    }
}

/// A fully resolved metadata document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedOntology {
    pub ontology: OntologyHeader,
    pub object_types: BTreeMap<String, ObjectTypeFullMetadata>,
    pub action_types: BTreeMap<String, ActionTypeMetadata>,
    pub interface_types: BTreeMap<String, InterfaceTypeMetadata>,
    pub shared_property_types: BTreeMap<String, SharedPropertyTypeMetadata>,
    /// Always empty; the IR carries no query definitions.
    pub query_types: BTreeMap<String, Value>,
    /// Always empty; the IR carries no value type definitions.
    pub value_types: BTreeMap<String, Value>,
}

impl ResolvedOntology {
    /// Render as JSON text.
    pub fn to_json(&self, pretty: bool) -> Result<String, CoreError> {
        let text = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(text)
    }

    pub fn canonical_bytes(&self) -> Result<CanonicalBytes, CanonicalizationError> {
        CanonicalBytes::new(self)
    }

    /// SHA-256 over the canonical form of the document.
    pub fn digest(&self) -> Result<ContentDigest, CoreError> {
        Ok(sha256_digest(&self.canonical_bytes()?))
    }
}

// -------------------------------------------------------------------------
// Shared leaves
// -------------------------------------------------------------------------

/// Simplified lifecycle label used for object, link, and action types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReleaseStatus {
    Active,
    Experimental,
    Deprecated,
}

/// Property-level status: the IR variant with its payload lifted beside the
/// discriminator, e.g. `{"type": "deprecated", "message": "...", ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaggedStatus {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub deprecation: Option<DeprecatedStatus>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Visibility {
    #[default]
    Normal,
    Prominent,
    Hidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Cardinality {
    One,
    Many,
}

/// Flattened icon: `{"type": "blueprint", "name": <locator>, "color": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ResolvedIcon {
    Blueprint { name: String, color: String },
}

// -------------------------------------------------------------------------
// Object types
// -------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectTypeFullMetadata {
    pub object_type: ObjectTypeMetadata,
    /// One view per relationship touching this object type, ordered by
    /// relationship id.
    pub link_types: Vec<LinkTypeSide>,
    /// Legacy field, always empty.
    pub implements_interfaces: Vec<String>,
    pub implements_interfaces2: BTreeMap<String, InterfaceImplementationMetadata>,
    /// Shared property API name → implementing property API name, across all
    /// implemented interfaces.
    pub shared_property_type_mapping: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectTypeMetadata {
    pub api_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub display_name: String,
    pub plural_display_name: String,
    pub icon: ResolvedIcon,
    pub primary_key: String,
    pub title_property: String,
    pub properties: BTreeMap<String, PropertyMetadata>,
    pub rid: String,
    pub status: ReleaseStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyMetadata {
    pub display_name: String,
    pub rid: String,
    pub status: TaggedStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub visibility: Visibility,
    pub data_type: PropertyDataType,
    pub type_classes: Vec<TypeClass>,
}

/// Client-facing property type (the property-side vocabulary).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PropertyDataType {
    Array {
        #[serde(rename = "subType")]
        sub_type: Box<PropertyDataType>,
    },
    Attachment,
    Boolean,
    Byte,
    Date,
    Decimal,
    Double,
    Float,
    Geopoint,
    Geoshape,
    Integer,
    Long,
    Marking,
    Short,
    String,
    Struct {
        #[serde(rename = "structFieldTypes")]
        struct_field_types: Vec<StructFieldType>,
    },
    Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructFieldType {
    pub api_name: String,
    pub rid: String,
    pub data_type: PropertyDataType,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InterfaceImplementationMetadata {
    /// Shared property API name → implementing property API name.
    pub properties: BTreeMap<String, String>,
}

// -------------------------------------------------------------------------
// Links
// -------------------------------------------------------------------------

/// One directional view of a relationship, attached to one endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkTypeSide {
    pub api_name: String,
    pub display_name: String,
    pub status: ReleaseStatus,
    pub object_type_api_name: String,
    pub cardinality: Cardinality,
    pub link_type_rid: String,
    /// Present on the many side of a one-to-many relationship only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreign_key_property_api_name: Option<String>,
}

// -------------------------------------------------------------------------
// Actions
// -------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionTypeMetadata {
    pub api_name: String,
    pub description: String,
    pub display_name: String,
    pub status: ReleaseStatus,
    pub parameters: BTreeMap<String, ActionParameter>,
    pub rid: String,
    pub operations: Vec<ActionOperation>,
}

/// One entry per mutation rule, in rule order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ActionOperation {
    CreateObject {
        #[serde(rename = "objectTypeApiName")]
        object_type_api_name: String,
    },
    ModifyObject {
        #[serde(rename = "objectTypeApiName")]
        object_type_api_name: String,
    },
    DeleteObject {
        #[serde(rename = "objectTypeApiName")]
        object_type_api_name: String,
    },
    CreateInterfaceObject {
        #[serde(rename = "interfaceTypeApiName")]
        interface_type_api_name: String,
    },
    ModifyInterfaceObject {
        #[serde(rename = "interfaceTypeApiName")]
        interface_type_api_name: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionParameter {
    pub display_name: String,
    pub description: String,
    pub required: bool,
    pub data_type: ActionParameterType,
    pub type_classes: Vec<TypeClass>,
}

/// Client-facing parameter type (the parameter-side vocabulary).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ActionParameterType {
    Array {
        #[serde(rename = "subType")]
        sub_type: Box<ActionParameterType>,
    },
    Attachment,
    Boolean,
    Date,
    Double,
    Geohash,
    Geoshape,
    Integer,
    Long,
    Marking,
    MediaReference,
    Object {
        #[serde(rename = "objectApiName")]
        object_api_name: String,
        #[serde(rename = "objectTypeApiName")]
        object_type_api_name: String,
    },
    ObjectSet,
    ObjectType,
    String,
    Timestamp,
}

// -------------------------------------------------------------------------
// Interfaces and shared property types
// -------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedPropertyTypeMetadata {
    pub rid: String,
    pub api_name: String,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub data_type: PropertyDataType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceTypeMetadata {
    pub rid: String,
    pub api_name: String,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub properties: BTreeMap<String, InterfaceSharedPropertyType>,
    /// Own properties plus those of every transitively extended interface.
    pub all_properties: BTreeMap<String, InterfaceSharedPropertyType>,
    pub extends_interfaces: Vec<String>,
    pub all_extends_interfaces: Vec<String>,
    pub implemented_by_object_types: Vec<String>,
    pub links: BTreeMap<String, InterfaceLinkTypeMetadata>,
    pub all_links: BTreeMap<String, InterfaceLinkTypeMetadata>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceSharedPropertyType {
    pub rid: String,
    pub api_name: String,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub data_type: PropertyDataType,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceLinkTypeMetadata {
    pub rid: String,
    pub api_name: String,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub linked_entity_api_name: LinkedEntityApiName,
    pub cardinality: Cardinality,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum LinkedEntityApiName {
    #[serde(rename = "interfaceTypeApiName")]
    InterfaceType {
        #[serde(rename = "apiName")]
        api_name: String,
    },
}
