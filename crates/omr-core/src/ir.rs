//! # Ontology IR: Author-Facing Schema Document
//!
//! The compact intermediate representation consumed by the resolver. Field
//! names follow the IR's camelCase wire format. Everything the resolver does
//! not read (datasources, entity metadata, form layouts, section
//! configuration) is left out of these types and ignored on input.
//!
//! ## Layout
//!
//! ```text
//! OntologyIr
//! ├── objectTypes:          apiName → { objectType: ObjectType }
//! ├── linkTypes:            id      → { linkType: LinkType }
//! ├── actionTypes:          apiName → { actionType: ActionType }
//! ├── interfaceTypes:       apiName → { interfaceType: InterfaceType }
//! └── sharedPropertyTypes:  apiName → { sharedPropertyType: SharedPropertyType }
//! ```
//!
//! Unions (`status`, `type`, `definition`, `rules[*]`, `icon`, ...) decode
//! through [`RawUnion`] into closed enums; see [`crate::union`].

use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::union::RawUnion;

/// A complete IR document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OntologyIr {
    #[serde(default)]
    pub object_types: BTreeMap<String, ObjectTypeBlock>,
    #[serde(default)]
    pub link_types: BTreeMap<String, LinkTypeBlock>,
    #[serde(default)]
    pub action_types: BTreeMap<String, ActionTypeBlock>,
    #[serde(default)]
    pub interface_types: BTreeMap<String, InterfaceTypeBlock>,
    #[serde(default)]
    pub shared_property_types: BTreeMap<String, SharedPropertyTypeBlock>,
}

// -------------------------------------------------------------------------
// Shared leaves
// -------------------------------------------------------------------------

/// A `{kind, name}` annotation carried through to resolved output unchanged.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeClass {
    pub kind: String,
    pub name: String,
}

/// Lifecycle status shared by object, link, action, and property types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IrStatus {
    Active,
    Experimental,
    Deprecated(DeprecatedStatus),
    Endorsed,
    Example,
    Unrecognized(String),
}

impl IrStatus {
    /// The wire discriminator of this status.
    pub fn tag(&self) -> &str {
        match self {
            Self::Active => "active",
            Self::Experimental => "experimental",
            Self::Deprecated(_) => "deprecated",
            Self::Endorsed => "endorsed",
            Self::Example => "example",
            Self::Unrecognized(tag) => tag,
        }
    }
}

impl<'de> Deserialize<'de> for IrStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let RawUnion { tag, payload } = RawUnion::deserialize(deserializer)?;
        let status = match tag.as_str() {
            "active" => Self::Active,
            "experimental" => Self::Experimental,
            "deprecated" => Self::Deprecated(serde_json::from_value(payload).map_err(D::Error::custom)?),
            "endorsed" => Self::Endorsed,
            "example" => Self::Example,
            _ => Self::Unrecognized(tag.clone()),
        };
        Ok(status)
    }
}

/// Deprecation detail attached to a `deprecated` status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeprecatedStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replaced_by: Option<String>,
}

/// Icon descriptor. Only blueprint icons exist in the IR today.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Icon {
    Blueprint(BlueprintIcon),
    Unrecognized(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BlueprintIcon {
    pub locator: String,
    pub color: String,
}

impl<'de> Deserialize<'de> for Icon {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let RawUnion { tag, payload } = RawUnion::deserialize(deserializer)?;
        match tag.as_str() {
            "blueprint" => Ok(Self::Blueprint(
                serde_json::from_value(payload).map_err(D::Error::custom)?,
            )),
            _ => Ok(Self::Unrecognized(tag.clone())),
        }
    }
}

// -------------------------------------------------------------------------
// Object types and properties
// -------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectTypeBlock {
    pub object_type: ObjectType,
}

/// An entity type declaration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectType {
    pub api_name: String,
    pub display_metadata: ObjectDisplayMetadata,
    pub primary_keys: Vec<String>,
    #[serde(default)]
    pub property_types: BTreeMap<String, Property>,
    pub title_property_type_rid: String,
    pub status: IrStatus,
    #[serde(default)]
    pub redacted: bool,
    #[serde(default)]
    pub implements_interfaces2: Vec<InterfaceImplementation>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectDisplayMetadata {
    pub display_name: String,
    #[serde(default)]
    pub plural_display_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub icon: Icon,
    #[serde(default)]
    pub visibility: Option<String>,
}

/// A property declared on an object type.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub api_name: String,
    pub display_metadata: PropertyDisplayMetadata,
    #[serde(default)]
    pub indexed_for_search: bool,
    #[serde(rename = "type")]
    pub data_type: StorageType,
    pub status: IrStatus,
    #[serde(default)]
    pub type_classes: Vec<TypeClass>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDisplayMetadata {
    pub display_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub visibility: Option<String>,
}

/// An object type's declaration that it implements an interface.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceImplementation {
    pub interface_type_api_name: String,
    /// Shared property API name → implementing property.
    #[serde(default)]
    pub properties: BTreeMap<String, InterfacePropertyImplementation>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfacePropertyImplementation {
    pub property_type_rid: String,
}

/// Storage-level property type.
///
/// Sub-configuration that does not reach resolved metadata (string
/// analyzers, precision, nullability) is discarded at decode time.
#[derive(Debug, Clone, PartialEq)]
pub enum StorageType {
    Array(Box<StorageType>),
    Attachment,
    Boolean,
    Byte,
    Date,
    Decimal,
    Double,
    Float,
    Geohash,
    Geoshape,
    Integer,
    Long,
    Marking,
    Short,
    String,
    Struct(Vec<StructField>),
    Timestamp,
    CipherText,
    ExperimentalTimeDependentV1,
    GeotimeSeriesReference,
    MediaReference,
    Vector,
    Unrecognized(String),
}

impl StorageType {
    /// The wire discriminator of this storage type.
    pub fn tag(&self) -> &str {
        match self {
            Self::Array(_) => "array",
            Self::Attachment => "attachment",
            Self::Boolean => "boolean",
            Self::Byte => "byte",
            Self::Date => "date",
            Self::Decimal => "decimal",
            Self::Double => "double",
            Self::Float => "float",
            Self::Geohash => "geohash",
            Self::Geoshape => "geoshape",
            Self::Integer => "integer",
            Self::Long => "long",
            Self::Marking => "marking",
            Self::Short => "short",
            Self::String => "string",
            Self::Struct(_) => "struct",
            Self::Timestamp => "timestamp",
            Self::CipherText => "cipherText",
            Self::ExperimentalTimeDependentV1 => "experimentalTimeDependentV1",
            Self::GeotimeSeriesReference => "geotimeSeriesReference",
            Self::MediaReference => "mediaReference",
            Self::Vector => "vector",
            Self::Unrecognized(tag) => tag,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructField {
    pub api_name: String,
    pub field_type: StorageType,
}

#[derive(Deserialize)]
struct ArrayPayload {
    subtype: StorageType,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StructPayload {
    #[serde(default)]
    struct_fields: Vec<StructField>,
}

impl<'de> Deserialize<'de> for StorageType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let RawUnion { tag, payload } = RawUnion::deserialize(deserializer)?;
        let storage = match tag.as_str() {
            "array" => {
                let array: ArrayPayload =
                    serde_json::from_value(payload).map_err(D::Error::custom)?;
                Self::Array(Box::new(array.subtype))
            }
            "attachment" => Self::Attachment,
            "boolean" => Self::Boolean,
            "byte" => Self::Byte,
            "date" => Self::Date,
            "decimal" => Self::Decimal,
            "double" => Self::Double,
            "float" => Self::Float,
            "geohash" => Self::Geohash,
            "geoshape" => Self::Geoshape,
            "integer" => Self::Integer,
            "long" => Self::Long,
            "marking" => Self::Marking,
            "short" => Self::Short,
            "string" => Self::String,
            "struct" => {
                let fields: StructPayload =
                    serde_json::from_value(payload).map_err(D::Error::custom)?;
                Self::Struct(fields.struct_fields)
            }
            "timestamp" => Self::Timestamp,
            "cipherText" => Self::CipherText,
            "experimentalTimeDependentV1" => Self::ExperimentalTimeDependentV1,
            "geotimeSeriesReference" => Self::GeotimeSeriesReference,
            "mediaReference" => Self::MediaReference,
            "vector" => Self::Vector,
            _ => Self::Unrecognized(tag.clone()),
        };
        Ok(storage)
    }
}

// -------------------------------------------------------------------------
// Link types
// -------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkTypeBlock {
    pub link_type: LinkType,
}

/// A relationship declaration between two object types.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkType {
    pub id: String,
    pub definition: LinkDefinition,
    pub status: IrStatus,
    #[serde(default)]
    pub redacted: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LinkDefinition {
    OneToMany(OneToManyLink),
    ManyToMany(ManyToManyLink),
    Unrecognized(String),
}

impl<'de> Deserialize<'de> for LinkDefinition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let RawUnion { tag, payload } = RawUnion::deserialize(deserializer)?;
        let definition = match tag.as_str() {
            "oneToMany" => {
                Self::OneToMany(serde_json::from_value(payload).map_err(D::Error::custom)?)
            }
            "manyToMany" => {
                Self::ManyToMany(serde_json::from_value(payload).map_err(D::Error::custom)?)
            }
            _ => Self::Unrecognized(tag.clone()),
        };
        Ok(definition)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OneToManyLink {
    pub object_type_rid_one_side: String,
    pub object_type_rid_many_side: String,
    /// Metadata of the view held by the many side (pointing at the one side).
    pub one_to_many_link_metadata: LinkMetadata,
    /// Metadata of the view held by the one side (pointing at the many side).
    pub many_to_one_link_metadata: LinkMetadata,
    #[serde(default)]
    pub one_side_primary_key_to_many_side_property_mapping: Vec<PropertyMapping>,
    #[serde(default)]
    pub cardinality_hint: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManyToManyLink {
    pub object_type_rid_a: String,
    pub object_type_rid_b: String,
    pub object_type_a_to_b_link_metadata: LinkMetadata,
    pub object_type_b_to_a_link_metadata: LinkMetadata,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkMetadata {
    #[serde(default)]
    pub api_name: Option<String>,
    pub display_metadata: LinkDisplayMetadata,
    #[serde(default)]
    pub type_classes: Vec<TypeClass>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkDisplayMetadata {
    pub display_name: String,
    #[serde(default)]
    pub plural_display_name: Option<String>,
    #[serde(default)]
    pub visibility: Option<String>,
}

/// One primary-key-to-foreign-key column pairing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PropertyMapping {
    pub from: PropertyRef,
    pub to: PropertyRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRef {
    pub api_name: String,
    pub object: String,
}

// -------------------------------------------------------------------------
// Action types
// -------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionTypeBlock {
    pub action_type: ActionType,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionType {
    pub action_type_logic: ActionTypeLogic,
    pub metadata: ActionMetadata,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionTypeLogic {
    pub logic: ActionLogic,
    #[serde(default)]
    pub validation: ActionValidation,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ActionLogic {
    #[serde(default)]
    pub rules: Vec<LogicRule>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionValidation {
    #[serde(default)]
    pub parameter_validations: BTreeMap<String, ParameterValidation>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterValidation {
    pub default_validation: ParameterValidationBlock,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ParameterValidationBlock {
    pub validation: ParameterValidationRules,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ParameterValidationRules {
    /// `required` / `notRequired` union.
    pub required: RawUnion,
}

impl ParameterValidation {
    pub fn is_required(&self) -> bool {
        self.default_validation.validation.required.is("required")
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionMetadata {
    pub api_name: String,
    pub display_metadata: ActionDisplayMetadata,
    #[serde(default)]
    pub parameters: BTreeMap<String, Parameter>,
    #[serde(default)]
    pub parameter_ordering: Vec<String>,
    pub status: IrStatus,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionDisplayMetadata {
    pub display_name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub id: String,
    #[serde(rename = "type")]
    pub parameter_type: ParameterType,
    pub display_metadata: ParameterDisplayMetadata,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDisplayMetadata {
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub type_classes: Vec<TypeClass>,
}

/// A mutation rule inside an action's logic.
#[derive(Debug, Clone, PartialEq)]
pub enum LogicRule {
    AddObject(AddObjectRule),
    ModifyObject(ModifyObjectRule),
    AddOrModifyObjectV2(ModifyObjectRule),
    DeleteObject(DeleteObjectRule),
    AddInterface(AddInterfaceRule),
    ModifyInterface(ModifyInterfaceRule),
    AddLink,
    DeleteLink,
    Unrecognized(String),
}

impl LogicRule {
    /// The wire discriminator of this rule.
    pub fn tag(&self) -> &str {
        match self {
            Self::AddObject(_) => "addObjectRule",
            Self::ModifyObject(_) => "modifyObjectRule",
            Self::AddOrModifyObjectV2(_) => "addOrModifyObjectRuleV2",
            Self::DeleteObject(_) => "deleteObjectRule",
            Self::AddInterface(_) => "addInterfaceRule",
            Self::ModifyInterface(_) => "modifyInterfaceRule",
            Self::AddLink => "addLinkRule",
            Self::DeleteLink => "deleteLinkRule",
            Self::Unrecognized(tag) => tag,
        }
    }
}

impl<'de> Deserialize<'de> for LogicRule {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let RawUnion { tag, payload } = RawUnion::deserialize(deserializer)?;
        let rule = match tag.as_str() {
            "addObjectRule" => {
                Self::AddObject(serde_json::from_value(payload).map_err(D::Error::custom)?)
            }
            "modifyObjectRule" => {
                Self::ModifyObject(serde_json::from_value(payload).map_err(D::Error::custom)?)
            }
            "addOrModifyObjectRuleV2" => Self::AddOrModifyObjectV2(
                serde_json::from_value(payload).map_err(D::Error::custom)?,
            ),
            "deleteObjectRule" => {
                Self::DeleteObject(serde_json::from_value(payload).map_err(D::Error::custom)?)
            }
            "addInterfaceRule" => {
                Self::AddInterface(serde_json::from_value(payload).map_err(D::Error::custom)?)
            }
            "modifyInterfaceRule" => {
                Self::ModifyInterface(serde_json::from_value(payload).map_err(D::Error::custom)?)
            }
            "addLinkRule" => Self::AddLink,
            "deleteLinkRule" => Self::DeleteLink,
            _ => Self::Unrecognized(tag.clone()),
        };
        Ok(rule)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddObjectRule {
    pub object_type_id: String,
    #[serde(default)]
    pub property_values: BTreeMap<String, RuleValue>,
}

/// Shared by `modifyObjectRule` and `addOrModifyObjectRuleV2`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifyObjectRule {
    /// Id of the parameter holding the object being modified.
    pub object_to_modify: String,
    #[serde(default)]
    pub property_values: BTreeMap<String, RuleValue>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteObjectRule {
    pub object_to_delete: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddInterfaceRule {
    pub interface_api_name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifyInterfaceRule {
    pub interface_object_to_modify_parameter: String,
}

/// Source of a property value written by a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleValue {
    ParameterId(String),
    /// Static values, current user, current time, ... Not resolved further.
    Other(String),
}

impl<'de> Deserialize<'de> for RuleValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let RawUnion { tag, payload } = RawUnion::deserialize(deserializer)?;
        match tag.as_str() {
            "parameterId" => Ok(Self::ParameterId(
                serde_json::from_value(payload).map_err(D::Error::custom)?,
            )),
            _ => Ok(Self::Other(tag.clone())),
        }
    }
}

/// Declared type of an action parameter.
///
/// `<base>List` tags decode to [`ParameterType::List`] over the same base.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterType {
    Single(BaseParameterType),
    List(BaseParameterType),
    Unrecognized(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum BaseParameterType {
    Attachment,
    Boolean,
    Date,
    Decimal,
    Double,
    Geohash,
    Geoshape,
    GeotimeSeriesReference,
    Integer,
    InterfaceReference(InterfaceReference),
    Long,
    Marking,
    MediaReference,
    ObjectReference(ObjectReference),
    ObjectSetRid,
    ObjectTypeReference,
    String,
    Struct,
    TimeSeriesReference,
    Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectReference {
    pub object_type_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceReference {
    pub interface_type_rid: String,
}

impl BaseParameterType {
    /// The singular wire discriminator.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Attachment => "attachment",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::Decimal => "decimal",
            Self::Double => "double",
            Self::Geohash => "geohash",
            Self::Geoshape => "geoshape",
            Self::GeotimeSeriesReference => "geotimeSeriesReference",
            Self::Integer => "integer",
            Self::InterfaceReference(_) => "interfaceReference",
            Self::Long => "long",
            Self::Marking => "marking",
            Self::MediaReference => "mediaReference",
            Self::ObjectReference(_) => "objectReference",
            Self::ObjectSetRid => "objectSetRid",
            Self::ObjectTypeReference => "objectTypeReference",
            Self::String => "string",
            Self::Struct => "struct",
            Self::TimeSeriesReference => "timeSeriesReference",
            Self::Timestamp => "timestamp",
        }
    }

    /// Whether the IR defines a `<tag>List` form of this type.
    pub fn has_list_form(&self) -> bool {
        !matches!(
            self,
            Self::ObjectSetRid | Self::ObjectTypeReference | Self::TimeSeriesReference
        )
    }

    fn decode(tag: &str, payload: Value) -> Result<Option<Self>, serde_json::Error> {
        let base = match tag {
            "attachment" => Self::Attachment,
            "boolean" => Self::Boolean,
            "date" => Self::Date,
            "decimal" => Self::Decimal,
            "double" => Self::Double,
            "geohash" => Self::Geohash,
            "geoshape" => Self::Geoshape,
            "geotimeSeriesReference" => Self::GeotimeSeriesReference,
            "integer" => Self::Integer,
            "interfaceReference" => Self::InterfaceReference(serde_json::from_value(payload)?),
            "long" => Self::Long,
            "marking" => Self::Marking,
            "mediaReference" => Self::MediaReference,
            "objectReference" => Self::ObjectReference(serde_json::from_value(payload)?),
            "objectSetRid" => Self::ObjectSetRid,
            "objectTypeReference" => Self::ObjectTypeReference,
            "string" => Self::String,
            "struct" => Self::Struct,
            "timeSeriesReference" => Self::TimeSeriesReference,
            "timestamp" => Self::Timestamp,
            _ => return Ok(None),
        };
        Ok(Some(base))
    }
}

impl ParameterType {
    /// The wire discriminator of this parameter type.
    pub fn tag(&self) -> String {
        match self {
            Self::Single(base) => base.tag().to_string(),
            Self::List(base) => format!("{}List", base.tag()),
            Self::Unrecognized(tag) => tag.clone(),
        }
    }
}

impl<'de> Deserialize<'de> for ParameterType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let RawUnion { tag, payload } = RawUnion::deserialize(deserializer)?;
        let (base_tag, is_list) = match tag.strip_suffix("List") {
            Some(base) => (base, true),
            None => (tag.as_str(), false),
        };
        let base = BaseParameterType::decode(base_tag, payload).map_err(D::Error::custom)?;
        let parameter_type = match base {
            Some(base) if !is_list => Self::Single(base),
            Some(base) if base.has_list_form() => Self::List(base),
            _ => Self::Unrecognized(tag.clone()),
        };
        Ok(parameter_type)
    }
}

// -------------------------------------------------------------------------
// Interfaces and shared property types
// -------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedPropertyTypeBlock {
    pub shared_property_type: SharedPropertyType,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedPropertyType {
    pub api_name: String,
    pub display_metadata: PropertyDisplayMetadata,
    #[serde(rename = "type")]
    pub data_type: StorageType,
    #[serde(default)]
    pub type_classes: Vec<TypeClass>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceTypeBlock {
    pub interface_type: InterfaceType,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceType {
    pub api_name: String,
    pub display_metadata: InterfaceDisplayMetadata,
    #[serde(default)]
    pub properties_v2: BTreeMap<String, InterfaceProperty>,
    #[serde(default)]
    pub extends_interfaces: Vec<String>,
    #[serde(default)]
    pub links: Vec<InterfaceLinkType>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceDisplayMetadata {
    pub display_name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceProperty {
    pub shared_property_type: SharedPropertyType,
    #[serde(default)]
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceLinkType {
    pub metadata: InterfaceLinkMetadata,
    pub linked_entity_type_id: LinkedEntityTypeId,
    pub cardinality: InterfaceLinkCardinality,
    #[serde(default)]
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceLinkMetadata {
    pub api_name: String,
    pub display_name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InterfaceLinkCardinality {
    Single,
    Many,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkedEntityTypeId {
    InterfaceType(String),
    ObjectType(String),
    Unrecognized(String),
}

impl<'de> Deserialize<'de> for LinkedEntityTypeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let RawUnion { tag, payload } = RawUnion::deserialize(deserializer)?;
        let id = match tag.as_str() {
            "interfaceType" => {
                Self::InterfaceType(serde_json::from_value(payload).map_err(D::Error::custom)?)
            }
            "objectType" => {
                Self::ObjectType(serde_json::from_value(payload).map_err(D::Error::custom)?)
            }
            _ => Self::Unrecognized(tag.clone()),
        };
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_variants_decode() {
        let active: IrStatus = serde_json::from_value(json!({"type": "active", "active": {}})).unwrap();
        assert_eq!(active, IrStatus::Active);

        let deprecated: IrStatus = serde_json::from_value(json!({
            "type": "deprecated",
            "deprecated": { "message": "use name2", "deadline": "2026-01-01T00:00:00Z" }
        }))
        .unwrap();
        assert_eq!(
            deprecated,
            IrStatus::Deprecated(DeprecatedStatus {
                message: Some("use name2".into()),
                deadline: Some("2026-01-01T00:00:00Z".into()),
                replaced_by: None,
            })
        );

        let odd: IrStatus = serde_json::from_value(json!({"type": "retired"})).unwrap();
        assert_eq!(odd, IrStatus::Unrecognized("retired".into()));
        assert_eq!(odd.tag(), "retired");
    }

    #[test]
    fn storage_type_discards_sub_configuration() {
        let ty: StorageType = serde_json::from_value(json!({
            "type": "string",
            "string": { "isLongText": false, "supportsExactMatching": true }
        }))
        .unwrap();
        assert_eq!(ty, StorageType::String);
    }

    #[test]
    fn storage_type_nests_arrays_and_structs() {
        let ty: StorageType = serde_json::from_value(json!({
            "type": "array",
            "array": {
                "subtype": {
                    "type": "struct",
                    "struct": {
                        "structFields": [
                            { "apiName": "lat", "fieldType": { "type": "double", "double": {} } },
                            { "apiName": "tag", "fieldType": { "type": "string", "string": {} } }
                        ]
                    }
                }
            }
        }))
        .unwrap();
        let StorageType::Array(inner) = ty else {
            panic!("expected array, got {ty:?}");
        };
        let StorageType::Struct(fields) = *inner else {
            panic!("expected struct element");
        };
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].api_name, "lat");
        assert_eq!(fields[0].field_type, StorageType::Double);
    }

    #[test]
    fn parameter_list_tags_decode_over_their_base() {
        let list: ParameterType = serde_json::from_value(json!({
            "type": "objectReferenceList",
            "objectReferenceList": { "objectTypeId": "Restaurant" }
        }))
        .unwrap();
        assert_eq!(
            list,
            ParameterType::List(BaseParameterType::ObjectReference(ObjectReference {
                object_type_id: "Restaurant".into()
            }))
        );
        assert_eq!(list.tag(), "objectReferenceList");

        let shape: ParameterType =
            serde_json::from_value(json!({"type": "geoshapeList", "geoshapeList": {}})).unwrap();
        assert_eq!(shape, ParameterType::List(BaseParameterType::Geoshape));
    }

    #[test]
    fn parameter_list_of_list_less_base_is_unrecognized() {
        let ty: ParameterType =
            serde_json::from_value(json!({"type": "objectSetRidList"})).unwrap();
        assert_eq!(ty, ParameterType::Unrecognized("objectSetRidList".into()));
    }

    #[test]
    fn logic_rules_decode() {
        let rule: LogicRule = serde_json::from_value(json!({
            "type": "addObjectRule",
            "addObjectRule": {
                "objectTypeId": "Restaurant",
                "propertyValues": {
                    "name": { "type": "parameterId", "parameterId": "name" },
                    "createdAt": { "type": "currentTime", "currentTime": {} }
                },
                "structFieldValues": {}
            }
        }))
        .unwrap();
        let LogicRule::AddObject(add) = rule else {
            panic!("expected addObjectRule");
        };
        assert_eq!(add.object_type_id, "Restaurant");
        assert_eq!(
            add.property_values.get("name"),
            Some(&RuleValue::ParameterId("name".into()))
        );
        assert_eq!(
            add.property_values.get("createdAt"),
            Some(&RuleValue::Other("currentTime".into()))
        );

        let link: LogicRule =
            serde_json::from_value(json!({"type": "addLinkRule", "addLinkRule": {}})).unwrap();
        assert_eq!(link, LogicRule::AddLink);
        assert_eq!(link.tag(), "addLinkRule");
    }

    #[test]
    fn map_key_and_declared_api_name_are_independent() {
        let ir: OntologyIr = serde_json::from_value(json!({
            "objectTypes": {
                "registeredUnderAlias": {
                    "objectType": {
                        "apiName": "Restaurant",
                        "displayMetadata": {
                            "displayName": "Restaurant",
                            "icon": { "type": "blueprint", "blueprint": { "locator": "cube", "color": "#000" } }
                        },
                        "primaryKeys": ["id"],
                        "propertyTypes": {},
                        "titlePropertyTypeRid": "id",
                        "status": { "type": "active", "active": {} }
                    }
                }
            }
        }))
        .unwrap();
        let object = &ir.object_types["registeredUnderAlias"].object_type;
        assert_eq!(object.api_name, "Restaurant");
        assert!(!ir.object_types.contains_key("Restaurant"));
        assert!(ir.link_types.is_empty());
    }

    #[test]
    fn required_flag_reads_union_tag() {
        let validation: ParameterValidation = serde_json::from_value(json!({
            "conditionalOverrides": [],
            "defaultValidation": {
                "display": {},
                "validation": {
                    "allowedValues": { "type": "text", "text": {} },
                    "required": { "type": "notRequired", "notRequired": {} }
                }
            }
        }))
        .unwrap();
        assert!(!validation.is_required());
    }
}
