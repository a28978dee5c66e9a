//! Property-side type table.
//!
//! Storage types map onto the client-facing property vocabulary. Primitives
//! pass through, `geohash` becomes `geopoint`, arrays recurse on their
//! element type, and structs get per-field rids. Storage tags the client
//! vocabulary cannot express map to `None`; the caller decides whether that
//! drops the property or fails.

use omr_core::ir::{StorageType, StructField};
use omr_core::metadata::{PropertyDataType, StructFieldType};
use serde::Serialize;

use crate::error::TypeError;
use crate::rid::{struct_field_rid, struct_rid_base};

/// Project a storage type.
///
/// Returns `Ok(None)` for recognized but unrepresentable storage types
/// (`cipherText`, `mediaReference`, `vector`, `geotimeSeriesReference`,
/// `experimentalTimeDependentV1`, and arrays of those).
///
/// # Errors
///
/// [`TypeError::UnknownTag`] for tags outside the storage vocabulary and
/// [`TypeError::UnsupportedStructField`] when a struct field is
/// unrepresentable.
pub fn project_property_type(ty: &StorageType) -> Result<Option<PropertyDataType>, TypeError> {
    let projected = match ty {
        StorageType::Array(element) => match project_property_type(element)? {
            Some(sub_type) => PropertyDataType::Array {
                sub_type: Box::new(sub_type),
            },
            None => return Ok(None),
        },
        StorageType::Attachment => PropertyDataType::Attachment,
        StorageType::Boolean => PropertyDataType::Boolean,
        StorageType::Byte => PropertyDataType::Byte,
        StorageType::Date => PropertyDataType::Date,
        StorageType::Decimal => PropertyDataType::Decimal,
        StorageType::Double => PropertyDataType::Double,
        StorageType::Float => PropertyDataType::Float,
        StorageType::Geohash => PropertyDataType::Geopoint,
        StorageType::Geoshape => PropertyDataType::Geoshape,
        StorageType::Integer => PropertyDataType::Integer,
        StorageType::Long => PropertyDataType::Long,
        StorageType::Marking => PropertyDataType::Marking,
        StorageType::Short => PropertyDataType::Short,
        StorageType::String => PropertyDataType::String,
        StorageType::Struct(fields) => project_struct(fields)?,
        StorageType::Timestamp => PropertyDataType::Timestamp,
        StorageType::CipherText
        | StorageType::ExperimentalTimeDependentV1
        | StorageType::GeotimeSeriesReference
        | StorageType::MediaReference
        | StorageType::Vector => return Ok(None),
        StorageType::Unrecognized(tag) => {
            return Err(TypeError::UnknownTag { tag: tag.clone() })
        }
    };
    Ok(Some(projected))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FieldFingerprint<'a> {
    api_name: &'a str,
    data_type: &'a PropertyDataType,
}

fn project_struct(fields: &[StructField]) -> Result<PropertyDataType, TypeError> {
    let mut resolved = Vec::with_capacity(fields.len());
    for field in fields {
        let data_type =
            project_property_type(&field.field_type)?.ok_or_else(|| {
                TypeError::UnsupportedStructField {
                    field: field.api_name.clone(),
                    tag: field.field_type.tag().to_string(),
                }
            })?;
        resolved.push((field.api_name.as_str(), data_type));
    }

    let fingerprint: Vec<FieldFingerprint<'_>> = resolved
        .iter()
        .map(|(api_name, data_type)| FieldFingerprint {
            api_name: *api_name,
            data_type,
        })
        .collect();
    let base = struct_rid_base(&fingerprint)?;

    let struct_field_types = resolved
        .into_iter()
        .map(|(api_name, data_type)| StructFieldType {
            api_name: api_name.to_string(),
            rid: struct_field_rid(&base, api_name),
            data_type,
        })
        .collect();
    Ok(PropertyDataType::Struct { struct_field_types })
}
