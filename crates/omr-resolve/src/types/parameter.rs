//! Parameter-side type table.
//!
//! Independent of the property-side table: `geohash` stays `geohash`,
//! `geoshape` stays `geoshape`, and list forms wrap their base in `array`.
//! Entity references enrich into `{type: "object", objectApiName,
//! objectTypeApiName}`; checking that the referenced object type exists is
//! left to the action projector, which holds the catalog.

use omr_core::ir::{BaseParameterType, ParameterType};
use omr_core::metadata::ActionParameterType;

use crate::error::TypeError;

/// Project a declared parameter type.
///
/// # Errors
///
/// [`TypeError::Unsupported`] for `decimal`, `struct`, interface references,
/// and time series references (single or list), naming the declared tag.
/// [`TypeError::UnknownTag`] for tags outside the parameter vocabulary.
pub fn project_parameter_type(ty: &ParameterType) -> Result<ActionParameterType, TypeError> {
    let unsupported = || TypeError::Unsupported { tag: ty.tag() };
    match ty {
        ParameterType::Single(base) => project_base(base).ok_or_else(unsupported),
        ParameterType::List(base) => {
            let sub_type = project_base(base).ok_or_else(unsupported)?;
            Ok(ActionParameterType::Array {
                sub_type: Box::new(sub_type),
            })
        }
        ParameterType::Unrecognized(tag) => Err(TypeError::UnknownTag { tag: tag.clone() }),
    }
}

fn project_base(base: &BaseParameterType) -> Option<ActionParameterType> {
    let projected = match base {
        BaseParameterType::Attachment => ActionParameterType::Attachment,
        BaseParameterType::Boolean => ActionParameterType::Boolean,
        BaseParameterType::Date => ActionParameterType::Date,
        BaseParameterType::Double => ActionParameterType::Double,
        BaseParameterType::Geohash => ActionParameterType::Geohash,
        BaseParameterType::Geoshape => ActionParameterType::Geoshape,
        BaseParameterType::Integer => ActionParameterType::Integer,
        BaseParameterType::Long => ActionParameterType::Long,
        BaseParameterType::Marking => ActionParameterType::Marking,
        BaseParameterType::MediaReference => ActionParameterType::MediaReference,
        BaseParameterType::ObjectReference(reference) => ActionParameterType::Object {
            object_api_name: reference.object_type_id.clone(),
            object_type_api_name: reference.object_type_id.clone(),
        },
        BaseParameterType::ObjectSetRid => ActionParameterType::ObjectSet,
        BaseParameterType::ObjectTypeReference => ActionParameterType::ObjectType,
        BaseParameterType::String => ActionParameterType::String,
        BaseParameterType::Timestamp => ActionParameterType::Timestamp,
        BaseParameterType::Decimal
        | BaseParameterType::GeotimeSeriesReference
        | BaseParameterType::InterfaceReference(_)
        | BaseParameterType::Struct
        | BaseParameterType::TimeSeriesReference => return None,
    };
    Some(projected)
}
