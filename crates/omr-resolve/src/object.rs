//! Object type projection.
//!
//! Combines the primary key, status, and type projectors over one object
//! type, flattens its icon, and attaches the link views the relationship
//! resolver produced for it.

use std::collections::BTreeMap;

use omr_core::ir::{Icon, ObjectType};
use omr_core::metadata::{
    InterfaceImplementationMetadata, LinkTypeSide, ObjectTypeFullMetadata, ObjectTypeMetadata,
    PropertyMetadata, ResolvedIcon, Visibility,
};

use crate::catalog::Catalog;
use crate::error::{Owner, ResolveError, ResolveResult, TypeError};
use crate::options::ResolveOptions;
use crate::primary_key::single_primary_key;
use crate::rid::{object_type_rid, property_rid};
use crate::status::{project_release_status, project_tagged_status};
use crate::types::project_property_type;

/// Resolve one object type. `link_types` are the views attached to it,
/// already in relationship id order.
pub fn resolve_object(
    object: &ObjectType,
    catalog: &Catalog<'_>,
    options: &ResolveOptions,
    link_types: Vec<LinkTypeSide>,
) -> ResolveResult<ObjectTypeFullMetadata> {
    let owner = Owner::ObjectType(object.api_name.clone());
    let display = &object.display_metadata;

    let icon = match &display.icon {
        Icon::Blueprint(blueprint) => ResolvedIcon::Blueprint {
            name: blueprint.locator.clone(),
            color: blueprint.color.clone(),
        },
        Icon::Unrecognized(tag) => {
            return Err(ResolveError::UnsupportedIcon {
                owner,
                tag: tag.clone(),
            })
        }
    };

    let primary_key =
        single_primary_key(&object.primary_keys).map_err(|source| ResolveError::PrimaryKey {
            owner: owner.clone(),
            source,
        })?;
    for key in [primary_key, object.title_property_type_rid.as_str()] {
        if !object.property_types.contains_key(key) {
            return Err(ResolveError::dangling(
                &owner,
                "property",
                &format!("{}.{key}", object.api_name),
            ));
        }
    }

    let status = project_release_status(&object.status).map_err(|source| ResolveError::Status {
        owner: owner.clone(),
        source,
    })?;

    let mut properties = BTreeMap::new();
    for (key, property) in &object.property_types {
        let projected =
            project_property_type(&property.data_type).map_err(|source| ResolveError::Type {
                owner: owner.clone(),
                element: format!("property `{key}`"),
                source,
            })?;
        let Some(data_type) = projected else {
            tracing::warn!(
                object = %object.api_name,
                property = %key,
                storage = property.data_type.tag(),
                "omitting property with no client-facing type"
            );
            continue;
        };
        properties.insert(
            key.clone(),
            PropertyMetadata {
                display_name: property.display_metadata.display_name.clone(),
                rid: property_rid(&object.api_name, key),
                status: project_tagged_status(&property.status),
                description: property.display_metadata.description.clone(),
                visibility: project_visibility(property.display_metadata.visibility.as_deref()),
                data_type,
                type_classes: property.type_classes.clone(),
            },
        );
    }
    // The key and title must survive projection, not merely be declared.
    for (element, key) in [
        ("primary key", primary_key),
        ("title property", object.title_property_type_rid.as_str()),
    ] {
        if !properties.contains_key(key) {
            let tag = object
                .property_types
                .get(key)
                .map_or("unknown", |property| property.data_type.tag());
            return Err(ResolveError::Type {
                owner,
                element: format!("{element} `{key}`"),
                source: TypeError::Unsupported {
                    tag: tag.to_string(),
                },
            });
        }
    }

    let mut implements_interfaces2 = BTreeMap::new();
    let mut shared_property_type_mapping = BTreeMap::new();
    for implementation in &object.implements_interfaces2 {
        let interface = implementation.interface_type_api_name.as_str();
        if catalog.interface(interface).is_none() {
            return Err(ResolveError::dangling(&owner, "interface type", interface));
        }
        let mut mapping = BTreeMap::new();
        for (spt, implementing) in &implementation.properties {
            let property = &implementing.property_type_rid;
            if !object.property_types.contains_key(property) {
                return Err(ResolveError::dangling(
                    &owner,
                    "property",
                    &format!("{}.{property}", object.api_name),
                ));
            }
            mapping.insert(spt.clone(), property.clone());
            shared_property_type_mapping.insert(spt.clone(), property.clone());
        }
        implements_interfaces2.insert(
            interface.to_string(),
            InterfaceImplementationMetadata {
                properties: mapping,
            },
        );
    }

    tracing::debug!(
        object = %object.api_name,
        properties = properties.len(),
        links = link_types.len(),
        "resolved object type"
    );

    Ok(ObjectTypeFullMetadata {
        object_type: ObjectTypeMetadata {
            api_name: object.api_name.clone(),
            description: display.description.clone(),
            display_name: display.display_name.clone(),
            plural_display_name: options
                .plural_display_names
                .project(&display.display_name, display.plural_display_name.as_deref()),
            icon,
            primary_key: primary_key.to_string(),
            title_property: object.title_property_type_rid.clone(),
            properties,
            rid: object_type_rid(&object.api_name),
            status,
        },
        link_types,
        implements_interfaces: Vec::new(),
        implements_interfaces2,
        shared_property_type_mapping,
    })
}

/// `NORMAL` unless the IR says `PROMINENT` or `HIDDEN`.
fn project_visibility(visibility: Option<&str>) -> Visibility {
    match visibility {
        Some("PROMINENT") => Visibility::Prominent,
        Some("HIDDEN") => Visibility::Hidden,
        _ => Visibility::Normal,
    }
}
