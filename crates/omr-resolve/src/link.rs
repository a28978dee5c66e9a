//! # Relationship Resolver
//!
//! A relationship is declared once in the IR, from one side. Resolution
//! expands it into two independent views, one attached to each endpoint:
//!
//! ```text
//! oneToMany  A ──R──< B      A.linkTypes += { B, MANY }
//!                            B.linkTypes += { A, ONE, foreignKey }
//! manyToMany A >─R──< B      A.linkTypes += { B, MANY }
//!                            B.linkTypes += { A, MANY }
//! ```
//!
//! Both views carry the same rid so they remain correlatable.

use omr_core::ir::{LinkDefinition, LinkMetadata, LinkType, ManyToManyLink, OneToManyLink};
use omr_core::metadata::{Cardinality, LinkTypeSide, ReleaseStatus};

use crate::catalog::Catalog;
use crate::error::{LinkError, Owner, ResolveError, ResolveResult, TypeError};
use crate::rid::link_type_rid;
use crate::status::project_release_status;
use crate::types::project_property_type;

/// The two views of one relationship.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLink {
    pub id: String,
    pub rid: String,
    /// `(object type the view is attached to, view)`. For one-to-many the
    /// one-side view comes first; for many-to-many side A does.
    pub views: [(String, LinkTypeSide); 2],
}

/// Resolve one relationship declaration.
///
/// # Errors
///
/// Fails when the relationship's status has no label, an endpoint or mapped
/// property does not exist, the mapping does not have exactly one entry, or
/// the mapping endpoints disagree with the declared sides.
pub fn resolve_link(link: &LinkType, catalog: &Catalog<'_>) -> ResolveResult<ResolvedLink> {
    let owner = Owner::LinkType(link.id.clone());
    let status = project_release_status(&link.status).map_err(|source| ResolveError::Status {
        owner: owner.clone(),
        source,
    })?;

    let resolved = match &link.definition {
        LinkDefinition::OneToMany(definition) => {
            resolve_one_to_many(&link.id, definition, status, catalog, &owner)?
        }
        LinkDefinition::ManyToMany(definition) => {
            resolve_many_to_many(&link.id, definition, status, catalog, &owner)?
        }
        LinkDefinition::Unrecognized(tag) => {
            return Err(ResolveError::Link {
                owner,
                source: LinkError::UnrecognizedDefinition { tag: tag.clone() },
            })
        }
    };
    tracing::debug!(link = %link.id, rid = %resolved.rid, "resolved link type");
    Ok(resolved)
}

fn resolve_one_to_many(
    id: &str,
    definition: &OneToManyLink,
    status: ReleaseStatus,
    catalog: &Catalog<'_>,
    owner: &Owner,
) -> ResolveResult<ResolvedLink> {
    let one = definition.object_type_rid_one_side.as_str();
    let many = definition.object_type_rid_many_side.as_str();
    require_object(catalog, owner, one)?;
    require_object(catalog, owner, many)?;

    let mapping = match definition
        .one_side_primary_key_to_many_side_property_mapping
        .as_slice()
    {
        [mapping] => mapping,
        other => {
            return Err(ResolveError::Link {
                owner: owner.clone(),
                source: LinkError::MappingCount { found: other.len() },
            })
        }
    };
    if mapping.from.object != one {
        return Err(endpoint_mismatch(owner, "source", one, &mapping.from.object));
    }
    if mapping.to.object != many {
        return Err(endpoint_mismatch(owner, "target", many, &mapping.to.object));
    }
    require_property(catalog, owner, one, &mapping.from.api_name)?;
    require_property(catalog, owner, many, &mapping.to.api_name)?;

    let rid = link_type_rid(one, id, many);
    let one_view = view(
        &definition.many_to_one_link_metadata,
        status,
        many,
        Cardinality::Many,
        &rid,
        None,
    );
    let many_view = view(
        &definition.one_to_many_link_metadata,
        status,
        one,
        Cardinality::One,
        &rid,
        Some(mapping.to.api_name.clone()),
    );
    Ok(ResolvedLink {
        id: id.to_string(),
        rid,
        views: [(one.to_string(), one_view), (many.to_string(), many_view)],
    })
}

fn resolve_many_to_many(
    id: &str,
    definition: &ManyToManyLink,
    status: ReleaseStatus,
    catalog: &Catalog<'_>,
    owner: &Owner,
) -> ResolveResult<ResolvedLink> {
    let a = definition.object_type_rid_a.as_str();
    let b = definition.object_type_rid_b.as_str();
    require_object(catalog, owner, a)?;
    require_object(catalog, owner, b)?;

    let rid = link_type_rid(a, id, b);
    let a_view = view(
        &definition.object_type_a_to_b_link_metadata,
        status,
        b,
        Cardinality::Many,
        &rid,
        None,
    );
    let b_view = view(
        &definition.object_type_b_to_a_link_metadata,
        status,
        a,
        Cardinality::Many,
        &rid,
        None,
    );
    Ok(ResolvedLink {
        id: id.to_string(),
        rid,
        views: [(a.to_string(), a_view), (b.to_string(), b_view)],
    })
}

fn view(
    metadata: &LinkMetadata,
    status: ReleaseStatus,
    target: &str,
    cardinality: Cardinality,
    rid: &str,
    foreign_key: Option<String>,
) -> LinkTypeSide {
    LinkTypeSide {
        api_name: metadata.api_name.clone().unwrap_or_default(),
        display_name: metadata.display_metadata.display_name.clone(),
        status,
        object_type_api_name: target.to_string(),
        cardinality,
        link_type_rid: rid.to_string(),
        foreign_key_property_api_name: foreign_key,
    }
}

fn require_object(catalog: &Catalog<'_>, owner: &Owner, object: &str) -> ResolveResult<()> {
    match catalog.object(object) {
        Some(_) => Ok(()),
        None => Err(ResolveError::dangling(owner, "object type", object)),
    }
}

/// The mapped property must exist and survive projection, so the resolved
/// views never name a property missing from the endpoint's `properties`.
fn require_property(
    catalog: &Catalog<'_>,
    owner: &Owner,
    object: &str,
    property: &str,
) -> ResolveResult<()> {
    let Some(declared) = catalog
        .object(object)
        .and_then(|object| object.property_types.get(property))
    else {
        return Err(ResolveError::dangling(
            owner,
            "property",
            &format!("{object}.{property}"),
        ));
    };
    let element = format!("mapped property `{object}.{property}`");
    match project_property_type(&declared.data_type) {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(ResolveError::Type {
            owner: owner.clone(),
            element,
            source: TypeError::Unsupported {
                tag: declared.data_type.tag().to_string(),
            },
        }),
        Err(source) => Err(ResolveError::Type {
            owner: owner.clone(),
            element,
            source,
        }),
    }
}

fn endpoint_mismatch(owner: &Owner, side: &'static str, expected: &str, found: &str) -> ResolveError {
    ResolveError::Link {
        owner: owner.clone(),
        source: LinkError::MappingEndpoint {
            side,
            expected: expected.to_string(),
            found: found.to_string(),
        },
    }
}
