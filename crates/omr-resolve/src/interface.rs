//! # Interface and Shared Property Type Projection
//!
//! Shared property types resolve through the property-side type table.
//! Interfaces resolve their own properties and links, then fold in those of
//! every transitively extended interface (`allProperties`, `allLinks`,
//! `allExtendsInterfaces`). An interface's own members shadow inherited
//! members with the same key, and a nearer ancestor shadows a farther one.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use omr_core::ir::{
    InterfaceLinkCardinality, InterfaceType, LinkedEntityTypeId, OntologyIr, SharedPropertyType,
};
use omr_core::metadata::{
    Cardinality, InterfaceLinkTypeMetadata, InterfaceSharedPropertyType, InterfaceTypeMetadata,
    LinkedEntityApiName, SharedPropertyTypeMetadata,
};

use crate::catalog::Catalog;
use crate::error::{LinkError, Owner, ResolveError, ResolveResult, TypeError};
use crate::rid::{
    interface_link_rid, interface_property_rid, interface_type_rid, shared_property_type_rid,
};
use crate::types::project_property_type;

/// Resolve a top-level shared property type. Unlike object properties, an
/// unrepresentable type is an error here rather than an omission.
pub fn resolve_shared_property_type(
    spt: &SharedPropertyType,
) -> ResolveResult<SharedPropertyTypeMetadata> {
    let owner = Owner::SharedPropertyType(spt.api_name.clone());
    let type_error = |source| ResolveError::Type {
        owner: owner.clone(),
        element: "data type".to_string(),
        source,
    };
    let data_type = project_property_type(&spt.data_type)
        .map_err(type_error)?
        .ok_or_else(|| {
            type_error(TypeError::Unsupported {
                tag: spt.data_type.tag().to_string(),
            })
        })?;

    Ok(SharedPropertyTypeMetadata {
        rid: shared_property_type_rid(&spt.api_name),
        api_name: spt.api_name.clone(),
        display_name: spt.display_metadata.display_name.clone(),
        description: spt.display_metadata.description.clone(),
        data_type,
    })
}

struct Members {
    properties: BTreeMap<String, InterfaceSharedPropertyType>,
    links: BTreeMap<String, InterfaceLinkTypeMetadata>,
}

/// Resolve every interface in `ir`, in key order.
pub fn resolve_interfaces(
    ir: &OntologyIr,
    catalog: &Catalog<'_>,
) -> ResolveResult<Vec<InterfaceTypeMetadata>> {
    let mut own = BTreeMap::new();
    for interface in catalog.interfaces() {
        own.insert(interface.api_name.as_str(), own_members(interface, catalog)?);
    }
    let implementers = catalog.implementers();

    let mut resolved = Vec::with_capacity(ir.interface_types.len());
    for block in ir.interface_types.values() {
        let interface = &block.interface_type;
        let owner = Owner::InterfaceType(interface.api_name.clone());
        let Some(Members { properties, links }) = own.get(interface.api_name.as_str()) else {
            return Err(ResolveError::dangling(&owner, "interface type", &interface.api_name));
        };
        let ancestors = ancestors(interface, catalog, &owner)?;

        // Farthest first, so nearer ancestors and then the interface itself
        // shadow inherited members with the same key.
        let mut all_properties = BTreeMap::new();
        let mut all_links = BTreeMap::new();
        for ancestor in ancestors.iter().rev() {
            if let Some(inherited) = own.get(ancestor) {
                all_properties.extend(inherited.properties.clone());
                all_links.extend(inherited.links.clone());
            }
        }
        all_properties.extend(properties.clone());
        all_links.extend(links.clone());

        let mut all_extends_interfaces: Vec<String> =
            ancestors.into_iter().map(str::to_string).collect();
        all_extends_interfaces.sort();

        let implemented_by_object_types = implementers
            .get(interface.api_name.as_str())
            .cloned()
            .unwrap_or_default();

        tracing::debug!(
            interface = %interface.api_name,
            properties = all_properties.len(),
            links = all_links.len(),
            "resolved interface type"
        );

        resolved.push(InterfaceTypeMetadata {
            rid: interface_type_rid(&interface.api_name),
            api_name: interface.api_name.clone(),
            display_name: interface.display_metadata.display_name.clone(),
            description: interface.display_metadata.description.clone(),
            properties: properties.clone(),
            all_properties,
            extends_interfaces: interface.extends_interfaces.clone(),
            all_extends_interfaces,
            implemented_by_object_types,
            links: links.clone(),
            all_links,
        });
    }
    Ok(resolved)
}

fn own_members(interface: &InterfaceType, catalog: &Catalog<'_>) -> ResolveResult<Members> {
    let owner = Owner::InterfaceType(interface.api_name.clone());

    let mut properties = BTreeMap::new();
    for (key, property) in &interface.properties_v2 {
        let spt = &property.shared_property_type;
        let projected =
            project_property_type(&spt.data_type).map_err(|source| ResolveError::Type {
                owner: owner.clone(),
                element: format!("property `{key}`"),
                source,
            })?;
        let Some(data_type) = projected else {
            tracing::warn!(
                interface = %interface.api_name,
                property = %key,
                storage = spt.data_type.tag(),
                "omitting interface property with no client-facing type"
            );
            continue;
        };
        properties.insert(
            key.clone(),
            InterfaceSharedPropertyType {
                rid: interface_property_rid(&interface.api_name, &spt.api_name),
                api_name: spt.api_name.clone(),
                display_name: spt.display_metadata.display_name.clone(),
                description: spt.display_metadata.description.clone(),
                data_type,
                required: property.required,
            },
        );
    }

    let mut links = BTreeMap::new();
    for link in &interface.links {
        let api_name = &link.metadata.api_name;
        let link_error = |source| ResolveError::Link {
            owner: owner.clone(),
            source,
        };
        let target = match &link.linked_entity_type_id {
            LinkedEntityTypeId::InterfaceType(target) => target,
            LinkedEntityTypeId::ObjectType(_) => {
                return Err(link_error(LinkError::ObjectTypeTarget {
                    link: api_name.clone(),
                }))
            }
            LinkedEntityTypeId::Unrecognized(tag) => {
                return Err(link_error(LinkError::UnrecognizedTarget {
                    link: api_name.clone(),
                    tag: tag.clone(),
                }))
            }
        };
        if catalog.interface(target).is_none() {
            return Err(ResolveError::dangling(&owner, "interface type", target));
        }
        let cardinality = match link.cardinality {
            InterfaceLinkCardinality::Single => Cardinality::One,
            InterfaceLinkCardinality::Many => Cardinality::Many,
        };
        links.insert(
            api_name.clone(),
            InterfaceLinkTypeMetadata {
                rid: interface_link_rid(target, api_name),
                api_name: api_name.clone(),
                display_name: link.metadata.display_name.clone(),
                description: link.metadata.description.clone(),
                linked_entity_api_name: LinkedEntityApiName::InterfaceType {
                    api_name: target.clone(),
                },
                cardinality,
                required: link.required,
            },
        );
    }

    Ok(Members { properties, links })
}

/// Every interface `interface` transitively extends, nearest first.
///
/// Breadth-first over `extendsInterfaces` in declaration order; an ancestor
/// reachable along several paths is listed at its shortest distance.
fn ancestors<'a>(
    interface: &InterfaceType,
    catalog: &Catalog<'a>,
    owner: &Owner,
) -> ResolveResult<Vec<&'a str>> {
    let mut seen = BTreeSet::new();
    let mut order = Vec::new();
    // (interface to visit, interface that extends it)
    let mut pending: VecDeque<(&str, &str)> = interface
        .extends_interfaces
        .iter()
        .map(|parent| (parent.as_str(), interface.api_name.as_str()))
        .collect();

    while let Some((name, via)) = pending.pop_front() {
        if name == interface.api_name {
            return Err(ResolveError::InterfaceCycle {
                owner: owner.clone(),
                through: via.to_string(),
            });
        }
        let Some(parent) = catalog.interface(name) else {
            return Err(ResolveError::dangling(owner, "interface type", name));
        };
        if seen.insert(parent.api_name.as_str()) {
            order.push(parent.api_name.as_str());
            pending.extend(
                parent
                    .extends_interfaces
                    .iter()
                    .map(|grandparent| (grandparent.as_str(), parent.api_name.as_str())),
            );
        }
    }
    Ok(order)
}
