//! # Metadata Assembler
//!
//! The public entry point. Composes the projectors over a whole IR document
//! and returns the resolved document, or the first violation encountered.
//!
//! ## Order
//!
//! 1. Shared property types.
//! 2. Interfaces (own members, then inherited closure).
//! 3. Relationships, sorted by id, distributed as views onto their endpoints.
//! 4. Object types, each picking up its views.
//! 5. Action types.
//!
//! Every synthesized rid is claimed in a per-call [`RidRegistry`]; a second
//! claim fails the whole resolution.

use std::collections::BTreeMap;

use omr_core::ir::{LinkType, OntologyIr};
use omr_core::metadata::{LinkTypeSide, ResolvedOntology};

use crate::action::resolve_action;
use crate::catalog::Catalog;
use crate::error::{Owner, ResolveResult};
use crate::interface::{resolve_interfaces, resolve_shared_property_type};
use crate::link::resolve_link;
use crate::object::resolve_object;
use crate::options::ResolveOptions;
use crate::rid::RidRegistry;

/// Resolve an IR document.
///
/// Pure and synchronous: the IR is not modified and no state outlives the
/// call, so independent documents may be resolved concurrently.
///
/// # Errors
///
/// Returns the first [`crate::ResolveError`] encountered. No partial
/// document is ever returned.
pub fn resolve_ontology(ir: &OntologyIr, options: &ResolveOptions) -> ResolveResult<ResolvedOntology> {
    let span = tracing::info_span!("resolve_ontology");
    let _guard = span.enter();

    let catalog = Catalog::new(ir);
    let mut rids = RidRegistry::new();

    let mut shared_property_types = BTreeMap::new();
    for block in ir.shared_property_types.values() {
        let spt = &block.shared_property_type;
        let resolved = resolve_shared_property_type(spt)?;
        rids.claim(&resolved.rid, &Owner::SharedPropertyType(spt.api_name.clone()))?;
        shared_property_types.insert(resolved.api_name.clone(), resolved);
    }

    let mut interface_types = BTreeMap::new();
    for resolved in resolve_interfaces(ir, &catalog)? {
        let owner = Owner::InterfaceType(resolved.api_name.clone());
        rids.claim(&resolved.rid, &owner)?;
        for property in resolved.properties.values() {
            rids.claim(&property.rid, &owner)?;
        }
        interface_types.insert(resolved.api_name.clone(), resolved);
    }

    let mut links: Vec<&LinkType> = ir.link_types.values().map(|block| &block.link_type).collect();
    links.sort_by(|a, b| a.id.cmp(&b.id));
    let mut views: BTreeMap<String, Vec<LinkTypeSide>> = BTreeMap::new();
    for link in links {
        let resolved = resolve_link(link, &catalog)?;
        rids.claim(&resolved.rid, &Owner::LinkType(resolved.id.clone()))?;
        for (attached_to, view) in resolved.views {
            views.entry(attached_to).or_default().push(view);
        }
    }

    let mut object_types = BTreeMap::new();
    for block in ir.object_types.values() {
        let object = &block.object_type;
        let attached = views.remove(&object.api_name).unwrap_or_default();
        let resolved = resolve_object(object, &catalog, options, attached)?;
        let owner = Owner::ObjectType(object.api_name.clone());
        rids.claim(&resolved.object_type.rid, &owner)?;
        for property in resolved.object_type.properties.values() {
            rids.claim(&property.rid, &owner)?;
        }
        object_types.insert(object.api_name.clone(), resolved);
    }

    let mut action_types = BTreeMap::new();
    for block in ir.action_types.values() {
        let resolved = resolve_action(&block.action_type, &catalog)?;
        rids.claim(&resolved.rid, &Owner::ActionType(resolved.api_name.clone()))?;
        action_types.insert(resolved.api_name.clone(), resolved);
    }

    tracing::info!(
        object_types = object_types.len(),
        action_types = action_types.len(),
        interface_types = interface_types.len(),
        shared_property_types = shared_property_types.len(),
        rids = rids.len(),
        "resolved ontology"
    );

    Ok(ResolvedOntology {
        ontology: options.ontology.clone(),
        object_types,
        action_types,
        interface_types,
        shared_property_types,
        query_types: BTreeMap::new(),
        value_types: BTreeMap::new(),
    })
}
