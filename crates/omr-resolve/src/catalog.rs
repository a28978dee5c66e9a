//! Lookup tables over one IR document.
//!
//! Cross-references in the IR name object types and interfaces by their
//! declared API name, which need not equal the map key they were registered
//! under. The catalog indexes the declared names once per resolution.

use std::collections::BTreeMap;

use omr_core::ir::{InterfaceType, ObjectType, OntologyIr};

#[derive(Debug)]
pub struct Catalog<'a> {
    objects: BTreeMap<&'a str, &'a ObjectType>,
    interfaces: BTreeMap<&'a str, &'a InterfaceType>,
}

impl<'a> Catalog<'a> {
    /// Index `ir`. When two entries declare the same API name the first in
    /// key order wins; the duplicate surfaces later as a rid collision.
    pub fn new(ir: &'a OntologyIr) -> Self {
        let mut objects = BTreeMap::new();
        for block in ir.object_types.values() {
            objects
                .entry(block.object_type.api_name.as_str())
                .or_insert(&block.object_type);
        }
        let mut interfaces = BTreeMap::new();
        for block in ir.interface_types.values() {
            interfaces
                .entry(block.interface_type.api_name.as_str())
                .or_insert(&block.interface_type);
        }
        Self {
            objects,
            interfaces,
        }
    }

    pub fn object(&self, api_name: &str) -> Option<&'a ObjectType> {
        self.objects.get(api_name).copied()
    }

    pub fn interface(&self, api_name: &str) -> Option<&'a InterfaceType> {
        self.interfaces.get(api_name).copied()
    }

    pub fn interfaces(&self) -> impl Iterator<Item = &'a InterfaceType> + '_ {
        self.interfaces.values().copied()
    }

    pub fn has_property(&self, object: &str, property: &str) -> bool {
        self.object(object)
            .is_some_and(|object| object.property_types.contains_key(property))
    }

    /// Interface API name → object types implementing it, sorted.
    pub fn implementers(&self) -> BTreeMap<&'a str, Vec<String>> {
        let mut implementers: BTreeMap<&'a str, Vec<String>> = BTreeMap::new();
        for object in self.objects.values().copied() {
            for implementation in &object.implements_interfaces2 {
                implementers
                    .entry(implementation.interface_type_api_name.as_str())
                    .or_default()
                    .push(object.api_name.clone());
            }
        }
        for names in implementers.values_mut() {
            names.sort();
            names.dedup();
        }
        implementers
    }
}
