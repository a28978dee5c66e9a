//! # End-to-End Resolution Tests
//!
//! Resolves whole IR documents through the public entry point and checks the
//! observable properties of the output document: bidirectional link views,
//! type-table projection, the operations summary, deterministic bytes, and
//! rid stability under unrelated edits.

use omr_core::ir::OntologyIr;
use omr_core::metadata::{
    ActionOperation, ActionParameterType, Cardinality, PropertyDataType, ReleaseStatus,
};
use omr_resolve::{resolve_ontology, PrimaryKeyError, ResolveError, ResolveOptions};
use proptest::prelude::*;
use serde_json::{json, Map, Value};

const RESTAURANT_IR: &str = include_str!("fixtures/restaurant_ir.json");

fn restaurant_ir() -> OntologyIr {
    serde_json::from_str(RESTAURANT_IR).expect("fixture should parse")
}

fn resolve(ir: &OntologyIr) -> Result<omr_core::ResolvedOntology, ResolveError> {
    resolve_ontology(ir, &ResolveOptions::default())
}

fn object(api_name: &str, properties: &[(&str, &str)]) -> Value {
    let mut property_types = Map::new();
    for &(name, tag) in properties {
        property_types.insert(
            name.to_string(),
            json!({
                "apiName": name,
                "displayMetadata": { "displayName": name },
                "type": { "type": tag, tag: {} },
                "status": { "type": "active", "active": {} }
            }),
        );
    }
    let primary_key = properties[0].0;
    json!({
        "objectType": {
            "apiName": api_name,
            "displayMetadata": {
                "displayName": api_name,
                "icon": { "type": "blueprint", "blueprint": { "locator": "cube", "color": "#4C90F0" } }
            },
            "primaryKeys": [primary_key],
            "propertyTypes": property_types,
            "titlePropertyTypeRid": primary_key,
            "status": { "type": "active", "active": {} }
        }
    })
}

fn one_to_many(id: &str, one: &str, many: &str, from: &str, to: &str) -> Value {
    let side = |api_name: &str, display_name: &str| {
        json!({ "apiName": api_name, "displayMetadata": { "displayName": display_name } })
    };
    json!({
        "linkType": {
            "id": id,
            "definition": {
                "type": "oneToMany",
                "oneToMany": {
                    "objectTypeRidOneSide": one,
                    "objectTypeRidManySide": many,
                    "oneToManyLinkMetadata": side("parent", one),
                    "manyToOneLinkMetadata": side("children", many),
                    "oneSidePrimaryKeyToManySidePropertyMapping": [
                        { "from": { "apiName": from, "object": one }, "to": { "apiName": to, "object": many } }
                    ]
                }
            },
            "status": { "type": "active", "active": {} }
        }
    })
}

fn ab_document() -> Value {
    json!({
        "objectTypes": {
            "A": object("A", &[("pk", "string")]),
            "B": object("B", &[("bId", "string"), ("aRef", "string")])
        },
        "linkTypes": { "R": one_to_many("R", "A", "B", "pk", "aRef") }
    })
}

#[test]
fn one_to_many_link_is_visible_from_both_endpoints() {
    let ir: OntologyIr = serde_json::from_value(ab_document()).unwrap();
    let resolved = resolve(&ir).unwrap();

    let a_links = &resolved.object_types["A"].link_types;
    assert_eq!(a_links.len(), 1);
    assert_eq!(a_links[0].cardinality, Cardinality::Many);
    assert_eq!(a_links[0].object_type_api_name, "B");
    assert_eq!(a_links[0].link_type_rid, "ri.A.R.B");
    assert_eq!(a_links[0].foreign_key_property_api_name, None);

    let b_links = &resolved.object_types["B"].link_types;
    assert_eq!(b_links.len(), 1);
    assert_eq!(b_links[0].cardinality, Cardinality::One);
    assert_eq!(b_links[0].object_type_api_name, "A");
    assert_eq!(b_links[0].link_type_rid, "ri.A.R.B");
    assert_eq!(b_links[0].foreign_key_property_api_name.as_deref(), Some("aRef"));
}

#[test]
fn restaurant_fixture_resolves() {
    let resolved = resolve(&restaurant_ir()).unwrap();

    let restaurant = &resolved.object_types["Dc3Restaurant"];
    assert_eq!(restaurant.object_type.rid, "ri.Dc3Restaurant");
    assert_eq!(restaurant.object_type.display_name, "[DC3] Restaurant");
    assert_eq!(restaurant.object_type.plural_display_name, "[DC3] Restaurants");
    assert_eq!(restaurant.object_type.primary_key, "primaryKey_");
    assert_eq!(restaurant.object_type.title_property, "restaurantName");
    assert_eq!(
        restaurant.object_type.properties["location"].data_type,
        PropertyDataType::Geopoint
    );
    assert_eq!(restaurant.object_type.properties["rating"].status.kind, "experimental");
    assert_eq!(restaurant.object_type.properties["primaryKey_"].type_classes.len(), 2);
    assert_eq!(restaurant.shared_property_type_mapping["dc3Name"], "restaurantName");

    let route = &resolved.object_types["Dc3DistributionRoute"];
    assert_eq!(
        route.object_type.properties["path"].data_type,
        PropertyDataType::Geoshape
    );
    assert_eq!(route.link_types[0].api_name, "restaurant");
    assert_eq!(route.link_types[0].display_name, "Restaurant");
    assert_eq!(route.link_types[0].foreign_key_property_api_name.as_deref(), Some("restaurant"));
    assert_eq!(
        restaurant.link_types[0].link_type_rid,
        "ri.Dc3Restaurant.Dc3RestaurantToDistributionRoute.Dc3DistributionRoute"
    );
    assert_eq!(restaurant.link_types[0].api_name, "distributionRoutes");

    assert!(resolved.query_types.is_empty());
    assert!(resolved.value_types.is_empty());
}

#[test]
fn geohash_property_and_geoshape_parameter_project_differently() {
    let resolved = resolve(&restaurant_ir()).unwrap();
    let create = &resolved.action_types["create-object-dc3restaurant"];
    assert_eq!(create.parameters["location"].data_type, ActionParameterType::Geoshape);
    assert!(!create.parameters["location"].required);
    assert!(create.parameters["primaryKey_"].required);
    assert_eq!(create.rid, "ri.action.create-object-dc3restaurant");
    assert_eq!(create.status, ReleaseStatus::Active);
}

#[test]
fn operations_summarize_logic_rules() {
    let resolved = resolve(&restaurant_ir()).unwrap();
    assert_eq!(
        resolved.action_types["create-object-dc3restaurant"].operations,
        vec![ActionOperation::CreateObject {
            object_type_api_name: "Dc3Restaurant".into()
        }]
    );
    let modify = &resolved.action_types["modify-object-dc3restaurant"];
    assert_eq!(
        modify.operations,
        vec![ActionOperation::ModifyObject {
            object_type_api_name: "Dc3Restaurant".into()
        }]
    );
    assert_eq!(
        serde_json::to_value(&modify.parameters["objectToModifyParameter"].data_type).unwrap(),
        json!({ "type": "object", "objectApiName": "Dc3Restaurant", "objectTypeApiName": "Dc3Restaurant" })
    );
}

#[test]
fn interfaces_and_shared_property_types_resolve() {
    let resolved = resolve(&restaurant_ir()).unwrap();
    let spt = &resolved.shared_property_types["dc3Name"];
    assert_eq!(spt.rid, "ri.spt.dc3Name");

    let named = &resolved.interface_types["Dc3Named"];
    assert_eq!(named.rid, "ri.interface.Dc3Named");
    assert_eq!(named.properties["dc3Name"].rid, "ri.interface.Dc3Named.dc3Name");
    assert!(named.properties["dc3Name"].required);
    assert_eq!(named.implemented_by_object_types, vec!["Dc3Restaurant".to_string()]);
    assert_eq!(named.all_properties.len(), 1);
}

#[test]
fn composite_primary_key_fails_resolution() {
    let mut document = ab_document();
    document["objectTypes"]["B"]["objectType"]["primaryKeys"] = json!(["bId", "aRef"]);
    let ir: OntologyIr = serde_json::from_value(document).unwrap();
    let err = resolve(&ir).unwrap_err();
    match err {
        ResolveError::PrimaryKey {
            source: PrimaryKeyError::Composite { keys },
            ..
        } => assert_eq!(keys, vec!["bId".to_string(), "aRef".to_string()]),
        other => panic!("expected composite key failure, got {other}"),
    }
}

#[test]
fn dangling_link_endpoint_names_the_link() {
    let mut document = ab_document();
    document["objectTypes"].as_object_mut().unwrap().remove("B");
    let ir: OntologyIr = serde_json::from_value(document).unwrap();
    let err = resolve(&ir).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("`R`"), "{message}");
    assert!(message.contains("B"), "{message}");
}

#[test]
fn unrelated_rename_keeps_other_rids() {
    let before = resolve(&restaurant_ir()).unwrap();

    let mut document: Value = serde_json::from_str(RESTAURANT_IR).unwrap();
    let actions = document["actionTypes"].as_object_mut().unwrap();
    let mut modify = actions.remove("modify-object-dc3restaurant").unwrap();
    modify["actionType"]["metadata"]["apiName"] = json!("rename-dc3restaurant");
    actions.insert("rename-dc3restaurant".into(), modify);
    let ir: OntologyIr = serde_json::from_value(document).unwrap();
    let after = resolve(&ir).unwrap();

    assert_eq!(before.object_types, after.object_types);
    assert_eq!(before.interface_types, after.interface_types);
    assert_eq!(
        before.action_types["create-object-dc3restaurant"],
        after.action_types["create-object-dc3restaurant"]
    );
    assert_eq!(after.action_types["rename-dc3restaurant"].rid, "ri.action.rename-dc3restaurant");
}

#[test]
fn unrelated_object_rename_keeps_other_rids() {
    let mut document = ab_document();
    document["objectTypes"]["Kitchen"] = object("Kitchen", &[("kitchenId", "string")]);
    let before = resolve(&serde_json::from_value(document.clone()).unwrap()).unwrap();

    let objects = document["objectTypes"].as_object_mut().unwrap();
    objects.remove("Kitchen");
    objects.insert("Galley".into(), object("Galley", &[("kitchenId", "string")]));
    let after = resolve(&serde_json::from_value(document).unwrap()).unwrap();

    assert_eq!(after.object_types["Galley"].object_type.rid, "ri.Galley");
    assert!(!after.object_types.contains_key("Kitchen"));
    for name in ["A", "B"] {
        let (before, after) = (&before.object_types[name], &after.object_types[name]);
        assert_eq!(before.object_type.rid, after.object_type.rid);
        for (key, property) in &before.object_type.properties {
            assert_eq!(property.rid, after.object_type.properties[key].rid);
        }
        assert_eq!(before.link_types, after.link_types);
    }
    assert_eq!(after.object_types["B"].link_types[0].link_type_rid, "ri.A.R.B");
}

#[test]
fn references_to_dropped_properties_fail_resolution() {
    let keyed_on_vector: OntologyIr = serde_json::from_value(json!({
        "objectTypes": { "Doc": object("Doc", &[("embedding", "vector"), ("body", "string")]) }
    }))
    .unwrap();
    let err = resolve(&keyed_on_vector).unwrap_err();
    assert!(err.to_string().contains("primary key `embedding`"), "{err}");

    let mut document = ab_document();
    document["objectTypes"]["B"]["objectType"]["propertyTypes"]["aRef"]["type"] =
        json!({ "type": "vector", "vector": {} });
    let err = resolve(&serde_json::from_value(document).unwrap()).unwrap_err();
    assert!(err.to_string().contains("`B.aRef`"), "{err}");
}

#[test]
fn output_serializes_with_wire_field_names() {
    let resolved = resolve(&restaurant_ir()).unwrap();
    let value: Value = serde_json::from_str(&resolved.to_json(false).unwrap()).unwrap();
    let object_type = &value["objectTypes"]["Dc3Restaurant"]["objectType"];
    assert_eq!(object_type["primaryKey"], "primaryKey_");
    assert_eq!(object_type["icon"], json!({ "type": "blueprint", "name": "shop", "color": "#2D72D2" }));
    assert_eq!(object_type["status"], "ACTIVE");
    assert_eq!(
        value["objectTypes"]["Dc3DistributionRoute"]["linkTypes"][0]["cardinality"],
        "ONE"
    );
    assert_eq!(value["queryTypes"], json!({}));
}

#[test]
fn repeated_resolution_is_byte_identical() {
    let ir = restaurant_ir();
    let first = resolve(&ir).unwrap();
    let second = resolve(&ir).unwrap();
    assert_eq!(first.to_json(true).unwrap(), second.to_json(true).unwrap());
    assert_eq!(first.digest().unwrap(), second.digest().unwrap());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn resolution_is_deterministic(names in prop::collection::btree_set("[A-Z][a-z]{2,8}", 1..6)) {
        let mut object_types = Map::new();
        for name in &names {
            object_types.insert(name.clone(), object(name, &[("id", "string"), ("spot", "geohash")]));
        }
        let ir: OntologyIr = serde_json::from_value(json!({ "objectTypes": object_types })).unwrap();

        let first = resolve(&ir).unwrap();
        let second = resolve(&ir).unwrap();
        prop_assert_eq!(first.to_json(false).unwrap(), second.to_json(false).unwrap());
        prop_assert_eq!(first.digest().unwrap(), second.digest().unwrap());
        for name in &names {
            prop_assert_eq!(&first.object_types[name].object_type.rid, &format!("ri.{name}"));
        }
    }
}
