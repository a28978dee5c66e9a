//! IR builders shared by unit tests.

use omr_core::ir::OntologyIr;
use serde_json::{json, Map, Value};

pub fn active() -> Value {
    json!({ "type": "active", "active": {} })
}

pub fn storage(tag: &str) -> Value {
    json!({ "type": tag, tag: {} })
}

pub fn property(api_name: &str, storage_type: Value) -> Value {
    json!({
        "apiName": api_name,
        "displayMetadata": { "displayName": api_name, "visibility": "NORMAL" },
        "indexedForSearch": true,
        "type": storage_type,
        "status": active(),
        "typeClasses": []
    })
}

/// An object type whose first property is its primary key and title.
pub fn object(api_name: &str, properties: &[(&str, &str)]) -> Value {
    let mut property_types = Map::new();
    for (name, tag) in properties {
        property_types.insert((*name).to_string(), property(name, storage(tag)));
    }
    let primary_key = properties.first().map(|(name, _)| *name).unwrap_or("id");
    json!({
        "objectType": {
            "apiName": api_name,
            "displayMetadata": {
                "displayName": api_name,
                "pluralDisplayName": format!("{api_name}s"),
                "description": null,
                "icon": { "type": "blueprint", "blueprint": { "locator": "cube", "color": "#4C90F0" } },
                "visibility": "NORMAL"
            },
            "primaryKeys": [primary_key],
            "propertyTypes": property_types,
            "titlePropertyTypeRid": primary_key,
            "status": active(),
            "redacted": false,
            "implementsInterfaces2": []
        }
    })
}

pub fn link_metadata(api_name: &str, display_name: &str) -> Value {
    json!({
        "apiName": api_name,
        "displayMetadata": { "displayName": display_name, "pluralDisplayName": display_name, "visibility": "NORMAL" },
        "typeClasses": []
    })
}

pub fn one_to_many(id: &str, one: &str, many: &str, from: &str, to: &str) -> Value {
    json!({
        "linkType": {
            "id": id,
            "definition": {
                "type": "oneToMany",
                "oneToMany": {
                    "objectTypeRidOneSide": one,
                    "objectTypeRidManySide": many,
                    "oneToManyLinkMetadata": link_metadata(&lower_first(one), one),
                    "manyToOneLinkMetadata": link_metadata(&format!("{}s", lower_first(many)), many),
                    "oneSidePrimaryKeyToManySidePropertyMapping": [
                        { "from": { "apiName": from, "object": one }, "to": { "apiName": to, "object": many } }
                    ],
                    "cardinalityHint": "ONE_TO_MANY"
                }
            },
            "status": active(),
            "redacted": false
        }
    })
}

pub fn many_to_many(id: &str, a: &str, b: &str) -> Value {
    json!({
        "linkType": {
            "id": id,
            "definition": {
                "type": "manyToMany",
                "manyToMany": {
                    "objectTypeRidA": a,
                    "objectTypeRidB": b,
                    "objectTypeAToBLinkMetadata": link_metadata(&format!("{}s", lower_first(b)), b),
                    "objectTypeBToALinkMetadata": link_metadata(&format!("{}s", lower_first(a)), a)
                }
            },
            "status": active()
        }
    })
}

pub fn parameter(id: &str, parameter_type: Value) -> Value {
    json!({
        "id": id,
        "type": parameter_type,
        "displayMetadata": { "displayName": id, "description": "", "typeClasses": [] }
    })
}

pub fn required(is_required: bool) -> Value {
    let tag = if is_required { "required" } else { "notRequired" };
    json!({
        "defaultValidation": {
            "display": {},
            "validation": { "required": { "type": tag, tag: {} } }
        }
    })
}

/// An action with the given parameters (id → type) and rules. Every
/// parameter is required.
pub fn action(api_name: &str, parameters: &[(&str, Value)], rules: Vec<Value>) -> Value {
    let mut parameter_map = Map::new();
    let mut validations = Map::new();
    for (id, parameter_type) in parameters {
        parameter_map.insert((*id).to_string(), parameter(id, parameter_type.clone()));
        validations.insert((*id).to_string(), required(true));
    }
    json!({
        "actionType": {
            "actionTypeLogic": {
                "logic": { "rules": rules },
                "validation": { "parameterValidations": validations }
            },
            "metadata": {
                "apiName": api_name,
                "displayMetadata": { "displayName": api_name, "description": "" },
                "parameters": parameter_map,
                "status": active()
            }
        }
    })
}

pub fn object_reference(object_type_id: &str) -> Value {
    json!({ "type": "objectReference", "objectReference": { "objectTypeId": object_type_id } })
}

pub fn document(sections: Value) -> OntologyIr {
    serde_json::from_value(sections).unwrap()
}

fn lower_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
