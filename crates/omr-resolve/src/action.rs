//! # Action Projector
//!
//! Each action resolves to an operations summary (one entry per logic rule,
//! in rule order, no deduplication) and a parameter map projected through
//! the parameter-side type table. Rules that name their target indirectly,
//! through a parameter holding an object or interface reference, are
//! resolved by looking that parameter up.

use std::collections::BTreeMap;

use omr_core::ir::{
    ActionType, BaseParameterType, LogicRule, Parameter, ParameterType, RuleValue,
};
use omr_core::metadata::{ActionOperation, ActionParameter, ActionTypeMetadata};

use crate::catalog::Catalog;
use crate::error::{Owner, ResolveError, ResolveResult};
use crate::rid::action_type_rid;
use crate::status::project_release_status;
use crate::types::project_parameter_type;

/// Resolve one action type.
pub fn resolve_action(action: &ActionType, catalog: &Catalog<'_>) -> ResolveResult<ActionTypeMetadata> {
    let metadata = &action.metadata;
    let owner = Owner::ActionType(metadata.api_name.clone());
    let status = project_release_status(&metadata.status).map_err(|source| ResolveError::Status {
        owner: owner.clone(),
        source,
    })?;

    let mut parameters = BTreeMap::new();
    for (id, parameter) in &metadata.parameters {
        let resolved = project_parameter(action, id, parameter, catalog, &owner)?;
        parameters.insert(id.clone(), resolved);
    }

    let operations = action
        .action_type_logic
        .logic
        .rules
        .iter()
        .map(|rule| project_operation(rule, &metadata.parameters, catalog, &owner))
        .collect::<ResolveResult<Vec<_>>>()?;

    tracing::debug!(
        action = %metadata.api_name,
        parameters = parameters.len(),
        operations = operations.len(),
        "resolved action type"
    );

    Ok(ActionTypeMetadata {
        api_name: metadata.api_name.clone(),
        description: metadata.display_metadata.description.clone(),
        display_name: metadata.display_metadata.display_name.clone(),
        status,
        parameters,
        rid: action_type_rid(&metadata.api_name),
        operations,
    })
}

fn project_parameter(
    action: &ActionType,
    id: &str,
    parameter: &Parameter,
    catalog: &Catalog<'_>,
    owner: &Owner,
) -> ResolveResult<ActionParameter> {
    let data_type =
        project_parameter_type(&parameter.parameter_type).map_err(|source| ResolveError::Type {
            owner: owner.clone(),
            element: format!("parameter `{id}`"),
            source,
        })?;

    if let ParameterType::Single(BaseParameterType::ObjectReference(reference))
    | ParameterType::List(BaseParameterType::ObjectReference(reference)) =
        &parameter.parameter_type
    {
        if catalog.object(&reference.object_type_id).is_none() {
            return Err(ResolveError::dangling(
                owner,
                "object type",
                &reference.object_type_id,
            ));
        }
    }

    let required = action
        .action_type_logic
        .validation
        .parameter_validations
        .get(id)
        .is_some_and(|validation| validation.is_required());

    Ok(ActionParameter {
        display_name: parameter.display_metadata.display_name.clone(),
        description: parameter.display_metadata.description.clone(),
        required,
        data_type,
        type_classes: parameter.display_metadata.type_classes.clone(),
    })
}

fn project_operation(
    rule: &LogicRule,
    parameters: &BTreeMap<String, Parameter>,
    catalog: &Catalog<'_>,
    owner: &Owner,
) -> ResolveResult<ActionOperation> {
    let operation = match rule {
        LogicRule::AddObject(rule) => {
            let target = rule.object_type_id.as_str();
            if catalog.object(target).is_none() {
                return Err(ResolveError::dangling(owner, "object type", target));
            }
            check_property_values(target, &rule.property_values, parameters, catalog, owner)?;
            ActionOperation::CreateObject {
                object_type_api_name: target.to_string(),
            }
        }
        LogicRule::ModifyObject(rule) | LogicRule::AddOrModifyObjectV2(rule) => {
            let target = object_parameter_target(&rule.object_to_modify, parameters, catalog, owner)?;
            check_property_values(target, &rule.property_values, parameters, catalog, owner)?;
            ActionOperation::ModifyObject {
                object_type_api_name: target.to_string(),
            }
        }
        LogicRule::DeleteObject(rule) => {
            let target = object_parameter_target(&rule.object_to_delete, parameters, catalog, owner)?;
            ActionOperation::DeleteObject {
                object_type_api_name: target.to_string(),
            }
        }
        LogicRule::AddInterface(rule) => {
            let target = rule.interface_api_name.as_str();
            if catalog.interface(target).is_none() {
                return Err(ResolveError::dangling(owner, "interface type", target));
            }
            ActionOperation::CreateInterfaceObject {
                interface_type_api_name: target.to_string(),
            }
        }
        LogicRule::ModifyInterface(rule) => {
            let target = interface_parameter_target(
                &rule.interface_object_to_modify_parameter,
                parameters,
                catalog,
                owner,
            )?;
            ActionOperation::ModifyInterfaceObject {
                interface_type_api_name: target.to_string(),
            }
        }
        LogicRule::AddLink | LogicRule::DeleteLink | LogicRule::Unrecognized(_) => {
            return Err(ResolveError::UnsupportedRule {
                owner: owner.clone(),
                tag: rule.tag().to_string(),
            })
        }
    };
    Ok(operation)
}

/// The object type held by a single `objectReference` parameter.
fn object_parameter_target<'p>(
    parameter_id: &str,
    parameters: &'p BTreeMap<String, Parameter>,
    catalog: &Catalog<'_>,
    owner: &Owner,
) -> ResolveResult<&'p str> {
    let parameter = parameters
        .get(parameter_id)
        .ok_or_else(|| ResolveError::dangling(owner, "parameter", parameter_id))?;
    match &parameter.parameter_type {
        ParameterType::Single(BaseParameterType::ObjectReference(reference)) => {
            let target = reference.object_type_id.as_str();
            if catalog.object(target).is_none() {
                return Err(ResolveError::dangling(owner, "object type", target));
            }
            Ok(target)
        }
        _ => Err(ResolveError::InvalidRuleParameter {
            owner: owner.clone(),
            parameter: parameter_id.to_string(),
            expected: "objectReference",
        }),
    }
}

/// The interface held by an `interfaceReference[List]` parameter.
fn interface_parameter_target<'p>(
    parameter_id: &str,
    parameters: &'p BTreeMap<String, Parameter>,
    catalog: &Catalog<'_>,
    owner: &Owner,
) -> ResolveResult<&'p str> {
    let parameter = parameters
        .get(parameter_id)
        .ok_or_else(|| ResolveError::dangling(owner, "parameter", parameter_id))?;
    match &parameter.parameter_type {
        ParameterType::Single(BaseParameterType::InterfaceReference(reference))
        | ParameterType::List(BaseParameterType::InterfaceReference(reference)) => {
            let target = reference.interface_type_rid.as_str();
            if catalog.interface(target).is_none() {
                return Err(ResolveError::dangling(owner, "interface type", target));
            }
            Ok(target)
        }
        _ => Err(ResolveError::InvalidRuleParameter {
            owner: owner.clone(),
            parameter: parameter_id.to_string(),
            expected: "interfaceReference",
        }),
    }
}

/// Written properties must exist on the target and parameter-sourced values
/// must name a declared parameter.
fn check_property_values(
    target: &str,
    values: &BTreeMap<String, RuleValue>,
    parameters: &BTreeMap<String, Parameter>,
    catalog: &Catalog<'_>,
    owner: &Owner,
) -> ResolveResult<()> {
    for (property, value) in values {
        if !catalog.has_property(target, property) {
            return Err(ResolveError::dangling(
                owner,
                "property",
                &format!("{target}.{property}"),
            ));
        }
        if let RuleValue::ParameterId(parameter_id) = value {
            if !parameters.contains_key(parameter_id) {
                return Err(ResolveError::dangling(owner, "parameter", parameter_id));
            }
        }
    }
    Ok(())
}
