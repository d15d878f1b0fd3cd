//! Inherit bindings: applying schema diffs to a widget and deriving the
//! initial bindings and visible properties for a widget form.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::{debug, trace};

use super::keys::VariableKeyMapper;
use super::schema::{
    InheritOption, InheritOptions, InheritanceMode, VariablesSchema, WidgetConfig, WidgetInfo,
    WidgetOptions,
};

/// Option properties whose enabled binding points at `variable_key`.
pub fn inheriting_option_keys(variable_key: &str, inherit_options: &InheritOptions) -> Vec<String> {
    inherit_options
        .iter()
        .filter(|(_, opt)| opt.inherits(variable_key))
        .map(|(prop, _)| prop.clone())
        .collect()
}

/// Bind newly available variables to the widget options they drive.
///
/// Returns `None` when no added variable maps to a property in the widget's
/// options schema.
pub fn apply_added_variables(
    added: &[String],
    config: &WidgetConfig,
    info: &WidgetInfo,
    mapper: &dyn VariableKeyMapper,
) -> Option<WidgetInfo> {
    let mut updated = info.clone();
    let mut affected = false;

    for variable_key in added {
        let Some(property) = mapper.option_key(variable_key) else {
            continue;
        };
        if !config.options_schema.properties.contains_key(&property) {
            continue;
        }

        affected = true;
        if !updated.schema_properties.contains(&property) {
            updated.schema_properties.push(property.clone());
        }
        updated.widget_options.remove_path(&property);
        trace!(%variable_key, %property, "bound added variable");
        updated.inherit_options.insert(property, InheritOption::bound(variable_key.as_str()));
    }

    affected.then_some(updated)
}

/// Drop bindings to deleted variables.
///
/// A fixed property stays visible and falls back to the config default;
/// any other property is hidden. Returns `None` when nothing was bound to a
/// deleted variable.
pub fn apply_deleted_variables(
    deleted: &[String],
    config: &WidgetConfig,
    info: &WidgetInfo,
) -> Option<WidgetInfo> {
    let mut updated = info.clone();
    let mut affected = false;

    for variable_key in deleted {
        let properties = inheriting_option_keys(variable_key, &updated.inherit_options);
        for property in properties {
            affected = true;
            updated.inherit_options.remove(&property);

            let fixed = config
                .options_schema
                .properties
                .get(&property)
                .is_some_and(|p| p.fixed);
            if fixed {
                revert_to_default(&mut updated.widget_options, &config.options, &property);
            } else {
                updated.schema_properties.retain(|p| p != &property);
            }
            trace!(%variable_key, %property, fixed, "unbound deleted variable");
        }
    }

    affected.then_some(updated)
}

fn revert_to_default(options: &mut WidgetOptions, defaults: &WidgetOptions, property: &str) {
    match defaults.get_path(property) {
        Some(value) => options.set_path(property, value.clone()),
        None => {
            options.remove_path(property);
        }
    }
}

/// Whether any enabled binding targets one of `changed`.
pub fn is_affected_by_changed_variables(changed: &[String], inherit_options: &InheritOptions) -> bool {
    inherit_options.values().any(|opt| {
        opt.enabled
            && opt
                .variable_key
                .as_ref()
                .is_some_and(|key| changed.contains(key))
    })
}

/// Whether a widget must refetch after dashboard variable *values* change.
pub fn is_refreshable_by_variables(
    inherit_options: &InheritOptions,
    after: &BTreeMap<String, Value>,
    before: &BTreeMap<String, Value>,
) -> bool {
    inherit_options
        .values()
        .filter(|opt| opt.enabled)
        .filter_map(|opt| opt.variable_key.as_deref())
        .any(|key| after.get(key) != before.get(key))
}

/// Bindings a widget form starts with, given what was stored and which
/// variables the dashboard currently offers.
pub fn initial_inherit_options(
    config: &WidgetConfig,
    stored: &InheritOptions,
    variables: &VariablesSchema,
) -> InheritOptions {
    let mut result = InheritOptions::new();

    for (property, schema) in &config.options_schema.properties {
        let stored_opt = stored.get(property);
        let binding = match schema.inheritance_mode.unwrap_or_default() {
            InheritanceMode::None => None,
            InheritanceMode::KeyMatching => {
                let key = schema.key.as_deref();
                match key.and_then(|k| variables.available(k).map(|_| k)) {
                    None => None,
                    Some(k) => match stored_opt {
                        Some(opt) if !opt.enabled => Some(opt.clone()),
                        _ => Some(InheritOption::bound(k)),
                    },
                }
            }
            InheritanceMode::SelectionTypeMatching => match stored_opt {
                Some(opt) if opt.enabled => {
                    let kept = opt
                        .variable_key
                        .as_deref()
                        .filter(|k| variables.available(k).is_some());
                    kept.or_else(|| {
                        variables.ordered_keys().into_iter().find(|k| {
                            variables
                                .available(k)
                                .is_some_and(|v| v.selection_type == schema.selection_type)
                        })
                    })
                    .map(InheritOption::bound)
                }
                _ => None,
            },
        };

        if let Some(binding) = binding {
            result.insert(property.clone(), binding);
        }
    }

    debug!(bindings = result.len(), "initial inherit options");
    result
}

/// Fixed option properties, in the options schema's order.
pub fn initial_schema_properties(config: &WidgetConfig) -> Vec<String> {
    let schema = &config.options_schema;
    let mut ordered: Vec<String> = schema
        .order
        .iter()
        .filter(|p| schema.properties.get(*p).is_some_and(|s| s.fixed))
        .cloned()
        .collect();
    for (property, s) in &schema.properties {
        if s.fixed && !ordered.contains(property) {
            ordered.push(property.clone());
        }
    }
    ordered
}

/// Reconcile stored visible properties with the initial set.
///
/// A stored property survives when it is also initial or still has a value;
/// an initial property that was not stored is added back only when it is
/// inherited.
pub fn refined_schema_properties(
    stored: &[String],
    initial: &[String],
    widget_options: Option<&WidgetOptions>,
    inherit_options: Option<&InheritOptions>,
) -> Vec<String> {
    let mut refined: Vec<String> = stored
        .iter()
        .filter(|p| initial.contains(p) || widget_options.is_some_and(|o| o.contains_path(p)))
        .cloned()
        .collect();

    for property in initial {
        if stored.contains(property) {
            continue;
        }
        let inherited = inherit_options
            .and_then(|opts| opts.get(property))
            .is_some_and(|opt| opt.enabled);
        if inherited && !refined.contains(property) {
            refined.push(property.clone());
        }
    }
    refined
}
