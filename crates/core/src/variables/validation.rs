//! Inherit binding validation and whole-widget reconciliation.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use super::diff::{VariableSchemaDiff, diff_variable_schema};
use super::inheritance::{
    apply_added_variables, apply_deleted_variables, is_affected_by_changed_variables,
};
use super::keys::VariableKeyMapper;
use super::schema::{InheritOptions, VariablesSchema, WidgetConfig, WidgetInfo, WidgetOptionsSchema};

/// Why a binding is invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InheritErrorKind {
    /// The variable is gone or no longer in use.
    VariableUnavailable,
    /// Variable and option disagree on SINGLE/MULTI.
    SelectionTypeMismatch,
}

impl std::fmt::Display for InheritErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::VariableUnavailable => write!(f, "variable unavailable"),
            Self::SelectionTypeMismatch => write!(f, "selection type mismatch"),
        }
    }
}

/// Erroring option properties. An absent key means the binding is valid.
pub type InheritErrorMap = BTreeMap<String, InheritErrorKind>;

fn check_binding(
    property: &str,
    variable_key: &str,
    options_schema: &WidgetOptionsSchema,
    variables: &VariablesSchema,
) -> Option<InheritErrorKind> {
    let Some(variable) = variables.available(variable_key) else {
        return Some(InheritErrorKind::VariableUnavailable);
    };
    let option_type = options_schema.properties.get(property).and_then(|p| p.selection_type);
    (variable.selection_type != option_type).then_some(InheritErrorKind::SelectionTypeMismatch)
}

/// Check every visible property's enabled binding against the dashboard
/// variables. Bindings without a variable key are not checked.
pub fn compute_inherit_error_map(
    schema_properties: &[String],
    inherit_options: &InheritOptions,
    options_schema: &WidgetOptionsSchema,
    variables: &VariablesSchema,
) -> InheritErrorMap {
    let mut errors = InheritErrorMap::new();
    for property in schema_properties {
        let Some(opt) = inherit_options.get(property).filter(|o| o.enabled) else {
            continue;
        };
        let Some(variable_key) = opt.variable_key.as_deref() else {
            continue;
        };
        if let Some(kind) = check_binding(property, variable_key, options_schema, variables) {
            errors.insert(property.clone(), kind);
        }
    }
    errors
}

/// Per-property inheritance state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum InheritState {
    Unbound,
    Inherited { variable_key: String },
    Error { variable_key: String, reason: InheritErrorKind },
}

/// State of each visible property, in display order.
pub fn inherit_states(
    schema_properties: &[String],
    inherit_options: &InheritOptions,
    options_schema: &WidgetOptionsSchema,
    variables: &VariablesSchema,
) -> Vec<(String, InheritState)> {
    schema_properties
        .iter()
        .map(|property| {
            let bound = inherit_options
                .get(property)
                .filter(|o| o.enabled)
                .and_then(|o| o.variable_key.clone());
            let state = match bound {
                None => InheritState::Unbound,
                Some(variable_key) => {
                    match check_binding(property, &variable_key, options_schema, variables) {
                        Some(reason) => InheritState::Error { variable_key, reason },
                        None => InheritState::Inherited { variable_key },
                    }
                }
            };
            (property.clone(), state)
        })
        .collect()
}

/// Outcome of reconciling one widget with a variable-schema change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WidgetReconciliation {
    pub diff: VariableSchemaDiff,
    /// The widget must be refreshed.
    pub updated: bool,
    /// Validity after the update; only computed when `updated`.
    pub valid: Option<bool>,
    pub error_map: InheritErrorMap,
    pub widget_info: WidgetInfo,
}

/// Apply a schema change to a widget: added bindings first, then deleted
/// bindings, then the changed-variable check. Validation runs against
/// `after` when anything changed.
pub fn reconcile_widget(
    after: &VariablesSchema,
    before: &VariablesSchema,
    config: &WidgetConfig,
    info: &WidgetInfo,
    mapper: &dyn VariableKeyMapper,
) -> WidgetReconciliation {
    let diff = diff_variable_schema(after, before);
    let mut current = info.clone();
    let mut updated = false;

    if !diff.added.is_empty() {
        if let Some(next) = apply_added_variables(&diff.added, config, &current, mapper) {
            current = next;
            updated = true;
        }
    }
    if !diff.deleted.is_empty() {
        if let Some(next) = apply_deleted_variables(&diff.deleted, config, &current) {
            current = next;
            updated = true;
        }
    }
    if !diff.changed.is_empty() && is_affected_by_changed_variables(&diff.changed, &current.inherit_options) {
        updated = true;
    }

    let (valid, error_map) = if updated {
        let errors = compute_inherit_error_map(
            &current.schema_properties,
            &current.inherit_options,
            &config.options_schema,
            after,
        );
        (Some(errors.is_empty()), errors)
    } else {
        (None, InheritErrorMap::new())
    };

    debug!(
        widget = %config.widget_config_id,
        updated,
        ?valid,
        "reconciled widget"
    );

    WidgetReconciliation { diff, updated, valid, error_map, widget_info: current }
}
