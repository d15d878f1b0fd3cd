//! Widget variable inheritance and schema validation.
//!
//! Widget options can be bound ("inherited") to dashboard variables. When
//! the dashboard's variable schema changes, [`reconcile_widget`] diffs the
//! two snapshots, rebinds or unbinds the affected options, and validates
//! the result into an [`InheritErrorMap`]. Mismatches are returned as data;
//! callers decide whether to block a save.

pub mod diff;
pub mod inheritance;
pub mod keys;
pub mod schema;
pub mod session;
pub mod validation;

pub use diff::{VariableSchemaDiff, diff_variable_schema};
pub use inheritance::{
    apply_added_variables, apply_deleted_variables, inheriting_option_keys,
    initial_inherit_options, initial_schema_properties, is_affected_by_changed_variables,
    is_refreshable_by_variables, refined_schema_properties,
};
pub use keys::{FilterKeyMapper, MANAGED_VARIABLE_KEYS, VariableKeyMapper};
pub use schema::{
    InheritOption, InheritOptions, InheritanceMode, SelectionType, VariableSchemaProperty,
    VariableType, VariablesSchema, WidgetConfig, WidgetInfo, WidgetOptionSchemaProperty,
    WidgetOptions, WidgetOptionsSchema,
};
pub use session::{SessionMode, WidgetSession};
pub use validation::{
    InheritErrorKind, InheritErrorMap, InheritState, WidgetReconciliation,
    compute_inherit_error_map, inherit_states, reconcile_widget,
};
