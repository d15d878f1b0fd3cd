//! Explicit re-evaluation of a widget as dashboard variables change.
//!
//! The session keeps the last variable-schema snapshot the widget was
//! reconciled against. In edit mode every schema change is reconciled
//! immediately; in view mode the change is only recorded and the widget is
//! marked stale until [`WidgetSession::reload`].

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::debug;

use super::inheritance::is_refreshable_by_variables;
use super::keys::VariableKeyMapper;
use super::schema::{VariablesSchema, WidgetConfig, WidgetInfo};
use super::validation::{InheritErrorMap, WidgetReconciliation, compute_inherit_error_map, reconcile_widget};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    Edit,
    View,
}

#[derive(Debug, Clone)]
pub struct WidgetSession {
    mode: SessionMode,
    config: WidgetConfig,
    info: WidgetInfo,
    snapshot: VariablesSchema,
    error_map: InheritErrorMap,
    stale: bool,
}

impl WidgetSession {
    pub fn new(
        mode: SessionMode,
        config: WidgetConfig,
        info: WidgetInfo,
        variables: VariablesSchema,
    ) -> Self {
        let error_map = compute_inherit_error_map(
            &info.schema_properties,
            &info.inherit_options,
            &config.options_schema,
            &variables,
        );
        Self { mode, config, info, snapshot: variables, error_map, stale: false }
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: SessionMode) {
        self.mode = mode;
    }

    pub fn widget_info(&self) -> &WidgetInfo {
        &self.info
    }

    pub fn error_map(&self) -> &InheritErrorMap {
        &self.error_map
    }

    /// Saved widget whose schema changed since it was last loaded.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Feed a new variable schema. Returns the reconciliation in edit mode,
    /// `None` in view mode.
    pub fn on_variables_schema_change(
        &mut self,
        variables: &VariablesSchema,
        mapper: &dyn VariableKeyMapper,
    ) -> Option<WidgetReconciliation> {
        if *variables == self.snapshot {
            return None;
        }
        match self.mode {
            SessionMode::View => {
                debug!(widget = %self.config.widget_config_id, "schema changed in view mode, marking stale");
                self.stale = true;
                None
            }
            SessionMode::Edit => {
                let result =
                    reconcile_widget(variables, &self.snapshot, &self.config, &self.info, mapper);
                self.info = result.widget_info.clone();
                self.error_map = compute_inherit_error_map(
                    &self.info.schema_properties,
                    &self.info.inherit_options,
                    &self.config.options_schema,
                    variables,
                );
                self.snapshot = variables.clone();
                Some(result)
            }
        }
    }

    /// Whether the widget must refetch after variable values changed.
    pub fn on_variables_change(
        &self,
        after: &BTreeMap<String, Value>,
        before: &BTreeMap<String, Value>,
    ) -> bool {
        !self.stale && is_refreshable_by_variables(&self.info.inherit_options, after, before)
    }

    /// Replace the widget record and snapshot, clearing the stale flag.
    pub fn reload(&mut self, info: WidgetInfo, variables: VariablesSchema) {
        self.error_map = compute_inherit_error_map(
            &info.schema_properties,
            &info.inherit_options,
            &self.config.options_schema,
            &variables,
        );
        self.info = info;
        self.snapshot = variables;
        self.stale = false;
    }
}
