//! Data model shared by the inheritance, diff and validation helpers.
//!
//! Everything here is a view over externally owned dashboard and widget
//! records. Maps are `BTreeMap` so every derived list is deterministic.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Cardinality of a variable or a widget option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SelectionType {
    Single,
    Multi,
}

impl std::fmt::Display for SelectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Single => write!(f, "SINGLE"),
            Self::Multi => write!(f, "MULTI"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VariableType {
    #[default]
    Managed,
    Custom,
}

/// One dashboard variable's declaration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VariableSchemaProperty {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub variable_type: VariableType,
    /// Whether the variable is active on the dashboard.
    #[serde(rename = "use", default)]
    pub in_use: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection_type: Option<SelectionType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Fields not interpreted here (`options`, `readonly`, `required`, ...).
    /// They still take part in change detection.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl VariableSchemaProperty {
    pub fn new(name: impl Into<String>, selection_type: SelectionType, in_use: bool) -> Self {
        Self {
            name: name.into(),
            in_use,
            selection_type: Some(selection_type),
            ..Default::default()
        }
    }
}

/// The dashboard-level variable schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VariablesSchema {
    #[serde(default)]
    pub properties: BTreeMap<String, VariableSchemaProperty>,
    #[serde(default)]
    pub order: Vec<String>,
}

impl VariablesSchema {
    /// Look up a variable that is declared and in use.
    pub fn available(&self, key: &str) -> Option<&VariableSchemaProperty> {
        self.properties.get(key).filter(|p| p.in_use)
    }

    /// Keys in display order: `order` first, then the rest alphabetically.
    pub fn ordered_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .order
            .iter()
            .map(String::as_str)
            .filter(|k| self.properties.contains_key(*k))
            .collect();
        for key in self.properties.keys() {
            if !keys.contains(&key.as_str()) {
                keys.push(key.as_str());
            }
        }
        keys
    }
}

/// How a widget option picks a dashboard variable to inherit from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InheritanceMode {
    /// Never inherits.
    None,
    /// Inherits the variable named by the option's `key`.
    #[default]
    KeyMatching,
    /// Inherits any available variable with the same selection type.
    SelectionTypeMatching,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WidgetOptionSchemaProperty {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection_type: Option<SelectionType>,
    /// Always shown; cannot be removed from the widget's visible properties.
    #[serde(default)]
    pub fixed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inheritance_mode: Option<InheritanceMode>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WidgetOptionsSchema {
    #[serde(default)]
    pub properties: BTreeMap<String, WidgetOptionSchemaProperty>,
    #[serde(default)]
    pub order: Vec<String>,
}

/// Static widget definition: defaults and the option schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WidgetConfig {
    pub widget_config_id: String,
    #[serde(default)]
    pub options: WidgetOptions,
    #[serde(default)]
    pub options_schema: WidgetOptionsSchema,
}

/// A widget option's binding to a dashboard variable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InheritOption {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variable_key: Option<String>,
}

impl InheritOption {
    pub fn bound(variable_key: impl Into<String>) -> Self {
        Self { enabled: true, variable_key: Some(variable_key.into()) }
    }

    /// Enabled and pointing at `variable_key`.
    pub fn inherits(&self, variable_key: &str) -> bool {
        self.enabled && self.variable_key.as_deref() == Some(variable_key)
    }
}

pub type InheritOptions = BTreeMap<String, InheritOption>;

/// Nested widget option values addressed by dotted paths (`filters.region`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WidgetOptions(pub Map<String, Value>);

impl WidgetOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get_path(&self, path: &str) -> Option<&Value> {
        if let Some(v) = self.0.get(path) {
            return Some(v);
        }
        let mut parts = path.split('.');
        let first = parts.next()?;
        let mut current = self.0.get(first)?;
        for part in parts {
            current = current.as_object()?.get(part)?;
        }
        Some(current)
    }

    /// Whether a non-null value is set at `path`.
    pub fn contains_path(&self, path: &str) -> bool {
        self.get_path(path).is_some_and(|v| !v.is_null())
    }

    /// Set a value, creating intermediate objects as needed.
    pub fn set_path(&mut self, path: &str, value: Value) {
        let parts: Vec<&str> = path.split('.').collect();
        let (last, parents) = match parts.split_last() {
            Some(split) => split,
            None => return,
        };
        let mut current = &mut self.0;
        for part in parents {
            let entry = current.entry(part.to_string()).or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            current = match entry.as_object_mut() {
                Some(obj) => obj,
                None => return,
            };
        }
        current.insert(last.to_string(), value);
    }

    /// Remove the value at `path` (a flat key of that name included).
    pub fn remove_path(&mut self, path: &str) -> Option<Value> {
        if let Some(v) = self.0.remove(path) {
            return Some(v);
        }
        let parts: Vec<&str> = path.split('.').collect();
        let (last, parents) = parts.split_last()?;
        let mut current = &mut self.0;
        for part in parents {
            current = current.get_mut(*part)?.as_object_mut()?;
        }
        current.remove(*last)
    }
}

/// The mutable per-widget record held by the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WidgetInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub inherit_options: InheritOptions,
    /// Visible option properties, in display order.
    #[serde(default)]
    pub schema_properties: Vec<String>,
    #[serde(default)]
    pub widget_options: WidgetOptions,
}
