//! Inherit binding validation command.

use std::path::Path;

use serde::Serialize;
use skyboard_core::variables::{
    InheritErrorMap, InheritState, VariablesSchema, WidgetConfig, WidgetInfo,
    compute_inherit_error_map, inherit_states,
};
use tabled::Tabled;

use super::output::{print_json, print_table, resolve_format};
use super::{load_config, load_document};
use crate::{OutputFormat, ValidateArgs};

#[derive(Debug, Serialize)]
struct ValidationReport {
    valid: bool,
    error_map: InheritErrorMap,
    states: Vec<PropertyState>,
}

#[derive(Debug, Serialize)]
struct PropertyState {
    property: String,
    #[serde(flatten)]
    state: InheritState,
}

#[derive(Debug, Tabled)]
struct StateRow {
    #[tabled(rename = "Property")]
    property: String,
    #[tabled(rename = "Variable")]
    variable: String,
    #[tabled(rename = "State")]
    state: String,
}

impl From<&PropertyState> for StateRow {
    fn from(p: &PropertyState) -> Self {
        let (variable, state) = match &p.state {
            InheritState::Unbound => ("-".to_string(), "unbound".to_string()),
            InheritState::Inherited { variable_key } => (variable_key.clone(), "inherited".to_string()),
            InheritState::Error { variable_key, reason } => {
                (variable_key.clone(), format!("error: {reason}"))
            }
        };
        Self { property: p.property.clone(), variable, state }
    }
}

pub fn run(config: Option<&Path>, profile: Option<&str>, args: ValidateArgs) {
    let _rc = load_config(config, profile);

    let info: WidgetInfo = load_document(&args.widget, "widget");
    let widget_config: WidgetConfig = load_document(&args.config_file, "widget config");
    let variables: VariablesSchema = load_document(&args.variables, "variable schema");

    let error_map = compute_inherit_error_map(
        &info.schema_properties,
        &info.inherit_options,
        &widget_config.options_schema,
        &variables,
    );
    let states = inherit_states(
        &info.schema_properties,
        &info.inherit_options,
        &widget_config.options_schema,
        &variables,
    )
    .into_iter()
    .map(|(property, state)| PropertyState { property, state })
    .collect();

    let report = ValidationReport { valid: error_map.is_empty(), error_map, states };

    match resolve_format(&args.format) {
        OutputFormat::Table => {
            let rows: Vec<StateRow> = report.states.iter().map(StateRow::from).collect();
            print_table(&rows, "(no visible properties)");
            if report.valid {
                println!("\nAll inherit bindings are valid.");
            } else {
                println!("\n{} invalid binding(s).", report.error_map.len());
            }
        }
        OutputFormat::Json => print_json(&report),
        OutputFormat::Quiet => {
            for (property, kind) in &report.error_map {
                println!("{property}\t{kind}");
            }
        }
    }

    if !report.valid {
        std::process::exit(1);
    }
}
