//! Widget reconciliation command.

use std::path::Path;

use skyboard_core::document::write_document;
use skyboard_core::variables::{
    FilterKeyMapper, VariablesSchema, WidgetConfig, WidgetInfo, WidgetReconciliation,
    reconcile_widget,
};
use tabled::Tabled;
use tracing::info;

use super::output::{print_json, print_table, resolve_format};
use super::{load_config, load_document};
use crate::{OutputFormat, ReconcileArgs};

#[derive(Debug, Tabled)]
struct SummaryRow {
    #[tabled(rename = "Field")]
    field: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

fn join(keys: &[String]) -> String {
    if keys.is_empty() { "-".to_string() } else { keys.join(", ") }
}

fn summary(result: &WidgetReconciliation) -> Vec<SummaryRow> {
    let valid = match result.valid {
        Some(true) => "yes".to_string(),
        Some(false) => "no".to_string(),
        None => "not checked".to_string(),
    };
    let errors = result
        .error_map
        .iter()
        .map(|(property, kind)| format!("{property} ({kind})"))
        .collect::<Vec<_>>();
    vec![
        SummaryRow { field: "added", value: join(&result.diff.added) },
        SummaryRow { field: "deleted", value: join(&result.diff.deleted) },
        SummaryRow { field: "changed", value: join(&result.diff.changed) },
        SummaryRow { field: "refresh", value: if result.updated { "yes" } else { "no" }.to_string() },
        SummaryRow { field: "valid", value: valid },
        SummaryRow { field: "errors", value: join(&errors) },
        SummaryRow { field: "visible", value: join(&result.widget_info.schema_properties) },
    ]
}

pub fn run(config: Option<&Path>, profile: Option<&str>, args: ReconcileArgs) {
    let _rc = load_config(config, profile);

    let info: WidgetInfo = load_document(&args.widget, "widget");
    let widget_config: WidgetConfig = load_document(&args.config_file, "widget config");
    let before: VariablesSchema = load_document(&args.before, "variable schema");
    let after: VariablesSchema = load_document(&args.after, "variable schema");

    let result = reconcile_widget(&after, &before, &widget_config, &info, &FilterKeyMapper);

    if let Some(path) = &args.write {
        if let Err(e) = write_document(path, &result.widget_info) {
            eprintln!("Error writing widget: {}", e);
            std::process::exit(1);
        }
        info!(path = %path.display(), "wrote reconciled widget");
    }

    match resolve_format(&args.format) {
        OutputFormat::Table => print_table(&summary(&result), ""),
        OutputFormat::Json => print_json(&result),
        OutputFormat::Quiet => println!("{}", if result.updated { "refresh" } else { "unchanged" }),
    }
}
