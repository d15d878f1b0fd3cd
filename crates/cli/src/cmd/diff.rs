//! Variable schema diff command.

use std::path::Path;

use skyboard_core::variables::{VariableSchemaDiff, VariablesSchema, diff_variable_schema};
use tabled::Tabled;

use super::output::{print_json, print_table, resolve_format};
use super::{load_config, load_document};
use crate::{DiffArgs, OutputFormat};

#[derive(Debug, Tabled)]
struct DiffRow {
    #[tabled(rename = "Variable")]
    key: String,
    #[tabled(rename = "Change")]
    change: &'static str,
}

fn rows(diff: &VariableSchemaDiff) -> Vec<DiffRow> {
    let tag = |keys: &[String], change: &'static str| {
        keys.iter().map(move |k| DiffRow { key: k.clone(), change }).collect::<Vec<_>>()
    };
    let mut rows = tag(&diff.added, "added");
    rows.extend(tag(&diff.deleted, "deleted"));
    rows.extend(tag(&diff.changed, "changed"));
    rows
}

pub fn run(config: Option<&Path>, profile: Option<&str>, args: DiffArgs) {
    let _rc = load_config(config, profile);

    let before: VariablesSchema = load_document(&args.before, "variable schema");
    let after: VariablesSchema = load_document(&args.after, "variable schema");
    let diff = diff_variable_schema(&after, &before);

    match resolve_format(&args.format) {
        OutputFormat::Table => print_table(&rows(&diff), "(no changes)"),
        OutputFormat::Json => print_json(&diff),
        OutputFormat::Quiet => {
            for row in rows(&diff) {
                let sign = match row.change {
                    "added" => '+',
                    "deleted" => '-',
                    _ => '~',
                };
                println!("{} {}", sign, row.key);
            }
        }
    }
}
