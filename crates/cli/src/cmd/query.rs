//! Console query translation command.

use std::path::Path;

use serde::Serialize;
use skyboard_core::query::{ApiFilter, ApiQuery, ConsoleFilter, QueryError, QueryHelper};
use tabled::Tabled;

use super::load_config;
use super::output::{print_json, print_table, resolve_format};
use crate::{OutputFormat, QueryArgs};

#[derive(Debug, Tabled)]
struct FilterRow {
    #[tabled(rename = "Group")]
    group: &'static str,
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Operator")]
    operator: String,
    #[tabled(rename = "Value")]
    value: String,
}

impl FilterRow {
    fn new(group: &'static str, f: &ApiFilter) -> Self {
        let operator = serde_json::to_value(f.o)
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default();
        Self { group, key: f.k.clone(), operator, value: f.v.to_string() }
    }
}

#[derive(Debug, Serialize)]
struct QueryOutput<'a> {
    raw_query: String,
    #[serde(flatten)]
    api: &'a ApiQuery,
}

fn build(args: &QueryArgs, helper: &mut QueryHelper) -> Result<(), QueryError> {
    if let Some(name) = &args.timezone {
        helper.set_timezone_name(name)?;
    }
    helper.set_filters_as_raw_query_strings(&args.raw);
    let or_filters = args
        .or
        .iter()
        .map(|s| ConsoleFilter::from_raw_str(s))
        .collect::<Result<Vec<_>, _>>()?;
    helper.set_or_filters(or_filters)?;
    Ok(())
}

pub fn run(config: Option<&Path>, profile: Option<&str>, args: QueryArgs) {
    let rc = load_config(config, profile);

    let mut helper = QueryHelper::new();
    helper.set_timezone(rc.timezone);
    if let Err(e) = build(&args, &mut helper) {
        eprintln!("Error building query: {}", e);
        std::process::exit(1);
    }

    let api = helper.api_query();

    match resolve_format(&args.format) {
        OutputFormat::Table => {
            let rows: Vec<FilterRow> = api
                .filter
                .iter()
                .map(|f| FilterRow::new("and", f))
                .chain(api.filter_or.iter().map(|f| FilterRow::new("or", f)))
                .collect();
            print_table(&rows, "(no filters)");
            if !api.keyword.is_empty() {
                println!("keyword: {}", api.keyword);
            }
        }
        OutputFormat::Json => {
            print_json(&QueryOutput { raw_query: helper.raw_query_string(), api: &api })
        }
        OutputFormat::Quiet => match serde_json::to_string(&api) {
            Ok(s) => println!("{s}"),
            Err(e) => {
                eprintln!("Error serializing output: {}", e);
                std::process::exit(1);
            }
        },
    }
}
