//! Date-range resolution command.

use std::path::Path;

use serde::Serialize;
use skyboard_core::daterange::{
    AdvancedOperator, DateRangeError, DateRangeFieldValue, DateRangeRequest, DateRangeSelector,
    Granularity, Offset, PresetKey, parse_date_string, resolve_date_range,
};
use tabled::Tabled;

use super::output::{print_json, print_table, resolve_format};
use super::{load_config, load_document};
use crate::{OutputFormat, RangeArgs};

#[derive(Debug, Serialize, Tabled)]
struct RangeRow {
    #[tabled(rename = "Granularity")]
    granularity: String,
    #[tabled(rename = "Start")]
    start: String,
    #[tabled(rename = "End")]
    end: String,
    #[tabled(rename = "Period")]
    period: String,
}

pub fn run(config: Option<&Path>, profile: Option<&str>, args: RangeArgs) {
    let rc = load_config(config, profile);

    let request = match build_request(&args) {
        Ok(req) => req,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let range = match resolve_date_range(&request, &rc.resolver) {
        Ok(range) => range,
        Err(e) => {
            eprintln!("Error resolving date range: {}", e);
            std::process::exit(1);
        }
    };

    let row = RangeRow {
        granularity: request.granularity.to_string(),
        period: range.period_text(),
        start: range.start,
        end: range.end,
    };

    match resolve_format(&args.format) {
        OutputFormat::Table => print_table(&[row], "(no range)"),
        OutputFormat::Json => print_json(&row),
        OutputFormat::Quiet => println!("{}", row.period),
    }
}

fn build_request(args: &RangeArgs) -> Result<DateRangeRequest, DateRangeError> {
    let granularity: Granularity = args.granularity.parse()?;
    let anchor = args.anchor.as_deref().map(parse_date_string).transpose()?;

    if let Some(path) = &args.field {
        let field: DateRangeFieldValue = load_document(path, "date-range field");
        return field.to_request(granularity, anchor, args.preview);
    }

    let selector = build_selector(args, granularity)?;
    Ok(DateRangeRequest::new(granularity, selector)
        .with_anchor(anchor)
        .with_preview(args.preview))
}

fn build_selector(
    args: &RangeArgs,
    granularity: Granularity,
) -> Result<DateRangeSelector, DateRangeError> {
    if let Some(bounds) = &args.fixed {
        return match bounds.as_slice() {
            [start, end] => Ok(DateRangeSelector::CustomFixed { start: start.clone(), end: end.clone() }),
            _ => Err(DateRangeError::InvalidSelector("--fixed takes START END".to_string())),
        };
    }
    if let Some(bounds) = &args.relative {
        return match bounds.as_slice() {
            [start, end] => Ok(DateRangeSelector::CustomRelativeUnit { start: *start, end: *end }),
            _ => Err(DateRangeError::InvalidSelector("--relative takes START END".to_string())),
        };
    }
    if let Some(parts) = &args.advanced {
        return match parts.as_slice() {
            [start_op, start, end_op, end] => Ok(DateRangeSelector::AdvancedOffset {
                start: parse_offset(start_op, start)?,
                end: parse_offset(end_op, end)?,
            }),
            _ => Err(DateRangeError::InvalidSelector(
                "--advanced takes START_OP START END_OP END".to_string(),
            )),
        };
    }

    let key = args.preset.as_deref().unwrap_or("auto");
    Ok(DateRangeSelector::preset(PresetKey::parse_for(key, granularity)?))
}

fn parse_offset(operator: &str, value: &str) -> Result<Offset, DateRangeError> {
    let operator: AdvancedOperator = operator.parse()?;
    let value = value.trim().parse::<u32>().map_err(|_| {
        DateRangeError::InvalidSelector(format!("offset must be a non-negative number, got '{value}'"))
    })?;
    Ok(Offset { operator, value })
}
