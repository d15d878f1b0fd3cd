use chrono::NaiveDate;
use skyboard_core::daterange::{
    DateRange, DateRangeFieldValue, DateRangeRequest, DateRangeSelector, Granularity, PresetKey,
    ResolverOptions, resolve_date_range_at,
};
use skyboard_core::variables::{
    SelectionType, VariableSchemaProperty, VariablesSchema, diff_variable_schema,
};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn resolve(granularity: Granularity, anchor: &str, selector: DateRangeSelector) -> DateRange {
    let request = DateRangeRequest::new(granularity, selector).with_anchor(Some(date(anchor)));
    resolve_date_range_at(&request, &ResolverOptions::default(), date("2025-01-01")).unwrap()
}

#[test]
fn monthly_auto_is_trailing_twelve_months() {
    let range = resolve(Granularity::Monthly, "2024-06-15", DateRangeSelector::preset(PresetKey::Auto));
    assert_eq!((range.start.as_str(), range.end.as_str()), ("2023-07", "2024-06"));
}

#[test]
fn resolved_range_serializes_as_start_end() {
    let range = resolve(Granularity::Yearly, "2024-06-15", DateRangeSelector::preset(PresetKey::Auto));
    insta::assert_json_snapshot!(range, @r###"
    {
      "start": "2022",
      "end": "2024"
    }
    "###);
}

#[test]
fn monthly_last_quarter_from_second_quarter() {
    let range =
        resolve(Granularity::Monthly, "2024-06-15", DateRangeSelector::preset(PresetKey::LastQuarter));
    assert_eq!((range.start.as_str(), range.end.as_str()), ("2024-01", "2024-03"));
}

#[test]
fn monthly_last_quarter_crosses_year() {
    let range =
        resolve(Granularity::Monthly, "2024-01-10", DateRangeSelector::preset(PresetKey::LastQuarter));
    assert_eq!((range.start.as_str(), range.end.as_str()), ("2023-10", "2023-12"));
}

#[test]
fn daily_today_on_leap_day() {
    let range = resolve(Granularity::Daily, "2024-02-29", DateRangeSelector::preset(PresetKey::Today));
    assert_eq!(range.start, "2024-02-29");
    assert_eq!(range.end, "2024-02-29");
    assert_eq!(range.period_text(), "2024-02-29");
}

#[test]
fn yearly_custom_fixed_reformats() {
    let selector = DateRangeSelector::CustomFixed {
        start: "2020-01-01".to_string(),
        end: "2022-12-31".to_string(),
    };
    let range = resolve(Granularity::Yearly, "2024-06-15", selector);
    assert_eq!((range.start.as_str(), range.end.as_str()), ("2020", "2022"));
    assert_eq!(range.period_text(), "2020 ~ 2022");
}

#[test]
fn stored_field_value_resolves_like_selector() {
    let field: DateRangeFieldValue = serde_json::from_str(
        r#"{"inherit": true, "options": {"value": "advanced", "start": 2, "start_operator": "subtract", "end": 0, "end_operator": "add"}}"#,
    )
    .unwrap();
    let request = field.to_request(Granularity::Monthly, Some(date("2024-06-15")), false).unwrap();
    let range = resolve_date_range_at(&request, &ResolverOptions::default(), date("2025-01-01")).unwrap();
    assert_eq!((range.start.as_str(), range.end.as_str()), ("2024-04", "2024-06"));
}

#[test]
fn variable_schema_diff_example() {
    let mut before = VariablesSchema::default();
    before.properties.insert("a".into(), VariableSchemaProperty::new("A", SelectionType::Single, true));
    before.properties.insert("b".into(), VariableSchemaProperty::new("B", SelectionType::Single, false));

    let mut after = VariablesSchema::default();
    after.properties.insert("a".into(), VariableSchemaProperty::new("A", SelectionType::Multi, true));
    after.properties.insert("c".into(), VariableSchemaProperty::new("C", SelectionType::Multi, true));

    let diff = diff_variable_schema(&after, &before);
    assert_eq!(diff.added, vec!["c"]);
    assert!(diff.deleted.is_empty());
    assert_eq!(diff.changed, vec!["a"]);
}
