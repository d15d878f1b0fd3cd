//! Datetime filters: local date or datetime in a timezone, sent as UTC.

use chrono::{Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

use super::errors::QueryError;
use super::filter::ApiFilter;
use super::operators::{ApiOperator, Operator};

const API_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

enum LocalValue {
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

fn parse_local(input: &str) -> Option<LocalValue> {
    let s = input.trim().trim_end_matches('Z');
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(LocalValue::Date(d));
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(LocalValue::DateTime)
}

fn to_utc_string(local: NaiveDateTime, tz: Tz, raw: &str) -> Result<String, QueryError> {
    let zoned = tz
        .from_local_datetime(&local)
        .earliest()
        .ok_or_else(|| QueryError::InvalidDatetime(raw.to_string()))?;
    Ok(zoned.with_timezone(&Utc).format(API_DATETIME_FORMAT).to_string())
}

/// Expand one datetime console filter value into API filters.
///
/// A date-only value covers the whole local day: `=t` becomes
/// `[gte day, lt next day]`, `>t`/`>=t` compare from the start of the day
/// and `<t`/`<=t` up to it. A value with a time compares against that
/// instant; `=t` then means "after".
pub fn datetime_filters(
    key: &str,
    value: &str,
    operator: Operator,
    tz: Tz,
) -> Result<Vec<ApiFilter>, QueryError> {
    let parsed = parse_local(value).ok_or_else(|| QueryError::InvalidDatetime(value.to_string()))?;

    let filters = match parsed {
        LocalValue::Date(date) => {
            let midnight = date
                .and_hms_opt(0, 0, 0)
                .ok_or_else(|| QueryError::InvalidDatetime(value.to_string()))?;
            let start = to_utc_string(midnight, tz, value)?;
            match operator {
                Operator::DatetimeEq => {
                    let next = midnight + Duration::days(1);
                    vec![
                        ApiFilter::new(key, start, ApiOperator::DatetimeGte),
                        ApiFilter::new(key, to_utc_string(next, tz, value)?, ApiOperator::DatetimeLt),
                    ]
                }
                Operator::DatetimeGt | Operator::DatetimeGte => {
                    vec![ApiFilter::new(key, start, ApiOperator::DatetimeGte)]
                }
                _ => vec![ApiFilter::new(key, start, ApiOperator::DatetimeLte)],
            }
        }
        LocalValue::DateTime(dt) => {
            let at = to_utc_string(dt, tz, value)?;
            let op = match operator {
                Operator::DatetimeEq | Operator::DatetimeGt => ApiOperator::DatetimeGt,
                Operator::DatetimeGte => ApiOperator::DatetimeGte,
                Operator::DatetimeLt => ApiOperator::DatetimeLt,
                _ => ApiOperator::DatetimeLte,
            };
            vec![ApiFilter::new(key, at, op)]
        }
    };
    Ok(filters)
}
