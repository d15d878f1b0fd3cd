//! Builder turning console filters into an API query.

use chrono_tz::Tz;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use super::datetime::datetime_filters;
use super::errors::QueryError;
use super::filter::{ApiFilter, ConsoleFilter, RawQuery, value_text};
use super::operators::Operator;

/// Query sent to the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ApiQuery {
    pub filter: Vec<ApiFilter>,
    pub filter_or: Vec<ApiFilter>,
    /// Keyword filters joined with spaces.
    pub keyword: String,
}

#[derive(Debug, Clone)]
pub struct QueryHelper {
    filters: Vec<ConsoleFilter>,
    or_filters: Vec<ConsoleFilter>,
    timezone: Tz,
}

impl Default for QueryHelper {
    fn default() -> Self {
        Self::new()
    }
}

fn check_or_filter(index: usize, f: &ConsoleFilter) -> Result<(), QueryError> {
    match (&f.k, f.o) {
        (Some(_), Some(op)) if op != Operator::Contain => Ok(()),
        _ => Err(QueryError::OrFilterIncomplete { index }),
    }
}

impl QueryHelper {
    pub fn new() -> Self {
        Self { filters: Vec::new(), or_filters: Vec::new(), timezone: Tz::UTC }
    }

    /// Timezone used to interpret datetime filter values.
    pub fn set_timezone(&mut self, timezone: Tz) -> &mut Self {
        self.timezone = timezone;
        self
    }

    pub fn set_timezone_name(&mut self, name: &str) -> Result<&mut Self, QueryError> {
        let tz = name
            .trim()
            .parse::<Tz>()
            .map_err(|_| QueryError::InvalidTimezone(name.to_string()))?;
        Ok(self.set_timezone(tz))
    }

    pub fn set_filters(&mut self, filters: Vec<ConsoleFilter>) -> &mut Self {
        self.filters = filters;
        self
    }

    pub fn add_filter(&mut self, filter: ConsoleFilter) -> &mut Self {
        self.filters.push(filter);
        self
    }

    pub fn set_filters_as_raw_queries(&mut self, raw: &[RawQuery]) -> Result<&mut Self, QueryError> {
        let filters = raw
            .iter()
            .map(|q| ConsoleFilter::from_raw(q))
            .collect::<Result<Vec<_>, _>>()?;
        self.filters = filters;
        Ok(self)
    }

    /// Replace filters from raw query strings. Unparseable strings are
    /// logged and skipped.
    pub fn set_filters_as_raw_query_strings<I, S>(&mut self, raw: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.filters.clear();
        for s in raw {
            let s = s.as_ref();
            if s.trim().is_empty() {
                continue;
            }
            match ConsoleFilter::from_raw_str(s) {
                Ok(f) => self.filters.push(f),
                Err(e) => warn!(input = s, error = %e, "skipping raw query string"),
            }
        }
        self
    }

    /// Or-filters must carry a key and a non-empty operator.
    pub fn set_or_filters(&mut self, filters: Vec<ConsoleFilter>) -> Result<&mut Self, QueryError> {
        for (index, f) in filters.iter().enumerate() {
            check_or_filter(index, f)?;
        }
        self.or_filters = filters;
        Ok(self)
    }

    pub fn add_or_filter(&mut self, filter: ConsoleFilter) -> Result<&mut Self, QueryError> {
        check_or_filter(self.or_filters.len(), &filter)?;
        self.or_filters.push(filter);
        Ok(self)
    }

    pub fn filters(&self) -> &[ConsoleFilter] {
        &self.filters
    }

    pub fn or_filters(&self) -> &[ConsoleFilter] {
        &self.or_filters
    }

    pub fn raw_queries(&self) -> Vec<RawQuery> {
        self.filters.iter().map(ConsoleFilter::to_raw).collect()
    }

    pub fn raw_query_strings(&self) -> Vec<String> {
        self.raw_queries().iter().map(|q| Value::from(q.clone()).to_string()).collect()
    }

    pub fn raw_query_string(&self) -> String {
        Value::from(self.raw_queries().into_iter().map(Value::from).collect::<Vec<_>>()).to_string()
    }

    pub fn api_query(&self) -> ApiQuery {
        let (filter, keywords) = convert_filters(&self.filters, self.timezone);
        let (filter_or, _) = convert_filters(&self.or_filters, self.timezone);
        ApiQuery { filter, filter_or, keyword: keywords.join(" ") }
    }
}

fn is_null_like(v: &Value) -> bool {
    match v {
        Value::Null => true,
        Value::String(s) => s == "null",
        _ => false,
    }
}

fn convert_filters(filters: &[ConsoleFilter], tz: Tz) -> (Vec<ApiFilter>, Vec<String>) {
    let mut api = Vec::new();
    let mut keywords = Vec::new();

    for f in filters {
        let Some(key) = f.k.as_deref() else {
            match &f.v {
                Value::Null => {}
                Value::Array(values) => {
                    keywords.extend(values.iter().map(|v| value_text(v).trim().to_string()));
                }
                v => keywords.push(value_text(v).trim().to_string()),
            }
            continue;
        };

        let (op, value) = if is_null_like(&f.v) {
            let negated = f.o.is_some_and(|o| o.is_negated());
            (if negated { Operator::NotEq } else { Operator::Eq }, Value::Null)
        } else {
            (f.o.unwrap_or(Operator::Contain), f.v.clone())
        };

        if op.is_datetime() {
            let values = match &value {
                Value::Array(values) => values.clone(),
                v => vec![v.clone()],
            };
            for v in values {
                match datetime_filters(key, &value_text(&v), op, tz) {
                    Ok(fs) => api.extend(fs),
                    Err(e) => warn!(key, error = %e, "skipping datetime filter"),
                }
            }
            continue;
        }

        match value {
            Value::Array(values) => {
                let values: Vec<Value> = if key.starts_with("tags.") {
                    values
                        .into_iter()
                        .map(|v| if is_null_like(&v) { Value::Null } else { v })
                        .collect()
                } else {
                    values
                };
                match op.plural_api() {
                    Some(plural) => api.push(ApiFilter::new(key, values, plural)),
                    None => {
                        api.extend(values.into_iter().map(|v| ApiFilter::new(key, v, op.api())));
                    }
                }
            }
            v => api.push(ApiFilter::new(key, v, op.api())),
        }
    }

    (api, keywords)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::operators::ApiOperator;
    use serde_json::json;

    fn api(filters: Vec<ConsoleFilter>) -> Vec<ApiFilter> {
        QueryHelper::new().set_filters(filters).api_query().filter
    }

    #[test]
    fn test_empty_helper() {
        assert_eq!(QueryHelper::new().api_query(), ApiQuery::default());
    }

    #[test]
    fn test_single_value_operators() {
        let cases = [
            (Operator::Contain, ApiOperator::Contain),
            (Operator::NotContain, ApiOperator::NotContain),
            (Operator::Eq, ApiOperator::Eq),
            (Operator::NotEq, ApiOperator::Not),
            (Operator::Regex, ApiOperator::Regex),
            (Operator::Gt, ApiOperator::Gt),
            (Operator::Gte, ApiOperator::Gte),
            (Operator::Lt, ApiOperator::Lt),
            (Operator::Lte, ApiOperator::Lte),
            (Operator::TimediffGt, ApiOperator::TimediffGt),
        ];
        for (op, expected) in cases {
            assert_eq!(api(vec![ConsoleFilter::new("name", "test", op)]), vec![ApiFilter::new(
                "name", "test", expected
            )]);
        }
    }

    #[test]
    fn test_plural_values() {
        let values = json!(["test1", "test2"]);
        assert_eq!(
            api(vec![ConsoleFilter::new("name", values.clone(), Operator::Eq)]),
            vec![ApiFilter::new("name", values.clone(), ApiOperator::In)]
        );
        assert_eq!(
            api(vec![ConsoleFilter::new("name", values.clone(), Operator::Regex)]),
            vec![ApiFilter::new("name", values.clone(), ApiOperator::RegexIn)]
        );
        assert_eq!(
            api(vec![ConsoleFilter::new("name", values, Operator::Gt)]),
            vec![
                ApiFilter::new("name", "test1", ApiOperator::Gt),
                ApiFilter::new("name", "test2", ApiOperator::Gt),
            ]
        );
    }

    #[test]
    fn test_null_values() {
        assert_eq!(
            api(vec![ConsoleFilter::new("owner", Value::Null, Operator::NotContain)]),
            vec![ApiFilter::new("owner", Value::Null, ApiOperator::Not)]
        );
        assert_eq!(
            api(vec![ConsoleFilter::new("owner", "null", Operator::Contain)]),
            vec![ApiFilter::new("owner", Value::Null, ApiOperator::Eq)]
        );
    }

    #[test]
    fn test_tag_arrays_normalize_null_strings() {
        assert_eq!(
            api(vec![ConsoleFilter::new("tags.env", json!(["prod", "null"]), Operator::Eq)]),
            vec![ApiFilter::new("tags.env", json!(["prod", null]), ApiOperator::In)]
        );
        assert_eq!(
            api(vec![ConsoleFilter::new("labels", json!(["null"]), Operator::Eq)]),
            vec![ApiFilter::new("labels", json!(["null"]), ApiOperator::In)]
        );
    }

    #[test]
    fn test_keywords_are_trimmed_and_joined() {
        let query = QueryHelper::new()
            .set_filters(vec![
                ConsoleFilter::keyword(" web "),
                ConsoleFilter::keyword(json!(["db", 3])),
                ConsoleFilter::keyword(Value::Null),
            ])
            .api_query();
        assert_eq!(query.keyword, "web db 3");
        assert!(query.filter.is_empty());
    }

    #[test]
    fn test_datetime_in_configured_timezone() {
        let query = QueryHelper::new()
            .set_timezone(Tz::Asia__Seoul)
            .set_filters(vec![ConsoleFilter::new("created_at", "2021-05-01", Operator::DatetimeEq)])
            .api_query();
        assert_eq!(
            query.filter,
            vec![
                ApiFilter::new("created_at", "2021-04-30T15:00:00.000Z", ApiOperator::DatetimeGte),
                ApiFilter::new("created_at", "2021-05-01T15:00:00.000Z", ApiOperator::DatetimeLt),
            ]
        );
    }

    #[test]
    fn test_invalid_datetime_is_skipped() {
        assert!(api(vec![ConsoleFilter::new("t", "soon", Operator::DatetimeGt)]).is_empty());
    }

    #[test]
    fn test_or_filters_require_key_and_operator() {
        let mut helper = QueryHelper::new();
        let err = helper
            .set_or_filters(vec![
                ConsoleFilter::new("a", "1", Operator::Eq),
                ConsoleFilter::new("b", "2", Operator::Contain),
            ])
            .unwrap_err();
        assert_eq!(err, QueryError::OrFilterIncomplete { index: 1 });

        let err = helper.add_or_filter(ConsoleFilter::keyword("x")).unwrap_err();
        assert_eq!(err, QueryError::OrFilterIncomplete { index: 0 });

        helper.add_or_filter(ConsoleFilter::new("state", "RUNNING", Operator::Eq)).unwrap();
        assert_eq!(
            helper.api_query().filter_or,
            vec![ApiFilter::new("state", "RUNNING", ApiOperator::Eq)]
        );
    }

    #[test]
    fn test_raw_query_strings_round_trip() {
        let mut helper = QueryHelper::new();
        helper.set_filters_as_raw_query_strings([r#"["aws","provider","="]"#, "broken", r#"["text"]"#]);
        assert_eq!(helper.filters().len(), 2);
        assert_eq!(helper.raw_query_strings(), vec![r#"["aws","provider","="]"#, r#"["text"]"#]);
        assert_eq!(helper.raw_query_string(), r#"[["aws","provider","="],["text"]]"#);
        assert_eq!(helper.api_query().keyword, "text");
    }

    #[test]
    fn test_invalid_timezone_name() {
        let mut helper = QueryHelper::new();
        assert_eq!(
            helper.set_timezone_name("Nowhere/City").unwrap_err(),
            QueryError::InvalidTimezone("Nowhere/City".to_string())
        );
        assert!(helper.set_timezone_name("Europe/Paris").is_ok());
    }
}
