//! Console filters, their raw `[value, key, operator]` form and API filters.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::QueryError;
use super::operators::{ApiOperator, Operator};

/// One console filter. A filter without a key is a free-text keyword.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsoleFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub k: Option<String>,
    #[serde(default)]
    pub v: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub o: Option<Operator>,
}

/// Raw query: a JSON array `[value]`, `[value, key]` or
/// `[value, key, operator]`.
pub type RawQuery = Vec<Value>;

impl ConsoleFilter {
    pub fn new(k: impl Into<String>, v: impl Into<Value>, o: Operator) -> Self {
        Self { k: Some(k.into()), v: v.into(), o: Some(o) }
    }

    pub fn keyword(v: impl Into<Value>) -> Self {
        Self { k: None, v: v.into(), o: None }
    }

    pub fn to_raw(&self) -> RawQuery {
        match (&self.k, &self.o) {
            (Some(k), Some(o)) => vec![self.v.clone(), Value::from(k.as_str()), Value::from(o.as_str())],
            (Some(k), None) => vec![self.v.clone(), Value::from(k.as_str())],
            (None, _) => vec![self.v.clone()],
        }
    }

    pub fn from_raw(raw: &[Value]) -> Result<Self, QueryError> {
        if raw.is_empty() || raw.len() > 3 {
            return Err(QueryError::InvalidRawQuery(format!(
                "expected 1 to 3 elements, got {}",
                raw.len()
            )));
        }
        let k = match raw.get(1) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => {
                return Err(QueryError::InvalidRawQuery(format!("key must be a string, got {other}")));
            }
        };
        let o = match raw.get(2) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.parse::<Operator>()?),
            Some(other) => {
                return Err(QueryError::InvalidRawQuery(format!(
                    "operator must be a string, got {other}"
                )));
            }
        };
        Ok(Self { k, v: raw[0].clone(), o })
    }

    /// Parse a raw query string such as `["aws","provider","="]`.
    pub fn from_raw_str(s: &str) -> Result<Self, QueryError> {
        let raw: RawQuery =
            serde_json::from_str(s).map_err(|e| QueryError::InvalidRawQuery(format!("{s}: {e}")))?;
        Self::from_raw(&raw)
    }
}

/// A filter in the backend API's vocabulary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiFilter {
    pub k: String,
    pub v: Value,
    pub o: ApiOperator,
}

impl ApiFilter {
    pub fn new(k: impl Into<String>, v: impl Into<Value>, o: ApiOperator) -> Self {
        Self { k: k.into(), v: v.into(), o }
    }
}

/// Render a value as keyword text.
pub(crate) fn value_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_raw_forms() {
        let full = ConsoleFilter::new("provider", "aws", Operator::Eq);
        assert_eq!(full.to_raw(), vec![json!("aws"), json!("provider"), json!("=")]);

        let no_op = ConsoleFilter { k: Some("name".to_string()), v: json!("x"), o: None };
        assert_eq!(no_op.to_raw(), vec![json!("x"), json!("name")]);

        assert_eq!(ConsoleFilter::keyword("free text").to_raw(), vec![json!("free text")]);
    }

    #[test]
    fn test_from_raw_str() {
        let f = ConsoleFilter::from_raw_str(r#"["aws","provider","="]"#).unwrap();
        assert_eq!(f, ConsoleFilter::new("provider", "aws", Operator::Eq));

        let kw = ConsoleFilter::from_raw_str(r#"["hello"]"#).unwrap();
        assert_eq!(kw, ConsoleFilter::keyword("hello"));
    }

    #[test]
    fn test_from_raw_rejects_malformed() {
        assert!(matches!(ConsoleFilter::from_raw_str("not json"), Err(QueryError::InvalidRawQuery(_))));
        assert!(matches!(ConsoleFilter::from_raw_str("[]"), Err(QueryError::InvalidRawQuery(_))));
        assert!(matches!(ConsoleFilter::from_raw_str(r#"["v", 3]"#), Err(QueryError::InvalidRawQuery(_))));
        assert!(matches!(
            ConsoleFilter::from_raw_str(r#"["v", "k", "=~"]"#),
            Err(QueryError::InvalidOperator(_))
        ));
    }

    #[test]
    fn test_deserialize_console_filter() {
        let f: ConsoleFilter = serde_json::from_str(r#"{"k":"name","v":["a","b"],"o":"!"}"#).unwrap();
        assert_eq!(f.o, Some(Operator::NotContain));
        assert_eq!(f.v, json!(["a", "b"]));
    }
}
