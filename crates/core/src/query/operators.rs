//! Console filter operators and their API counterparts.

use serde::{Deserialize, Serialize};

use super::errors::QueryError;

/// Operator as typed in the console search bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "")]
    Contain,
    #[serde(rename = "!")]
    NotContain,
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "!=")]
    NotEq,
    #[serde(rename = "~", alias = "$")]
    Regex,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Gte,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Lte,
    #[serde(rename = "=t")]
    DatetimeEq,
    #[serde(rename = ">t")]
    DatetimeGt,
    #[serde(rename = ">=t")]
    DatetimeGte,
    #[serde(rename = "<t")]
    DatetimeLt,
    #[serde(rename = "<=t")]
    DatetimeLte,
    #[serde(rename = ">td")]
    TimediffGt,
    #[serde(rename = ">=td")]
    TimediffGte,
    #[serde(rename = "<td")]
    TimediffLt,
    #[serde(rename = "<=td")]
    TimediffLte,
}

const ALL_OPERATORS: &[Operator] = &[
    Operator::Contain,
    Operator::NotContain,
    Operator::Eq,
    Operator::NotEq,
    Operator::Regex,
    Operator::Gt,
    Operator::Gte,
    Operator::Lt,
    Operator::Lte,
    Operator::DatetimeEq,
    Operator::DatetimeGt,
    Operator::DatetimeGte,
    Operator::DatetimeLt,
    Operator::DatetimeLte,
    Operator::TimediffGt,
    Operator::TimediffGte,
    Operator::TimediffLt,
    Operator::TimediffLte,
];

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Contain => "",
            Self::NotContain => "!",
            Self::Eq => "=",
            Self::NotEq => "!=",
            Self::Regex => "~",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::DatetimeEq => "=t",
            Self::DatetimeGt => ">t",
            Self::DatetimeGte => ">=t",
            Self::DatetimeLt => "<t",
            Self::DatetimeLte => "<=t",
            Self::TimediffGt => ">td",
            Self::TimediffGte => ">=td",
            Self::TimediffLt => "<td",
            Self::TimediffLte => "<=td",
        }
    }

    pub fn is_negated(&self) -> bool {
        self.as_str().starts_with('!')
    }

    pub fn is_datetime(&self) -> bool {
        matches!(
            self,
            Self::DatetimeEq
                | Self::DatetimeGt
                | Self::DatetimeGte
                | Self::DatetimeLt
                | Self::DatetimeLte
        )
    }

    /// API operator for a single value.
    pub fn api(&self) -> ApiOperator {
        match self {
            Self::Contain => ApiOperator::Contain,
            Self::NotContain => ApiOperator::NotContain,
            Self::Eq => ApiOperator::Eq,
            Self::NotEq => ApiOperator::Not,
            Self::Regex => ApiOperator::Regex,
            Self::Gt => ApiOperator::Gt,
            Self::Gte => ApiOperator::Gte,
            Self::Lt => ApiOperator::Lt,
            Self::Lte => ApiOperator::Lte,
            Self::DatetimeEq | Self::DatetimeGte => ApiOperator::DatetimeGte,
            Self::DatetimeGt => ApiOperator::DatetimeGt,
            Self::DatetimeLt => ApiOperator::DatetimeLt,
            Self::DatetimeLte => ApiOperator::DatetimeLte,
            Self::TimediffGt => ApiOperator::TimediffGt,
            Self::TimediffGte => ApiOperator::TimediffGte,
            Self::TimediffLt => ApiOperator::TimediffLt,
            Self::TimediffLte => ApiOperator::TimediffLte,
        }
    }

    /// API operator taking the whole value list, if one exists.
    pub fn plural_api(&self) -> Option<ApiOperator> {
        match self {
            Self::Contain => Some(ApiOperator::ContainIn),
            Self::NotContain => Some(ApiOperator::NotContainIn),
            Self::Eq => Some(ApiOperator::In),
            Self::NotEq => Some(ApiOperator::NotIn),
            Self::Regex => Some(ApiOperator::RegexIn),
            _ => None,
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Operator {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "$" {
            return Ok(Self::Regex);
        }
        ALL_OPERATORS
            .iter()
            .copied()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| QueryError::InvalidOperator(s.to_string()))
    }
}

/// Operator understood by the backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiOperator {
    Contain,
    NotContain,
    Eq,
    Not,
    Regex,
    Gt,
    Gte,
    Lt,
    Lte,
    ContainIn,
    NotContainIn,
    In,
    NotIn,
    RegexIn,
    DatetimeGt,
    DatetimeGte,
    DatetimeLt,
    DatetimeLte,
    TimediffGt,
    TimediffGte,
    TimediffLt,
    TimediffLte,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_operators() {
        for op in ALL_OPERATORS {
            assert_eq!(op.as_str().parse::<Operator>().unwrap(), *op);
        }
        assert_eq!("$".parse::<Operator>().unwrap(), Operator::Regex);
        assert!(matches!("=~".parse::<Operator>(), Err(QueryError::InvalidOperator(_))));
    }

    #[test]
    fn test_single_and_plural_maps() {
        assert_eq!(Operator::Contain.api(), ApiOperator::Contain);
        assert_eq!(Operator::NotEq.api(), ApiOperator::Not);
        assert_eq!(Operator::Eq.plural_api(), Some(ApiOperator::In));
        assert_eq!(Operator::Regex.plural_api(), Some(ApiOperator::RegexIn));
        assert_eq!(Operator::Gt.plural_api(), None);
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&Operator::Contain).unwrap(), r#""""#);
        assert_eq!(serde_json::to_string(&ApiOperator::NotContainIn).unwrap(), r#""not_contain_in""#);
        let op: Operator = serde_json::from_str(r#""<=td""#).unwrap();
        assert_eq!(op, Operator::TimediffLte);
    }

    #[test]
    fn test_negation() {
        assert!(Operator::NotContain.is_negated());
        assert!(Operator::NotEq.is_negated());
        assert!(!Operator::Eq.is_negated());
    }
}
