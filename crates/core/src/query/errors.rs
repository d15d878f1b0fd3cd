//! Error types for the query helper.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QueryError {
    /// An or-filter lacks a key or an operator.
    #[error("or-filter at index {index} must have a key and an operator")]
    OrFilterIncomplete { index: usize },

    #[error("unknown filter operator: '{0}'")]
    InvalidOperator(String),

    /// Raw query is not a JSON `[value, key?, operator?]` array.
    #[error("invalid raw query: {0}")]
    InvalidRawQuery(String),

    #[error("unknown timezone: '{0}'")]
    InvalidTimezone(String),

    /// Datetime filter value could not be parsed or localized.
    #[error("invalid datetime value: '{0}'")]
    InvalidDatetime(String),
}
