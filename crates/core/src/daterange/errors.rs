//! Error types for date-range resolution.

use thiserror::Error;

use super::granularity::Granularity;

/// Errors raised while resolving a date-range selector.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DateRangeError {
    /// Preset key is not part of the vocabulary for this granularity.
    #[error("unrecognized preset '{key}' for {granularity} granularity")]
    UnrecognizedPreset { key: String, granularity: Granularity },

    /// Date string could not be parsed.
    #[error("invalid date: {0}")]
    InvalidDate(String),

    /// Custom relative value or advanced offset outside its allowed range.
    #[error("{field} value {value} is out of range ({min}..={max})")]
    OutOfRange { field: &'static str, value: i64, min: i64, max: i64 },

    /// Preset arithmetic from this base date leaves the supported calendar.
    #[error("preset '{preset}' cannot be evaluated from {base}: date out of range")]
    CalendarOverflow { preset: String, base: String },

    /// Computed start lies after the computed end.
    #[error("start {start} is after end {end}")]
    InvertedRange { start: String, end: String },

    /// Granularity name not recognised.
    #[error("unknown granularity: {0}")]
    UnknownGranularity(String),

    /// Selector could not be built from its parts.
    #[error("invalid date range selector: {0}")]
    InvalidSelector(String),
}
