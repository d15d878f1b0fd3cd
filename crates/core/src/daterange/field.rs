//! Stored form of a widget's date-range field.
//!
//! Widgets persist the date range loosely:
//!
//! ```json
//! { "inherit": true, "options": { "value": "custom", "start": 1, "end": 15 } }
//! ```
//!
//! [`DateRangeFieldValue::to_request`] turns that shape into a tagged
//! [`DateRangeSelector`] so callers get an exhaustive match instead of
//! probing for fields.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::errors::DateRangeError;
use super::granularity::Granularity;
use super::resolver::DateRangeRequest;
use super::selector::{AdvancedOperator, DateRangeSelector, Offset, PresetKey};

const CUSTOM: &str = "custom";
const ADVANCED: &str = "advanced";

/// A bound as stored: either a number or a (possibly partial) date string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BoundValue {
    Number(i64),
    Text(String),
}

impl BoundValue {
    fn as_text(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        }
    }

    fn as_unsigned(&self, field: &'static str) -> Result<u32, DateRangeError> {
        let n = match self {
            Self::Number(n) => *n,
            Self::Text(s) => s.trim().parse::<i64>().map_err(|_| {
                DateRangeError::InvalidSelector(format!("{field} must be a number, got '{s}'"))
            })?,
        };
        u32::try_from(n).map_err(|_| DateRangeError::OutOfRange {
            field,
            value: n,
            min: 0,
            max: i64::from(u32::MAX),
        })
    }
}

/// The `options` object of a stored date-range field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRangeOptions {
    /// Preset key, `"custom"` or `"advanced"`. Defaults to `auto`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<BoundValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<BoundValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_operator: Option<AdvancedOperator>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_operator: Option<AdvancedOperator>,
}

/// A widget's stored date-range field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRangeFieldValue {
    /// Whether the widget follows the dashboard's base date.
    #[serde(default)]
    pub inherit: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<DateRangeOptions>,
}

impl DateRangeFieldValue {
    /// Build the selector encoded by this field value.
    pub fn selector(&self, granularity: Granularity) -> Result<DateRangeSelector, DateRangeError> {
        let options = self.options.clone().unwrap_or_default();
        let key = options.value.as_deref().unwrap_or("auto");

        match key {
            CUSTOM => {
                let (start, end) = required_bounds(&options)?;
                if self.inherit {
                    Ok(DateRangeSelector::CustomRelativeUnit {
                        start: start.as_unsigned("start")?,
                        end: end.as_unsigned("end")?,
                    })
                } else {
                    Ok(DateRangeSelector::CustomFixed { start: start.as_text(), end: end.as_text() })
                }
            }
            ADVANCED => {
                let magnitude = |bound: &Option<BoundValue>, field| match bound {
                    Some(b) => b.as_unsigned(field),
                    None => Ok(0),
                };
                let start = Offset {
                    operator: options.start_operator.unwrap_or(AdvancedOperator::Subtract),
                    value: magnitude(&options.start, "start")?,
                };
                let end = Offset {
                    operator: options.end_operator.unwrap_or(AdvancedOperator::Subtract),
                    value: magnitude(&options.end, "end")?,
                };
                Ok(DateRangeSelector::AdvancedOffset { start, end })
            }
            other => Ok(DateRangeSelector::Preset { key: PresetKey::parse_for(other, granularity)? }),
        }
    }

    /// Build a full resolver request. The dashboard's `base_on_date` only
    /// anchors the range when the field inherits it.
    pub fn to_request(
        &self,
        granularity: Granularity,
        base_on_date: Option<NaiveDate>,
        preview: bool,
    ) -> Result<DateRangeRequest, DateRangeError> {
        let anchor = if self.inherit { base_on_date } else { None };
        Ok(DateRangeRequest::new(granularity, self.selector(granularity)?)
            .with_anchor(anchor)
            .with_preview(preview))
    }
}

fn required_bounds(options: &DateRangeOptions) -> Result<(&BoundValue, &BoundValue), DateRangeError> {
    match (&options.start, &options.end) {
        (Some(start), Some(end)) => Ok((start, end)),
        _ => Err(DateRangeError::InvalidSelector(
            "custom date range requires both start and end".to_string(),
        )),
    }
}
