//! Date-range selector: the tagged union of the four ways a widget can ask
//! for a date range.

use serde::{Deserialize, Serialize};

use super::errors::DateRangeError;
use super::granularity::Granularity;

/// Named relative range shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PresetKey {
    Auto,
    // Monthly
    ThisMonth,
    LastMonth,
    LastTwoMonths,
    ThisQuarter,
    LastQuarter,
    // Daily
    Today,
    Yesterday,
    LastTwoDays,
    LastSevenDays,
    LastFourteenDays,
    LastThirtyDays,
    ThisWeek,
    ThisWeekToDate,
    LastWeek,
    // Yearly
    ThisYear,
    LastYear,
    LastTwoYears,
}

const MONTHLY_PRESETS: &[PresetKey] = &[
    PresetKey::Auto,
    PresetKey::ThisMonth,
    PresetKey::LastMonth,
    PresetKey::LastTwoMonths,
    PresetKey::ThisQuarter,
    PresetKey::LastQuarter,
];

const DAILY_PRESETS: &[PresetKey] = &[
    PresetKey::Auto,
    PresetKey::Today,
    PresetKey::Yesterday,
    PresetKey::LastTwoDays,
    PresetKey::LastSevenDays,
    PresetKey::LastFourteenDays,
    PresetKey::LastThirtyDays,
    PresetKey::ThisWeek,
    PresetKey::ThisWeekToDate,
    PresetKey::LastWeek,
];

const YEARLY_PRESETS: &[PresetKey] =
    &[PresetKey::Auto, PresetKey::ThisYear, PresetKey::LastYear, PresetKey::LastTwoYears];

impl PresetKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::ThisMonth => "thisMonth",
            Self::LastMonth => "lastMonth",
            Self::LastTwoMonths => "lastTwoMonths",
            Self::ThisQuarter => "thisQuarter",
            Self::LastQuarter => "lastQuarter",
            Self::Today => "today",
            Self::Yesterday => "yesterday",
            Self::LastTwoDays => "lastTwoDays",
            Self::LastSevenDays => "lastSevenDays",
            Self::LastFourteenDays => "lastFourteenDays",
            Self::LastThirtyDays => "lastThirtyDays",
            Self::ThisWeek => "thisWeek",
            Self::ThisWeekToDate => "thisWeekToDate",
            Self::LastWeek => "lastWeek",
            Self::ThisYear => "thisYear",
            Self::LastYear => "lastYear",
            Self::LastTwoYears => "lastTwoYears",
        }
    }

    /// Presets accepted for a granularity.
    pub fn vocabulary(granularity: Granularity) -> &'static [PresetKey] {
        match granularity {
            Granularity::Daily => DAILY_PRESETS,
            Granularity::Monthly => MONTHLY_PRESETS,
            Granularity::Yearly => YEARLY_PRESETS,
        }
    }

    pub fn is_valid_for(&self, granularity: Granularity) -> bool {
        Self::vocabulary(granularity).contains(self)
    }

    /// Parse a preset key, reporting failures against `granularity`.
    pub fn parse_for(key: &str, granularity: Granularity) -> Result<Self, DateRangeError> {
        key.parse::<PresetKey>().map_err(|_| DateRangeError::UnrecognizedPreset {
            key: key.to_string(),
            granularity,
        })
    }
}

impl std::fmt::Display for PresetKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PresetKey {
    type Err = DateRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let all = DAILY_PRESETS.iter().chain(MONTHLY_PRESETS).chain(YEARLY_PRESETS);
        all.copied()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DateRangeError::InvalidSelector(format!("unknown preset key: {s}")))
    }
}

/// Direction of an advanced offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdvancedOperator {
    #[serde(alias = "+", alias = "ADD")]
    Add,
    #[serde(alias = "-", alias = "SUBTRACT")]
    Subtract,
}

impl AdvancedOperator {
    /// Apply the operator's sign to a magnitude.
    pub fn signed(&self, magnitude: u32) -> i64 {
        match self {
            Self::Add => i64::from(magnitude),
            Self::Subtract => -i64::from(magnitude),
        }
    }
}

impl std::str::FromStr for AdvancedOperator {
    type Err = DateRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "add" | "+" => Ok(Self::Add),
            "subtract" | "sub" | "-" => Ok(Self::Subtract),
            _ => Err(DateRangeError::InvalidSelector(format!("unknown operator: {s}"))),
        }
    }
}

/// One signed bound of an [`DateRangeSelector::AdvancedOffset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offset {
    pub operator: AdvancedOperator,
    pub value: u32,
}

impl Offset {
    pub fn add(value: u32) -> Self {
        Self { operator: AdvancedOperator::Add, value }
    }

    pub fn subtract(value: u32) -> Self {
        Self { operator: AdvancedOperator::Subtract, value }
    }

    pub fn signed(&self) -> i64 {
        self.operator.signed(self.value)
    }
}

/// How a widget asks for its date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DateRangeSelector {
    /// Named relative range from the granularity's vocabulary.
    Preset { key: PresetKey },
    /// Absolute (possibly partial) dates used verbatim.
    CustomFixed { start: String, end: String },
    /// Day-of-month, month-of-year or literal year, depending on granularity.
    CustomRelativeUnit { start: u32, end: u32 },
    /// Signed offsets from the anchor in units of the granularity.
    AdvancedOffset { start: Offset, end: Offset },
}

impl DateRangeSelector {
    pub fn preset(key: PresetKey) -> Self {
        Self::Preset { key }
    }
}

impl Default for DateRangeSelector {
    fn default() -> Self {
        Self::Preset { key: PresetKey::Auto }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_round_trip_names() {
        for g in Granularity::ALL {
            for p in PresetKey::vocabulary(g) {
                assert_eq!(p.as_str().parse::<PresetKey>().unwrap(), *p);
            }
        }
    }

    #[test]
    fn test_preset_vocabulary_is_granularity_specific() {
        assert!(PresetKey::ThisQuarter.is_valid_for(Granularity::Monthly));
        assert!(!PresetKey::ThisQuarter.is_valid_for(Granularity::Daily));
        assert!(PresetKey::Auto.is_valid_for(Granularity::Yearly));
        assert!(!PresetKey::Today.is_valid_for(Granularity::Yearly));
    }

    #[test]
    fn test_parse_for_reports_granularity() {
        let err = PresetKey::parse_for("nextDecade", Granularity::Yearly).unwrap_err();
        assert_eq!(
            err,
            DateRangeError::UnrecognizedPreset {
                key: "nextDecade".to_string(),
                granularity: Granularity::Yearly
            }
        );
    }

    #[test]
    fn test_operator_sign() {
        assert_eq!(Offset::subtract(3).signed(), -3);
        assert_eq!(Offset::add(2).signed(), 2);
        assert_eq!("-".parse::<AdvancedOperator>().unwrap(), AdvancedOperator::Subtract);
    }

    #[test]
    fn test_selector_deserialize_tagged() {
        let json = r#"{"type":"advanced_offset","start":{"operator":"subtract","value":2},"end":{"operator":"add","value":0}}"#;
        let sel: DateRangeSelector = serde_json::from_str(json).unwrap();
        assert_eq!(
            sel,
            DateRangeSelector::AdvancedOffset { start: Offset::subtract(2), end: Offset::add(0) }
        );
    }
}
