//! Granularity and the granularity -> date format lookup.

use serde::{Deserialize, Serialize};

use super::errors::DateRangeError;

/// Time bucket used both for date arithmetic and for display formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Granularity {
    Daily,
    Monthly,
    Yearly,
}

impl Granularity {
    pub const ALL: [Granularity; 3] = [Self::Daily, Self::Monthly, Self::Yearly];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "DAILY",
            Self::Monthly => "MONTHLY",
            Self::Yearly => "YEARLY",
        }
    }

    /// `chrono` format string for committed (non-preview) output.
    pub fn date_format(&self) -> &'static str {
        match self {
            Self::Daily => "%Y-%m-%d",
            Self::Monthly => "%Y-%m",
            Self::Yearly => "%Y",
        }
    }

    /// Human-readable form of [`Self::date_format`].
    pub fn display_pattern(&self) -> &'static str {
        match self {
            Self::Daily => "YYYY-MM-DD",
            Self::Monthly => "YYYY-MM",
            Self::Yearly => "YYYY",
        }
    }
}

impl Default for Granularity {
    fn default() -> Self {
        Self::Monthly
    }
}

impl std::fmt::Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Granularity {
    type Err = DateRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" | "day" | "d" => Ok(Self::Daily),
            "monthly" | "month" | "m" => Ok(Self::Monthly),
            "yearly" | "year" | "y" => Ok(Self::Yearly),
            _ => Err(DateRangeError::UnknownGranularity(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_granularity_from_str() {
        assert_eq!("DAILY".parse::<Granularity>().unwrap(), Granularity::Daily);
        assert_eq!("monthly".parse::<Granularity>().unwrap(), Granularity::Monthly);
        assert_eq!("Year".parse::<Granularity>().unwrap(), Granularity::Yearly);
        assert!("weekly".parse::<Granularity>().is_err());
    }

    #[test]
    fn test_format_lookup() {
        assert_eq!(Granularity::Daily.date_format(), "%Y-%m-%d");
        assert_eq!(Granularity::Monthly.display_pattern(), "YYYY-MM");
        assert_eq!(Granularity::Yearly.to_string(), "YEARLY");
    }

    #[test]
    fn test_granularity_serde() {
        let g: Granularity = serde_json::from_str(r#""MONTHLY""#).unwrap();
        assert_eq!(g, Granularity::Monthly);
        assert_eq!(serde_json::to_string(&Granularity::Daily).unwrap(), r#""DAILY""#);
    }
}
