//! Calendar arithmetic on `NaiveDate`: month/year offsets, period snapping
//! and lenient parsing of partial date strings.
//!
//! All arithmetic is calendar-only (no time of day), which keeps every
//! computation in UTC terms.

use std::sync::LazyLock;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::errors::DateRangeError;
use super::granularity::Granularity;

static PARTIAL_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4})(?:-(\d{1,2})(?:-(\d{1,2}))?)?(?:[T ].*)?$").expect("valid regex")
});

/// First day of the week for week-based presets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    fn weekday(self) -> Weekday {
        match self {
            Self::Sunday => Weekday::Sun,
            Self::Monday => Weekday::Mon,
        }
    }
}

impl std::fmt::Display for WeekStart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sunday => write!(f, "sunday"),
            Self::Monday => write!(f, "monday"),
        }
    }
}

impl std::str::FromStr for WeekStart {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sunday" | "sun" => Ok(Self::Sunday),
            "monday" | "mon" => Ok(Self::Monday),
            _ => Err(format!("unknown week start: {s}")),
        }
    }
}

/// Parse `YYYY`, `YYYY-MM`, `YYYY-MM-DD` (single-digit month/day allowed).
///
/// A trailing time component (`T...` or ` ...`) is ignored. Missing month or
/// day default to 1.
pub fn parse_date_string(input: &str) -> Result<NaiveDate, DateRangeError> {
    let s = input.trim();
    let caps = PARTIAL_DATE_RE
        .captures(s)
        .ok_or_else(|| DateRangeError::InvalidDate(input.to_string()))?;

    let number = |idx: usize, default: u32| -> Result<u32, DateRangeError> {
        match caps.get(idx) {
            Some(m) => m
                .as_str()
                .parse()
                .map_err(|_| DateRangeError::InvalidDate(input.to_string())),
            None => Ok(default),
        }
    };

    let year: i32 = caps[1]
        .parse()
        .map_err(|_| DateRangeError::InvalidDate(input.to_string()))?;
    let month = number(2, 1)?;
    let day = number(3, 1)?;

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| DateRangeError::InvalidDate(input.to_string()))
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if year % 4 == 0 && (year % 100 != 0 || year % 400 == 0) {
                29
            } else {
                28
            }
        }
        _ => 30,
    }
}

/// Add (or subtract) whole months, clamping the day to the target month.
///
/// Returns `None` when the result falls outside chrono's calendar.
pub fn add_months(date: NaiveDate, months: i64) -> Option<NaiveDate> {
    let total_months =
        (i64::from(date.year()) * 12 + i64::from(date.month0())).checked_add(months)?;
    let new_year = i32::try_from(total_months.div_euclid(12)).ok()?;
    let new_month = (total_months.rem_euclid(12) + 1) as u32;

    // Jan 31 + 1 month = Feb 28/29
    let new_day = date.day().min(days_in_month(new_year, new_month));

    NaiveDate::from_ymd_opt(new_year, new_month, new_day)
}

pub fn add_years(date: NaiveDate, years: i64) -> Option<NaiveDate> {
    add_months(date, years.checked_mul(12)?)
}

pub fn add_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    date.checked_add_signed(Duration::try_days(days)?)
}

pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn end_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(days_in_month(date.year(), date.month())).unwrap_or(date)
}

pub fn is_end_of_month(date: NaiveDate) -> bool {
    date.day() == days_in_month(date.year(), date.month())
}

pub fn start_of_year(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date)
}

pub fn end_of_year(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), 12, 31).unwrap_or(date)
}

pub fn start_of_week(date: NaiveDate, week_start: WeekStart) -> Option<NaiveDate> {
    let offset = (7 + date.weekday().num_days_from_monday()
        - week_start.weekday().num_days_from_monday())
        % 7;
    add_days(date, -i64::from(offset))
}

pub fn end_of_week(date: NaiveDate, week_start: WeekStart) -> Option<NaiveDate> {
    add_days(start_of_week(date, week_start)?, 6)
}

/// Snap to the first day of the granularity's period.
pub fn start_of_period(date: NaiveDate, granularity: Granularity) -> NaiveDate {
    match granularity {
        Granularity::Daily => date,
        Granularity::Monthly => start_of_month(date),
        Granularity::Yearly => start_of_year(date),
    }
}

/// Snap to the last day of the granularity's period.
pub fn end_of_period(date: NaiveDate, granularity: Granularity) -> NaiveDate {
    match granularity {
        Granularity::Daily => date,
        Granularity::Monthly => end_of_month(date),
        Granularity::Yearly => end_of_year(date),
    }
}

/// Shift by `amount` units of the granularity (days, months or years).
pub fn shift(date: NaiveDate, granularity: Granularity, amount: i64) -> Option<NaiveDate> {
    match granularity {
        Granularity::Daily => add_days(date, amount),
        Granularity::Monthly => add_months(date, amount),
        Granularity::Yearly => add_years(date, amount),
    }
}
