//! Resolve a [`DateRangeSelector`] into a concrete, formatted [`DateRange`].
//!
//! Presets are evaluated against a *base date*: the end of the anchor's
//! month when an anchor is given, otherwise today (UTC). Every branch
//! produces a pair of calendar dates which is checked for `start <= end`
//! and then formatted for the granularity (or as raw `YYYY-MM-DD` in
//! preview mode).

use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::calendar::{
    WeekStart, add_days, add_months, add_years, days_in_month, end_of_month, end_of_period,
    end_of_week, end_of_year, is_end_of_month, parse_date_string, shift, start_of_month,
    start_of_period, start_of_week, start_of_year,
};
use super::errors::DateRangeError;
use super::granularity::Granularity;
use super::selector::{DateRangeSelector, Offset, PresetKey};

const PREVIEW_FORMAT: &str = "%Y-%m-%d";

/// A resolved date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

impl DateRange {
    /// Display form used for the widget's period label.
    pub fn period_text(&self) -> String {
        if self.start == self.end {
            self.start.clone()
        } else {
            format!("{} ~ {}", self.start, self.end)
        }
    }
}

/// Window used by the DAILY `auto` preset when the base date is not the
/// last day of its month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DailyAutoWindow {
    /// One calendar month back, plus one day (`2024-03-15` -> `2024-02-16`).
    #[default]
    TrailingMonth,
    /// Fixed 30-day window (base date minus 29 days).
    ThirtyDay,
}

impl std::fmt::Display for DailyAutoWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TrailingMonth => write!(f, "trailing-month"),
            Self::ThirtyDay => write!(f, "thirty-day"),
        }
    }
}

impl std::str::FromStr for DailyAutoWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trailing-month" | "trailing_month" => Ok(Self::TrailingMonth),
            "thirty-day" | "thirty_day" | "30d" => Ok(Self::ThirtyDay),
            _ => Err(format!("unknown daily auto window: {s}")),
        }
    }
}

/// Tunables for the resolver, usually taken from the active config profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverOptions {
    #[serde(default)]
    pub week_start: WeekStart,
    #[serde(default)]
    pub daily_auto: DailyAutoWindow,
}

/// Inputs for a single resolution.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DateRangeRequest {
    pub granularity: Granularity,
    /// Anchor date; today (UTC) when absent.
    pub anchor: Option<NaiveDate>,
    pub selector: DateRangeSelector,
    /// Return raw `YYYY-MM-DD` bounds regardless of granularity.
    pub preview: bool,
}

impl DateRangeRequest {
    pub fn new(granularity: Granularity, selector: DateRangeSelector) -> Self {
        Self { granularity, anchor: None, selector, preview: false }
    }

    pub fn with_anchor(mut self, anchor: Option<NaiveDate>) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn with_preview(mut self, preview: bool) -> Self {
        self.preview = preview;
        self
    }
}

/// Resolve against the current UTC date.
pub fn resolve_date_range(
    request: &DateRangeRequest,
    options: &ResolverOptions,
) -> Result<DateRange, DateRangeError> {
    resolve_date_range_at(request, options, Utc::now().date_naive())
}

/// Resolve with an explicit notion of "today".
pub fn resolve_date_range_at(
    request: &DateRangeRequest,
    options: &ResolverOptions,
    today: NaiveDate,
) -> Result<DateRange, DateRangeError> {
    let (start, end) = resolve_bounds(request, options, today)?;

    if start > end {
        return Err(DateRangeError::InvertedRange {
            start: start.format(PREVIEW_FORMAT).to_string(),
            end: end.format(PREVIEW_FORMAT).to_string(),
        });
    }

    let fmt = if request.preview { PREVIEW_FORMAT } else { request.granularity.date_format() };
    let range =
        DateRange { start: start.format(fmt).to_string(), end: end.format(fmt).to_string() };
    debug!(
        granularity = %request.granularity,
        start = %range.start,
        end = %range.end,
        "resolved date range"
    );
    Ok(range)
}

/// Compute the raw calendar bounds for a request.
pub fn resolve_bounds(
    request: &DateRangeRequest,
    options: &ResolverOptions,
    today: NaiveDate,
) -> Result<(NaiveDate, NaiveDate), DateRangeError> {
    let granularity = request.granularity;
    match &request.selector {
        DateRangeSelector::Preset { key } => {
            let base = request.anchor.map(end_of_month).unwrap_or(today);
            trace!(%base, preset = %key, "evaluating preset");
            preset_bounds(granularity, *key, base, options)
        }
        DateRangeSelector::CustomFixed { start, end } => {
            let start = parse_date_string(start)?;
            let end = parse_date_string(end)?;
            Ok((start_of_period(start, granularity), end_of_period(end, granularity)))
        }
        DateRangeSelector::CustomRelativeUnit { start, end } => {
            relative_unit_bounds(granularity, request.anchor.unwrap_or(today), *start, *end)
        }
        DateRangeSelector::AdvancedOffset { start, end } => {
            let base = request.anchor.map(end_of_month).unwrap_or(today);
            advanced_bounds(granularity, base, start, end)
        }
    }
}

fn preset_bounds(
    granularity: Granularity,
    key: PresetKey,
    base: NaiveDate,
    options: &ResolverOptions,
) -> Result<(NaiveDate, NaiveDate), DateRangeError> {
    if !key.is_valid_for(granularity) {
        return Err(DateRangeError::UnrecognizedPreset { key: key.to_string(), granularity });
    }

    let bounds = match granularity {
        Granularity::Monthly => monthly_preset(key, base),
        Granularity::Daily => daily_preset(key, base, options),
        Granularity::Yearly => yearly_preset(key, base),
    };

    bounds.ok_or_else(|| DateRangeError::CalendarOverflow {
        preset: key.to_string(),
        base: base.format(PREVIEW_FORMAT).to_string(),
    })
}

// The preset tables below only see keys that passed the vocabulary check, so
// `None` means the arithmetic left the calendar.

fn monthly_preset(key: PresetKey, base: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    let month = |offset: i64| -> Option<(NaiveDate, NaiveDate)> {
        let date = add_months(base, offset)?;
        Some((start_of_month(date), end_of_month(date)))
    };

    match key {
        PresetKey::Auto => Some((start_of_month(add_months(base, -11)?), end_of_month(base))),
        PresetKey::ThisMonth => month(0),
        PresetKey::LastMonth => month(-1),
        PresetKey::LastTwoMonths => month(-2),
        PresetKey::ThisQuarter => {
            let start = quarter_start(base)?;
            Some((start, end_of_month(add_months(start, 2)?)))
        }
        PresetKey::LastQuarter => {
            let start = add_months(quarter_start(base)?, -3)?;
            Some((start, end_of_month(add_months(start, 2)?)))
        }
        _ => None,
    }
}

/// First day of the calendar quarter containing `date`
/// (1-3 -> Q1, 4-6 -> Q2, 7-9 -> Q3, 10-12 -> Q4).
fn quarter_start(date: NaiveDate) -> Option<NaiveDate> {
    let first_month = (date.month0() / 3) * 3 + 1;
    NaiveDate::from_ymd_opt(date.year(), first_month, 1)
}

fn daily_preset(
    key: PresetKey,
    base: NaiveDate,
    options: &ResolverOptions,
) -> Option<(NaiveDate, NaiveDate)> {
    let week_start = options.week_start;
    let trailing =
        |days: i64| -> Option<(NaiveDate, NaiveDate)> { Some((add_days(base, -days)?, base)) };

    match key {
        PresetKey::Auto => {
            let start = if is_end_of_month(base) {
                start_of_month(base)
            } else {
                match options.daily_auto {
                    DailyAutoWindow::TrailingMonth => add_days(add_months(base, -1)?, 1)?,
                    DailyAutoWindow::ThirtyDay => add_days(base, -29)?,
                }
            };
            Some((start, base))
        }
        PresetKey::Today => Some((base, base)),
        PresetKey::Yesterday => {
            let day = add_days(base, -1)?;
            Some((day, day))
        }
        PresetKey::LastTwoDays => trailing(1),
        PresetKey::LastSevenDays => trailing(6),
        PresetKey::LastFourteenDays => trailing(13),
        PresetKey::LastThirtyDays => trailing(29),
        PresetKey::ThisWeek => {
            Some((start_of_week(base, week_start)?, end_of_week(base, week_start)?))
        }
        PresetKey::ThisWeekToDate => Some((start_of_week(base, week_start)?, base)),
        PresetKey::LastWeek => {
            let last = add_days(base, -7)?;
            Some((start_of_week(last, week_start)?, end_of_week(last, week_start)?))
        }
        _ => None,
    }
}

fn yearly_preset(key: PresetKey, base: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    let year = |offset: i64| -> Option<(NaiveDate, NaiveDate)> {
        let date = add_years(base, offset)?;
        Some((start_of_year(date), end_of_year(date)))
    };

    match key {
        PresetKey::Auto => Some((start_of_year(add_years(base, -2)?), end_of_year(base))),
        PresetKey::ThisYear => year(0),
        PresetKey::LastYear => year(-1),
        PresetKey::LastTwoYears => year(-2),
        _ => None,
    }
}

fn relative_unit_bounds(
    granularity: Granularity,
    reference: NaiveDate,
    start: u32,
    end: u32,
) -> Result<(NaiveDate, NaiveDate), DateRangeError> {
    let invalid = || {
        DateRangeError::InvalidDate(format!("{granularity} relative range {start}..{end}"))
    };

    match granularity {
        Granularity::Yearly => {
            check_range("start", start, 1, 9999)?;
            check_range("end", end, 1, 9999)?;
            let s = NaiveDate::from_ymd_opt(start as i32, 1, 1).ok_or_else(invalid)?;
            let e = NaiveDate::from_ymd_opt(end as i32, 12, 31).ok_or_else(invalid)?;
            Ok((s, e))
        }
        Granularity::Monthly => {
            check_range("start", start, 1, 12)?;
            check_range("end", end, 1, 12)?;
            let year = reference.year();
            let s = NaiveDate::from_ymd_opt(year, start, 1).ok_or_else(invalid)?;
            let e = NaiveDate::from_ymd_opt(year, end, 1).ok_or_else(invalid)?;
            Ok((s, end_of_month(e)))
        }
        Granularity::Daily => {
            check_range("start", start, 1, 31)?;
            check_range("end", end, 1, 31)?;
            let (year, month) = (reference.year(), reference.month());
            let max_day = days_in_month(year, month);
            let s = NaiveDate::from_ymd_opt(year, month, start.min(max_day)).ok_or_else(invalid)?;
            let e = NaiveDate::from_ymd_opt(year, month, end.min(max_day)).ok_or_else(invalid)?;
            Ok((s, e))
        }
    }
}

fn check_range(field: &'static str, value: u32, min: u32, max: u32) -> Result<(), DateRangeError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(DateRangeError::OutOfRange {
            field,
            value: i64::from(value),
            min: i64::from(min),
            max: i64::from(max),
        })
    }
}

fn advanced_bounds(
    granularity: Granularity,
    base: NaiveDate,
    start: &Offset,
    end: &Offset,
) -> Result<(NaiveDate, NaiveDate), DateRangeError> {
    let s = apply_offset("start", granularity, base, start)?;
    let e = apply_offset("end", granularity, base, end)?;
    Ok((start_of_period(s, granularity), end_of_period(e, granularity)))
}

fn apply_offset(
    field: &'static str,
    granularity: Granularity,
    base: NaiveDate,
    offset: &Offset,
) -> Result<NaiveDate, DateRangeError> {
    let amount = offset.signed();
    shift(base, granularity, amount).ok_or_else(|| {
        let (min, max) = offset_limits(granularity, base);
        DateRangeError::OutOfRange { field, value: amount, min, max }
    })
}

/// Signed offsets from `base` that stay inside chrono's calendar.
fn offset_limits(granularity: Granularity, base: NaiveDate) -> (i64, i64) {
    let month_index = |d: NaiveDate| i64::from(d.year()) * 12 + i64::from(d.month0());
    match granularity {
        Granularity::Daily => (
            NaiveDate::MIN.signed_duration_since(base).num_days(),
            NaiveDate::MAX.signed_duration_since(base).num_days(),
        ),
        Granularity::Monthly => (
            month_index(NaiveDate::MIN) - month_index(base),
            month_index(NaiveDate::MAX) - month_index(base),
        ),
        Granularity::Yearly => (
            i64::from(NaiveDate::MIN.year() - base.year()),
            i64::from(NaiveDate::MAX.year() - base.year()),
        ),
    }
}
