//! Widget date-range resolution.
//!
//! A widget asks for its date range with a [`DateRangeSelector`] (a preset,
//! fixed custom dates, custom relative units or signed offsets). The
//! resolver turns that selector plus a granularity and an optional anchor
//! into a formatted `{start, end}` pair.
//!
//! ```
//! use chrono::NaiveDate;
//! use skyboard_core::daterange::{
//!     DateRangeRequest, DateRangeSelector, Granularity, PresetKey, ResolverOptions,
//!     resolve_date_range_at,
//! };
//!
//! let request = DateRangeRequest::new(
//!     Granularity::Monthly,
//!     DateRangeSelector::preset(PresetKey::LastQuarter),
//! )
//! .with_anchor(NaiveDate::from_ymd_opt(2024, 1, 10));
//! let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
//!
//! let range = resolve_date_range_at(&request, &ResolverOptions::default(), today).unwrap();
//! assert_eq!(range.start, "2023-10");
//! assert_eq!(range.end, "2023-12");
//! ```

pub mod calendar;
pub mod errors;
pub mod field;
pub mod granularity;
pub mod resolver;
pub mod selector;

pub use calendar::{WeekStart, parse_date_string};
pub use errors::DateRangeError;
pub use field::{BoundValue, DateRangeFieldValue, DateRangeOptions};
pub use granularity::Granularity;
pub use resolver::{
    DailyAutoWindow, DateRange, DateRangeRequest, ResolverOptions, resolve_bounds,
    resolve_date_range, resolve_date_range_at,
};
pub use selector::{AdvancedOperator, DateRangeSelector, Offset, PresetKey};
