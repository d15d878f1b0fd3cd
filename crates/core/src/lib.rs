//! Core library for skyboard.
//!
//! Pure, side-effect-free building blocks behind the dashboard console:
//!
//! - [`daterange`] resolves a widget's relative date-range selector into a
//!   concrete `{start, end}` pair for a granularity.
//! - [`variables`] reconciles a widget's option schema against the
//!   dashboard variable schema (inherit bindings, schema diffs, error map).
//! - [`query`] turns console filters into API query filters.
//! - [`config`] loads the TOML configuration shared by the CLI.

pub mod config;
pub mod daterange;
pub mod document;
pub mod query;
pub mod variables;
