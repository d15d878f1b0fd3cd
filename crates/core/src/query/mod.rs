//! Console filter to API query translation.
//!
//! Console filters come from the search bar as `{k, v, o}` triples or raw
//! `[v, k, o]` JSON arrays. [`QueryHelper`] collects them and renders an
//! [`ApiQuery`] with backend operator names, datetime bounds converted to
//! UTC and keyword filters joined into one string.

pub mod datetime;
pub mod errors;
pub mod filter;
pub mod helper;
pub mod operators;

pub use errors::QueryError;
pub use filter::{ApiFilter, ConsoleFilter, RawQuery};
pub use helper::{ApiQuery, QueryHelper};
pub use operators::{ApiOperator, Operator};
