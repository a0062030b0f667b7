//! Shared parsing helpers.

mod datetime;

pub use datetime::{parse_date, parse_duration_minutes, parse_time};
