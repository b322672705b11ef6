//! Entity to model mappers
//!
//! `From<Model> for Entity` converts database rows to domain objects, and the
//! helpers below translate between `DateTime<Utc>` and stored epoch milliseconds.

mod post;
mod reaction;
mod session;
mod user;

use chrono::{DateTime, Utc};

/// Convert a stored epoch-millisecond value to a timestamp
pub fn from_millis(millis: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis).unwrap_or_default()
}

/// Convert a timestamp to its stored epoch-millisecond value
pub fn to_millis(at: DateTime<Utc>) -> i64 {
    at.timestamp_millis()
}
