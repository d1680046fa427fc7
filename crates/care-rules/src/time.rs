//! Microsecond time helpers and calendar bucketing.

use chrono::{DateTime, Utc};

pub const MICROS_PER_SECOND: i64 = 1_000_000;
pub const MICROS_PER_MINUTE: i64 = 60 * MICROS_PER_SECOND;
pub const MICROS_PER_HOUR: i64 = 60 * MICROS_PER_MINUTE;
pub const MICROS_PER_DAY: i64 = 24 * MICROS_PER_HOUR;

fn to_datetime(micros: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_micros(micros)
}

/// `YYYY-MM-DD` for index anchors.
pub fn day_key(micros: i64) -> String {
    match to_datetime(micros) {
        Some(dt) => dt.format("%Y-%m-%d").to_string(),
        None => "invalid-date".to_string(),
    }
}

/// `YYYY-MM` bucket used by the admin rollups.
pub fn month_key(micros: i64) -> String {
    match to_datetime(micros) {
        Some(dt) => dt.format("%Y-%m").to_string(),
        None => "invalid-date".to_string(),
    }
}
