//! Calendar helpers for streak and reward bookkeeping
//!
//! Weeks are ISO weeks: Monday 00:00 starts the week, and a Sunday belongs
//! to the week that began six days earlier. Day keys are "YYYY-MM-DD"
//! strings used as storage buckets.

use chrono::{Datelike, Days, NaiveDate};

/// Monday of the ISO week containing `date`.
///
/// Idempotent: `week_start(week_start(d)) == week_start(d)`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = date.weekday().num_days_from_monday() as u64;
    date.checked_sub_days(Days::new(offset)).unwrap_or(date)
}

/// Format a date as a "YYYY-MM-DD" storage key
pub fn day_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parse a "YYYY-MM-DD" storage key back into a date
pub fn parse_day_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key, "%Y-%m-%d").ok()
}
