//! Date utilities for daily reset hour handling.

use chrono::{Duration, Local, NaiveDate, NaiveDateTime, Timelike};

/// Get the study day for the current local time.
///
/// Before `daily_reset_hour` the study day is still "yesterday", so a late
/// night session counts towards the previous day.
pub fn get_adjusted_today(daily_reset_hour: u32) -> NaiveDate {
    adjusted_date(Local::now().naive_local(), daily_reset_hour)
}

/// Study day for a given local timestamp.
pub fn adjusted_date(now: NaiveDateTime, daily_reset_hour: u32) -> NaiveDate {
    if now.hour() < daily_reset_hour {
        (now - Duration::days(1)).date()
    } else {
        now.date()
    }
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
}
