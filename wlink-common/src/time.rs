//! Calendar date utilities

use chrono::{DateTime, NaiveDate};

/// Parse a calendar date as stored by the tracker
///
/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp (the date part in the
/// timestamp's own offset is used). Returns `None` for anything else.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }

    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|timestamp| timestamp.date_naive())
}

/// Absolute number of calendar days between two dates
pub fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    (a - b).num_days().abs()
}
