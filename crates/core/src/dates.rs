//! Calendar-date parsing and the defaulting policy applied at execution time:
//! a missing start date becomes today + 7 days, a missing end date becomes
//! start + 2 days.

use chrono::{Duration, NaiveDate};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn parse(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

pub fn format(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn default_start(today: NaiveDate) -> NaiveDate {
    today + Duration::days(7)
}

pub fn default_end(start: NaiveDate) -> NaiveDate {
    start + Duration::days(2)
}

/// Resolve an optional explicit start date. An absent or unparseable value
/// falls back to the default start.
pub fn resolve_start(raw: Option<&str>, today: NaiveDate) -> String {
    let start = raw.and_then(parse).unwrap_or_else(|| default_start(today));
    format(start)
}

/// Resolve an optional date range into concrete `YYYY-MM-DD` strings.
/// The end date defaults relative to the resolved start, so a given start
/// with no end yields start + 2 days.
pub fn resolve_range(start: Option<&str>, end: Option<&str>, today: NaiveDate) -> (String, String) {
    let start_date = start.and_then(parse).unwrap_or_else(|| default_start(today));
    let end_date = end.and_then(parse).unwrap_or_else(|| default_end(start_date));
    (format(start_date), format(end_date))
}
