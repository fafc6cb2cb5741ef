//! Date helper functions
//!
//! Post dates are stored as the raw ISO-8601 strings found in front-matter.
//! These helpers parse them on demand for display and year extraction.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

/// Year used when a date cannot be read at all
pub const EPOCH_YEAR: &str = "1970";

/// Parse a date string in the formats front-matter commonly uses
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }

    // RFC 3339 keeps the calendar date of its own offset
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}

/// Calendar year of a date string.
///
/// Falls back to the leading four digits (`"2023"`, `"2023-13-45"`), then to
/// [`EPOCH_YEAR`].
pub fn year_of(date: &str) -> String {
    if let Some(d) = parse_date(date) {
        return format!("{:04}", d.year());
    }

    let prefix: String = date.trim().chars().take(4).collect();
    if prefix.len() == 4 && prefix.chars().all(|c| c.is_ascii_digit()) {
        prefix
    } else {
        EPOCH_YEAR.to_string()
    }
}

/// Format a date string using a Moment.js-compatible format string.
/// Unparseable dates are returned unchanged.
///
/// # Examples
/// ```ignore
/// format_date("2024-01-15", "MMM D, YYYY") // -> "Jan 15, 2024"
/// ```
pub fn format_date(date: &str, format: &str) -> String {
    match parse_date(date) {
        Some(d) => d.format(&moment_to_chrono_format(format)).to_string(),
        None => date.to_string(),
    }
}

/// Convert Moment.js format to chrono format
fn moment_to_chrono_format(format: &str) -> String {
    // Longest tokens first so `MMMM` is not eaten by `MM`. `D` is handled
    // separately because it is a prefix of `DD`.
    let replacements = [
        ("YYYY", "%Y"),
        ("YY", "%y"),
        ("MMMM", "%B"),
        ("MMM", "%b"),
        ("MM", "%m"),
        ("DD", "%d"),
        ("dddd", "%A"),
        ("ddd", "%a"),
    ];

    let mut result = String::new();
    let mut rest = format;

    'outer: while !rest.is_empty() {
        for (from, to) in replacements {
            if let Some(stripped) = rest.strip_prefix(from) {
                result.push_str(to);
                rest = stripped;
                continue 'outer;
            }
        }
        if let Some(stripped) = rest.strip_prefix('D') {
            result.push_str("%-d");
            rest = stripped;
            continue;
        }
        if let Some(stripped) = rest.strip_prefix('M') {
            result.push_str("%-m");
            rest = stripped;
            continue;
        }

        let mut chars = rest.chars();
        if let Some(c) = chars.next() {
            result.push(c);
        }
        rest = chars.as_str();
    }

    result
}
