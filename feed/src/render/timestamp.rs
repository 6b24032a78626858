//! Timestamp formatting
//!
//! Missing or unreadable timestamps never fail a render; they turn into a
//! fallback string instead.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Shown when the record carries no timestamp
pub const MISSING_TIMESTAMP: &str = "N/A";

/// Shown when the timestamp is present but not a date-time
pub const INVALID_TIMESTAMP: &str = "Invalid Date Format";

const DISPLAY_FORMAT: &str = "%B %-d, %Y at %I:%M %p UTC";

// `%#z` takes `Z`, `+02`, `+0200` and `+02:00`
const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M%#z"];

const NAIVE_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Parse ISO-8601 text into a UTC instant
///
/// Offsets may be written as `Z`, `+HH`, `+HHMM` or `+HH:MM`, and seconds
/// may be omitted. Values without an offset are read as UTC; bare dates
/// mean midnight UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(raw, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Format an optional ISO-8601 timestamp for display, e.g.
/// `June 1, 2024 at 02:30 PM UTC`
pub fn format_timestamp(raw: Option<&str>) -> String {
    let Some(raw) = raw.filter(|s| !s.trim().is_empty()) else {
        tracing::warn!("Event has no timestamp");
        return MISSING_TIMESTAMP.to_string();
    };

    match parse_timestamp(raw) {
        Some(dt) => dt.format(DISPLAY_FORMAT).to_string(),
        None => {
            tracing::warn!(timestamp = %raw, "Invalid event timestamp");
            INVALID_TIMESTAMP.to_string()
        }
    }
}
