use chrono::{DateTime, NaiveDate, NaiveDateTime};

// Formats accepted for timestamps without an offset, which are taken to be UTC
// The minute-precision forms are what browsers submit from datetime-local inputs
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

// Offsets may omit the colon or the minutes, as in +0200 or +02
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M%#z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M%#z",
];

/// Format of the value attribute of a datetime-local input
/// Fractional seconds are only written when present.
const INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Parse an ISO-8601 timestamp into a UTC timestamp
/// Timestamps with an offset are converted to UTC, and timestamps without one are assumed to already be UTC.
pub fn parse(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(input) {
        return Some(timestamp.naive_utc());
    }

    OFFSET_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(input, format).ok())
        .map(|timestamp| timestamp.naive_utc())
        .or_else(|| {
            NAIVE_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        })
        // A bare date means midnight
        .or_else(|| {
            NaiveDate::parse_from_str(input, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// Format a timestamp so that it can prefill a datetime-local input
pub fn to_input_value(timestamp: &NaiveDateTime) -> String {
    timestamp.format(INPUT_FORMAT).to_string()
}
