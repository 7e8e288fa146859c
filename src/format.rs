use chrono::NaiveDateTime;
use std::cmp::max;

// Number of milliseconds in various time periods
const MS_SECOND: u64 = 1000;
const MS_MINUTE: u64 = MS_SECOND * 60;
const MS_HOUR: u64 = MS_MINUTE * 60;
const MS_DAY: u64 = MS_HOUR * 24;
const MS_WEEK: u64 = MS_DAY * 7;

/// Format a number of seconds as a rough human-readable string
pub fn duration(seconds: f64) -> String {
    // Float to int casts saturate, so huge or non-finite durations cannot overflow
    match (seconds.abs() * MS_SECOND as f64).round() as u64 {
        n if n > MS_WEEK * 3 / 2 => format!("{} weeks", max(n / MS_WEEK, 2)),
        n if n > MS_WEEK => String::from("1 week"),
        n if n > MS_DAY * 3 / 2 => format!("{} days", max(n / MS_DAY, 2)),
        n if n > MS_DAY => String::from("1 day"),
        n if n > MS_HOUR * 3 / 2 => format!("{} hours", max(n / MS_HOUR, 2)),
        n if n > MS_HOUR => String::from("1 hour"),
        n if n > MS_MINUTE * 3 / 2 => format!("{} minutes", max(n / MS_MINUTE, 2)),
        n if n > MS_MINUTE => String::from("1 minute"),
        n if n > MS_SECOND * 3 / 2 => format!("{} seconds", max(n / MS_SECOND, 2)),
        n if n > MS_SECOND => String::from("1 second"),
        1 => String::from("1 millisecond"),
        n => format!("{n} milliseconds"),
    }
}

/// Format a UTC timestamp as text
pub fn date(timestamp: &NaiveDateTime) -> String {
    format!("{} UTC", timestamp.format("%a %h %d, %Y %r"))
}
