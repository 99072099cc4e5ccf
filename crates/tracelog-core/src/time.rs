//! Time and duration formatting.

use chrono::{DateTime, Local, TimeZone};
use std::fmt;

/// Layout of the timestamp that starts every formatted line.
pub const LINE_STAMP: &str = "%m/%d/%Y %H:%M:%S";

/// RFC 1123 layout used for timestamps inside payloads.
pub const RFC1123: &str = "%a, %d %b %Y %H:%M:%S %Z";

/// Format seconds with two decimals, e.g. `1.50s`.
pub fn seconds(secs: f64) -> String {
    format!("{:.2}s", secs)
}

/// Format a `chrono::Duration` as seconds.
pub fn chrono_seconds(duration: chrono::Duration) -> String {
    match duration.num_microseconds() {
        Some(micros) => seconds(micros as f64 / 1_000_000.0),
        None => seconds(duration.num_seconds() as f64),
    }
}

/// Format a timestamp in the RFC 1123 layout.
pub fn rfc1123<Tz>(timestamp: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    timestamp.format(RFC1123).to_string()
}

/// Format the `MM/DD/YYYY HH:MM:SS` stamp of a line.
pub fn line_stamp(timestamp: &DateTime<Local>) -> String {
    timestamp.format(LINE_STAMP).to_string()
}
