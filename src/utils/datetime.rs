//! Date and time utility functions
//!
//! The server speaks RFC 3339 and uses the zero time (`0001-01-01T00:00:00Z`)
//! for timestamps that do not apply to a schedule. Form inputs use the
//! browser-style `YYYY-MM-DDTHH:MM` local datetime.

use chrono::{DateTime, Datelike, Local, LocalResult, NaiveDateTime, TimeZone};

use crate::constants::{EMPTY_VALUE, FORM_DATETIME_FORMAT};

/// Parse an RFC 3339 timestamp, treating empty and zero-time values as absent.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Local>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    let parsed = DateTime::parse_from_rfc3339(value).ok()?;
    if parsed.year() <= 1 {
        return None;
    }
    Some(parsed.with_timezone(&Local))
}

/// Format a server timestamp in local time, or a dash when absent/unparsable.
///
/// # Arguments
/// * `value` - RFC 3339 timestamp as sent by the API
/// * `format` - chrono strftime format
pub fn format_timestamp(value: &str, format: &str) -> String {
    match parse_timestamp(value) {
        Some(dt) => dt.format(format).to_string(),
        None => EMPTY_VALUE.to_string(),
    }
}

/// Convert a `YYYY-MM-DDTHH:MM` local input into RFC 3339 with the local offset.
///
/// Returns `None` for malformed input or a local time skipped by a DST change.
/// Ambiguous times (DST fall-back) resolve to the earlier instant.
pub fn local_input_to_rfc3339(input: &str) -> Option<String> {
    let naive = NaiveDateTime::parse_from_str(input.trim(), FORM_DATETIME_FORMAT).ok()?;
    let local = match Local.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => return None,
    };
    Some(local.to_rfc3339())
}
