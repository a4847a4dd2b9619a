use chrono::{Datelike, Timelike};
use kronos_dashboard::constants::EMPTY_VALUE;
use kronos_dashboard::utils::datetime::*;

#[test]
fn test_parse_timestamp() {
    let parsed = parse_timestamp("2024-03-01T10:15:00Z").unwrap();
    assert_eq!(parsed.naive_utc().hour(), 10);
    assert_eq!(parsed.naive_utc().minute(), 15);
}

#[test]
fn test_zero_time_is_absent() {
    assert!(parse_timestamp("0001-01-01T00:00:00Z").is_none());
    assert!(parse_timestamp("").is_none());
    assert!(parse_timestamp("   ").is_none());
    assert!(parse_timestamp("not a date").is_none());
}

#[test]
fn test_format_timestamp() {
    let formatted = format_timestamp("2024-03-01T10:15:00+00:00", "%Y");
    assert_eq!(formatted, "2024");

    assert_eq!(format_timestamp("0001-01-01T00:00:00Z", "%Y"), EMPTY_VALUE);
    assert_eq!(format_timestamp("garbage", "%Y"), EMPTY_VALUE);
}

#[test]
fn test_local_input_to_rfc3339() {
    let rfc = local_input_to_rfc3339("2030-06-01T08:30").unwrap();
    assert!(rfc.starts_with("2030-06-01T08:30:00"));

    // Round-trips back to the same local wall time
    let parsed = parse_timestamp(&rfc).unwrap();
    assert_eq!(parsed.year(), 2030);
    assert_eq!(parsed.hour(), 8);
    assert_eq!(parsed.minute(), 30);

    assert_eq!(
        local_input_to_rfc3339(" 2030-06-01T08:30 ").as_deref(),
        Some(rfc.as_str())
    );
}

#[test]
fn test_local_input_rejects_bad_values() {
    assert!(local_input_to_rfc3339("").is_none());
    assert!(local_input_to_rfc3339("2030-06-01").is_none());
    assert!(local_input_to_rfc3339("2030-13-01T08:30").is_none());
    assert!(local_input_to_rfc3339("2030-06-01 08:30").is_none());
}
