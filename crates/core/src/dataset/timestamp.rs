//! Timestamp parsing for dataset cells.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Date-time layouts tried after RFC 3339. `%.f` makes the fraction optional.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Parse a timestamp cell. Returns `None` for empty or unrecognized input.
///
/// Values carrying an offset are converted to UTC.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd_hms(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn test_plain_date() {
        assert_eq!(parse_timestamp("2024-01-05"), Some(ymd_hms(2024, 1, 5, 0, 0, 0)));
        assert_eq!(parse_timestamp("2024/01/05"), Some(ymd_hms(2024, 1, 5, 0, 0, 0)));
        assert_eq!(parse_timestamp("01/05/2024"), Some(ymd_hms(2024, 1, 5, 0, 0, 0)));
    }

    #[test]
    fn test_date_time() {
        assert_eq!(
            parse_timestamp("2024-02-10 14:30:00"),
            Some(ymd_hms(2024, 2, 10, 14, 30, 0))
        );
        assert_eq!(
            parse_timestamp("2024-02-10T14:30:00"),
            Some(ymd_hms(2024, 2, 10, 14, 30, 0))
        );
        assert_eq!(
            parse_timestamp("2024-02-10 14:30"),
            Some(ymd_hms(2024, 2, 10, 14, 30, 0))
        );
    }

    #[test]
    fn test_fractional_seconds() {
        let parsed = parse_timestamp("2024-02-10 14:30:00.250").unwrap();
        assert_eq!(parsed.and_utc().timestamp_subsec_millis(), 250);
    }

    #[test]
    fn test_rfc3339_normalized_to_utc() {
        assert_eq!(
            parse_timestamp("2024-03-01T01:00:00+02:00"),
            Some(ymd_hms(2024, 2, 29, 23, 0, 0))
        );
        assert_eq!(
            parse_timestamp("2024-03-01T10:00:00Z"),
            Some(ymd_hms(2024, 3, 1, 10, 0, 0))
        );
    }

    #[test]
    fn test_surrounding_whitespace() {
        assert_eq!(parse_timestamp("  2024-01-05 "), Some(ymd_hms(2024, 1, 5, 0, 0, 0)));
    }

    #[test]
    fn test_unparseable() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("   "), None);
        assert_eq!(parse_timestamp("not a date"), None);
        assert_eq!(parse_timestamp("2024-13-01"), None);
        assert_eq!(parse_timestamp("NaT"), None);
    }
}
