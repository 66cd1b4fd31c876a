// Date utility functions
// Timestamp parsing for offer records and whole-second arithmetic

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Utc};

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse a backend timestamp.
///
/// RFC 3339 strings carry their own offset. A date-only value is UTC
/// midnight, while a date-time without an offset is read in local time.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|midnight| midnight.and_utc());
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .and_then(|naive| naive.and_local_timezone(Local).earliest())
        .map(|local| local.with_timezone(&Utc))
}

/// Whole seconds from `now` until `end`, floored and never negative.
pub fn whole_seconds_until(end: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    let millis = (end - now).num_milliseconds();
    if millis <= 0 {
        0
    } else {
        (millis / 1000) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn parses_rfc3339_with_offset() {
        let parsed = parse_timestamp("2025-03-01T10:00:00+05:30").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2025, 3, 1, 4, 30, 0).unwrap());
    }

    #[test]
    fn parses_zulu_with_fraction() {
        let parsed = parse_timestamp("2025-03-01T10:00:00.250Z").unwrap();
        assert_eq!(parsed.timestamp_millis() % 1000, 250);
    }

    #[test]
    fn date_only_is_utc_midnight() {
        let parsed = parse_timestamp("2025-03-01").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn naive_datetime_is_local() {
        let parsed = parse_timestamp("2025-03-01T10:00").unwrap();
        let expected = Local
            .with_ymd_and_hms(2025, 3, 1, 10, 0, 0)
            .earliest()
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(parsed, expected);
    }

    #[test]
    fn rejects_garbage_and_blank() {
        assert!(parse_timestamp("next tuesday").is_none());
        assert!(parse_timestamp("   ").is_none());
        assert!(parse_timestamp("2025-13-45").is_none());
    }

    #[test]
    fn whole_seconds_floors_and_clamps() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(whole_seconds_until(now + Duration::milliseconds(1999), now), 1);
        assert_eq!(whole_seconds_until(now + Duration::milliseconds(999), now), 0);
        assert_eq!(whole_seconds_until(now - Duration::hours(3), now), 0);
        assert_eq!(whole_seconds_until(now + Duration::days(2), now), 172_800);
    }
}
