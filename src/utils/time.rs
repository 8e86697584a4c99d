//! Time and timestamp utilities

use chrono::{DateTime, SecondsFormat, Utc};

/// Current time in UTC
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now()
}

/// RFC 3339 with as many fractional digits as needed to round-trip exactly
pub fn to_iso8601(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Human-readable form for the dashboard, e.g. `2024-06-01 12:00:00 UTC`
pub fn to_readable(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_formats() {
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 5).unwrap();
        assert_eq!(to_iso8601(&at), "2024-06-01T12:00:05Z");
        assert_eq!(to_readable(&at), "2024-06-01 12:00:05 UTC");
    }

    #[test]
    fn test_iso8601_round_trips() {
        let now = current_timestamp();
        let parsed = DateTime::parse_from_rfc3339(&to_iso8601(&now)).unwrap();
        assert_eq!(parsed.with_timezone(&Utc), now);
    }
}
