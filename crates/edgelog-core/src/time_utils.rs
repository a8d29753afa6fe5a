use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;
use tracing::warn;

// ── System timezone detection ─────────────────────────────────────────────────

/// Detect the IANA timezone name of the running system.
///
/// Uses the `iana-time-zone` crate directly – no subprocess calls.
/// Falls back to `"UTC"` if detection fails.
pub fn get_system_timezone() -> String {
    iana_time_zone::get_timezone().unwrap_or_else(|_| "UTC".to_string())
}

/// Parse an IANA timezone name, falling back to UTC with a warning.
pub fn resolve_timezone(tz_name: &str) -> Tz {
    tz_name.parse::<Tz>().unwrap_or_else(|_| {
        warn!(
            "unrecognised timezone \"{}\", falling back to UTC",
            tz_name
        );
        Tz::UTC
    })
}

// ── Log timestamps ────────────────────────────────────────────────────────────

const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M:%S", "%H:%M"];

/// Combine a log `date` (`YYYY-MM-DD`) and `time` (`HH:MM[:SS[.fff]]`) into a
/// UTC timestamp.
///
/// Access logs are written in UTC, so no offset is applied. Returns `None`
/// when either part is malformed.
pub fn parse_log_timestamp(date: &str, time: &str) -> Option<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok()?;
    let time = TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(time.trim(), fmt).ok())?;
    Some(NaiveDateTime::new(date, time).and_utc())
}

/// Truncate a timestamp to its hour and render it as `YYYY-MM-DDTHH:00`.
///
/// Keys sort lexicographically in chronological order.
pub fn hour_key(ts: DateTime<Utc>) -> String {
    format!("{}:00", ts.format("%Y-%m-%dT%H"))
}

/// Format a UTC timestamp as a calendar date in `tz`.
pub fn format_date_in(ts: DateTime<Utc>, tz: Tz) -> String {
    ts.with_timezone(&tz).format("%Y-%m-%d").to_string()
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_log_timestamp_seconds() {
        let ts = parse_log_timestamp("2024-01-01", "10:00:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_log_timestamp_fractional_and_short() {
        assert!(parse_log_timestamp("2024-01-01", "10:00:00.250").is_some());
        let short = parse_log_timestamp("2024-01-01", "23:59").unwrap();
        assert_eq!(short, Utc.with_ymd_and_hms(2024, 1, 1, 23, 59, 0).unwrap());
    }

    #[test]
    fn test_parse_log_timestamp_rejects_garbage() {
        assert!(parse_log_timestamp("2024-13-01", "10:00:00").is_none());
        assert!(parse_log_timestamp("2024-01-01", "25:00:00").is_none());
        assert!(parse_log_timestamp("", "10:00:00").is_none());
        assert!(parse_log_timestamp("2024-01-01", "").is_none());
        assert!(parse_log_timestamp("yesterday", "noon").is_none());
    }

    #[test]
    fn test_hour_key() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 9, 45, 12).unwrap();
        assert_eq!(hour_key(ts), "2024-01-01T09:00");
    }

    #[test]
    fn test_hour_keys_sort_chronologically() {
        let a = hour_key(Utc.with_ymd_and_hms(2023, 12, 31, 23, 0, 0).unwrap());
        let b = hour_key(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        assert!(a < b);
    }

    #[test]
    fn test_resolve_timezone_fallback() {
        assert_eq!(resolve_timezone("Not/AZone"), Tz::UTC);
        assert_eq!(resolve_timezone("Europe/Athens"), Tz::Europe__Athens);
    }

    #[test]
    fn test_format_date_in_crosses_midnight() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 23, 30, 0).unwrap();
        assert_eq!(format_date_in(ts, Tz::UTC), "2024-01-01");
        assert_eq!(format_date_in(ts, Tz::Europe__Athens), "2024-01-02");
    }

    #[test]
    fn test_get_system_timezone_not_empty() {
        assert!(!get_system_timezone().is_empty());
    }
}
