use chrono_tz::Tz;

use crate::models::TimeRange;
use crate::time_utils::format_date_in;

const BYTE_UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];

/// Format a byte count with a binary (1024) unit, at most two decimals and
/// no trailing zeros.
///
/// # Examples
///
/// ```
/// use edgelog_core::formatting::format_bytes;
///
/// assert_eq!(format_bytes(0), "0 Bytes");
/// assert_eq!(format_bytes(512), "512 Bytes");
/// assert_eq!(format_bytes(1536), "1.5 KB");
/// assert_eq!(format_bytes(1_048_576), "1 MB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut unit = 0;
    let mut value = bytes as f64;
    while value >= 1024.0 && unit < BYTE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let fixed = format!("{:.2}", value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, BYTE_UNITS[unit])
}

/// Format an integer count with thousands separators.
///
/// # Examples
///
/// ```
/// use edgelog_core::formatting::format_count;
///
/// assert_eq!(format_count(999), "999");
/// assert_eq!(format_count(1_234_567), "1,234,567");
/// ```
pub fn format_count(value: u64) -> String {
    group_thousands(&value.to_string())
}

/// Optional count for stat cards: `None` renders as `"No data"`.
pub fn format_optional_count(value: Option<u64>) -> String {
    value
        .map(format_count)
        .unwrap_or_else(|| "No data".to_string())
}

/// Render a time range as `start - end` calendar dates in `tz`.
pub fn format_time_range(range: &TimeRange, tz: Tz) -> String {
    format!(
        "{} - {}",
        format_date_in(range.start, tz),
        format_date_in(range.end, tz)
    )
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Insert commas every three digits from the right of an integer string.
fn group_thousands(s: &str) -> String {
    if s.len() <= 3 {
        return s.to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    let remainder = chars.len() % 3;
    for (i, &c) in chars.iter().enumerate() {
        if i != 0 && (i % 3 == remainder) {
            result.push(',');
        }
        result.push(c);
    }
    result
}

// ── Tests ──────────────────────────────────────────────────────────────────────
