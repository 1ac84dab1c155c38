//! Human-readable date formatting.
//!
//! These helpers never fail: missing input renders as [`NOT_AVAILABLE`] and
//! unparseable input renders as [`INVALID_DATE`]. All output is in UTC using
//! US English short month names, e.g. `Jan 5, 2026` and `Jan 5, 2026, 03:04 PM`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Rendered when there is no date to show.
pub const NOT_AVAILABLE: &str = "N/A";

/// Rendered when the input could not be parsed as a date.
pub const INVALID_DATE: &str = "Invalid Date";

const DATE_FORMAT: &str = "%b %-d, %Y";
const DATE_TIME_FORMAT: &str = "%b %-d, %Y, %I:%M %p";

const NAIVE_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse a date string in any of the accepted shapes.
///
/// Accepts RFC 3339 timestamps, ISO dates and date-times without offset
/// (interpreted as UTC), and integer epoch milliseconds.
#[must_use]
pub fn parse_date(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Some(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }

    input
        .parse::<i64>()
        .ok()
        .and_then(DateTime::from_timestamp_millis)
}

fn format_with(input: &str, pattern: &str) -> String {
    if input.trim().is_empty() {
        return NOT_AVAILABLE.to_owned();
    }
    parse_date(input).map_or_else(
        || INVALID_DATE.to_owned(),
        |dt| dt.format(pattern).to_string(),
    )
}

/// Format a date string as `Jan 5, 2026`.
///
/// ```
/// use flipzokart_core::format::format_date;
///
/// assert_eq!(format_date("2026-01-05T10:00:00Z"), "Jan 5, 2026");
/// assert_eq!(format_date(""), "N/A");
/// assert_eq!(format_date("yesterday"), "Invalid Date");
/// ```
#[must_use]
pub fn format_date(input: &str) -> String {
    format_with(input, DATE_FORMAT)
}

/// Format a date string as `Jan 5, 2026, 03:04 PM`.
#[must_use]
pub fn format_date_time(input: &str) -> String {
    format_with(input, DATE_TIME_FORMAT)
}

/// Format an optional timestamp as `Jan 5, 2026`, or `N/A` when absent.
#[must_use]
pub fn format_timestamp_date(value: Option<DateTime<Utc>>) -> String {
    value.map_or_else(
        || NOT_AVAILABLE.to_owned(),
        |dt| dt.format(DATE_FORMAT).to_string(),
    )
}

/// Format an optional timestamp as `Jan 5, 2026, 03:04 PM`, or `N/A` when absent.
#[must_use]
pub fn format_timestamp_date_time(value: Option<DateTime<Utc>>) -> String {
    value.map_or_else(
        || NOT_AVAILABLE.to_owned(),
        |dt| dt.format(DATE_TIME_FORMAT).to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_empty_input_is_not_available() {
        assert_eq!(format_date(""), "N/A");
        assert_eq!(format_date("   "), "N/A");
        assert_eq!(format_date_time(""), "N/A");
    }

    #[test]
    fn test_garbage_input_is_invalid_date() {
        for input in ["not a date", "2026-13-45", "31/12/2025", "0x10", "NaN"] {
            assert_eq!(format_date(input), "Invalid Date", "{input}");
            assert_eq!(format_date_time(input), "Invalid Date", "{input}");
        }
    }

    #[test]
    fn test_rfc3339_is_converted_to_utc() {
        assert_eq!(format_date("2026-03-01T02:30:00+05:30"), "Feb 28, 2026");
        assert_eq!(
            format_date_time("2026-03-01T02:30:00+05:30"),
            "Feb 28, 2026, 09:00 PM"
        );
    }

    #[test]
    fn test_plain_date_and_naive_date_time() {
        assert_eq!(format_date("2025-12-09"), "Dec 9, 2025");
        assert_eq!(format_date_time("2025-12-09"), "Dec 9, 2025, 12:00 AM");
        assert_eq!(
            format_date_time("2025-07-04 15:04:05"),
            "Jul 4, 2025, 03:04 PM"
        );
        assert_eq!(
            format_date_time("2025-07-04T09:15:00.250"),
            "Jul 4, 2025, 09:15 AM"
        );
    }

    #[test]
    fn test_epoch_milliseconds() {
        assert_eq!(format_date("0"), "Jan 1, 1970");
        assert_eq!(format_date("1767225600000"), "Jan 1, 2026");
    }

    #[test]
    fn test_timestamp_variants() {
        let dt = Utc.with_ymd_and_hms(2026, 10, 16, 18, 5, 0).single();
        assert_eq!(format_timestamp_date(dt), "Oct 16, 2026");
        assert_eq!(format_timestamp_date_time(dt), "Oct 16, 2026, 06:05 PM");
        assert_eq!(format_timestamp_date(None), "N/A");
        assert_eq!(format_timestamp_date_time(None), "N/A");
    }
}
