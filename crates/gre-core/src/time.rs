//! Lenient timestamp parsing shared by the filter pipeline and formatters.
//!
//! The remote API is inconsistent about timestamps: most carry an RFC 3339
//! offset, some are naive date-times and a few are bare dates. Everything is
//! resolved to a `DateTime<FixedOffset>`; naive values are interpreted in the
//! dashboard's configured offset.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};

/// India Standard Time, the offset the dashboard operates in by default.
pub const IST_OFFSET_MINUTES: i32 = 330;

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Builds a fixed offset from minutes east of UTC, falling back to UTC when out of range.
pub fn offset_from_minutes(minutes: i32) -> FixedOffset {
    FixedOffset::east_opt(minutes * 60).unwrap_or_else(|| Utc.fix())
}

pub fn ist() -> FixedOffset {
    offset_from_minutes(IST_OFFSET_MINUTES)
}

/// Parses a timestamp string, returning `None` for anything unparseable.
pub fn parse_timestamp(raw: &str, default_offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt);
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt);
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return default_offset.from_local_datetime(&naive).single();
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .and_then(|naive| default_offset.from_local_datetime(&naive).single())
}

/// Calendar date of "now" in the given offset.
pub fn today_in(offset: FixedOffset) -> NaiveDate {
    Utc::now().with_timezone(&offset).date_naive()
}
