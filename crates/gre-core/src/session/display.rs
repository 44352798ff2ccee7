//! Human-readable session start time and duration.

use chrono::{DateTime, FixedOffset, Offset, Utc};

use crate::time::{ist, parse_timestamp};

pub const NOT_AVAILABLE: &str = "Not available";
pub const INVALID_DATE: &str = "Invalid date";

fn parse_start(start_time: Option<&str>) -> Result<DateTime<FixedOffset>, &'static str> {
    let raw = start_time
        .filter(|s| !s.trim().is_empty())
        .ok_or(NOT_AVAILABLE)?;
    // Offset-less start times are reported in UTC.
    parse_timestamp(raw, Utc.fix()).ok_or(INVALID_DATE)
}

/// Start time in IST, e.g. `Fri, Jan 5, 2024, 10:30 AM`.
pub fn format_start_time(start_time: Option<&str>) -> String {
    match parse_start(start_time) {
        Ok(start) => start
            .with_timezone(&ist())
            .format("%a, %b %-d, %Y, %I:%M %p")
            .to_string(),
        Err(fallback) => fallback.to_string(),
    }
}

/// Elapsed time since `start_time` as `Nm`, `Hh Mm` or `Dd Hh`.
pub fn format_session_duration(start_time: Option<&str>, now: DateTime<Utc>) -> String {
    let start = match parse_start(start_time) {
        Ok(start) => start,
        Err(fallback) => return fallback.to_string(),
    };

    let minutes = (now - start.with_timezone(&Utc)).num_minutes();
    if minutes < 0 {
        "Just started".to_string()
    } else if minutes < 60 {
        format!("{}m", minutes)
    } else if minutes < 1440 {
        format!("{}h {}m", minutes / 60, minutes % 60)
    } else {
        format!("{}d {}h", minutes / 1440, (minutes % 1440) / 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 5, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_start_time_rendered_in_ist() {
        assert_eq!(
            format_start_time(Some("2024-01-05T05:00:00Z")),
            "Fri, Jan 5, 2024, 10:30 AM"
        );
        assert_eq!(format_start_time(None), NOT_AVAILABLE);
        assert_eq!(format_start_time(Some("")), NOT_AVAILABLE);
        assert_eq!(format_start_time(Some("soon")), INVALID_DATE);
    }

    #[test]
    fn test_duration_buckets() {
        let fmt = |s: &str| format_session_duration(Some(s), now());
        assert_eq!(fmt("2024-01-05T12:05:00Z"), "Just started");
        assert_eq!(fmt("2024-01-05T11:18:00Z"), "42m");
        assert_eq!(fmt("2024-01-05T09:45:00Z"), "2h 15m");
        assert_eq!(fmt("2024-01-03T09:00:00Z"), "2d 3h");
        assert_eq!(format_session_duration(None, now()), NOT_AVAILABLE);
        assert_eq!(format_session_duration(Some("x"), now()), INVALID_DATE);
    }
}
