//! Wall-clock parsing and arithmetic helpers.
//!
//! All instants handled by the engine are naive local datetimes: the caller
//! has already resolved the timezone, so no offset math happens here.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};

use crate::error::{Result, SlotError};

/// Format used when rendering instants (`2026-02-16T09:00:00`).
pub const LOCAL_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Parse a local datetime string.
///
/// Accepts `YYYY-MM-DDTHH:MM:SS`, `YYYY-MM-DDTHH:MM`, or a bare date
/// `YYYY-MM-DD` (interpreted as midnight).
pub fn parse_local_datetime(s: &str) -> Result<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, LOCAL_DATETIME_FORMAT) {
        return Ok(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M") {
        return Ok(dt);
    }
    parse_date(s).map(|d| d.and_time(NaiveTime::MIN))
}

/// Parse a calendar date in `YYYY-MM-DD` form.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| SlotError::InvalidDate(format!("'{}': {}", s, e)))
}

/// Parse a time of day in `HH:MM` form.
pub fn parse_time_of_day(s: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M")
        .map_err(|_| SlotError::InvalidTimeOfDay(s.to_string()))
}

/// Render an instant as `YYYY-MM-DDTHH:MM:SS`.
pub fn format_local_datetime(dt: NaiveDateTime) -> String {
    dt.format(LOCAL_DATETIME_FORMAT).to_string()
}

/// `base` shifted forward by `minutes`, or `None` if the result falls
/// outside the representable date range.
pub fn add_minutes(base: NaiveDateTime, minutes: i64) -> Option<NaiveDateTime> {
    TimeDelta::try_minutes(minutes).and_then(|delta| base.checked_add_signed(delta))
}

/// Minutes since midnight, ignoring seconds.
pub fn minute_of_day<T: Timelike>(t: &T) -> u32 {
    t.hour() * 60 + t.minute()
}

/// Serde adapter for `NaiveDateTime` fields in `YYYY-MM-DDTHH:MM:SS` form.
pub mod local_datetime {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(dt: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&super::format_local_datetime(*dt))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_local_datetime(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_and_partial_datetimes() {
        let full = parse_local_datetime("2026-02-16T09:30:00").unwrap();
        let short = parse_local_datetime("2026-02-16T09:30").unwrap();
        assert_eq!(full, short);
        assert_eq!(format_local_datetime(full), "2026-02-16T09:30:00");
    }

    #[test]
    fn bare_date_is_midnight() {
        let dt = parse_local_datetime("2026-02-16").unwrap();
        assert_eq!(format_local_datetime(dt), "2026-02-16T00:00:00");
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            parse_local_datetime("next tuesday"),
            Err(SlotError::InvalidDate(_))
        ));
        assert!(matches!(
            parse_time_of_day("9am"),
            Err(SlotError::InvalidTimeOfDay(_))
        ));
    }

    #[test]
    fn add_minutes_stops_at_the_end_of_time() {
        let dt = parse_local_datetime("2026-02-16T09:00:00").unwrap();
        assert_eq!(
            add_minutes(dt, 90).map(format_local_datetime).as_deref(),
            Some("2026-02-16T10:30:00")
        );
        assert_eq!(add_minutes(NaiveDateTime::MAX, 1), None);
        assert_eq!(add_minutes(dt, i64::MAX), None);
    }

    #[test]
    fn minute_of_day_drops_seconds() {
        let t = NaiveTime::from_hms_opt(9, 15, 59).unwrap();
        assert_eq!(minute_of_day(&t), 555);
    }
}
