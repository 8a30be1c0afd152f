//! Input types for a slot search.

use chrono::{Duration, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Result, SlotError};
use crate::status::AvailabilityView;
use crate::time::{add_minutes, minute_of_day, parse_time_of_day};

/// One attendee's availability as returned by the calendar provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    /// Attendee identifier (usually an email address), if the backend echoed one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule_id: Option<String>,
    pub availability_view: AvailabilityView,
}

impl ScheduleEntry {
    pub fn new(schedule_id: Option<String>, view: impl Into<AvailabilityView>) -> Self {
        Self {
            schedule_id,
            availability_view: view.into(),
        }
    }
}

/// Local business-hours window, compared at minute precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHours {
    #[serde(serialize_with = "ser_hhmm", deserialize_with = "de_hhmm")]
    pub start: NaiveTime,
    #[serde(serialize_with = "ser_hhmm", deserialize_with = "de_hhmm")]
    pub end: NaiveTime,
}

impl WorkingHours {
    /// Build from two `HH:MM` strings.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Ok(Self {
            start: parse_time_of_day(start)?,
            end: parse_time_of_day(end)?,
        })
    }

    /// Whether `[start, end]` lies on one calendar day inside this window.
    ///
    /// A window that crosses midnight never qualifies.
    pub fn contains(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        if start.date() != end.date() {
            return false;
        }
        minute_of_day(&start) >= minute_of_day(&self.start)
            && minute_of_day(&end) <= minute_of_day(&self.end)
    }
}

impl Default for WorkingHours {
    /// 09:00 to 18:00.
    fn default() -> Self {
        Self {
            start: NaiveTime::MIN + Duration::hours(9),
            end: NaiveTime::MIN + Duration::hours(18),
        }
    }
}

fn ser_hhmm<S: Serializer>(t: &NaiveTime, s: S) -> std::result::Result<S::Ok, S::Error> {
    s.serialize_str(&t.format("%H:%M").to_string())
}

fn de_hhmm<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<NaiveTime, D::Error> {
    let raw = String::deserialize(d)?;
    parse_time_of_day(&raw).map_err(serde::de::Error::custom)
}

/// Everything the engine needs for one search.
///
/// All fields are explicit; defaults belong to the calling layer
/// (see [`crate::tool`]).
#[derive(Debug, Clone, PartialEq)]
pub struct SlotSearchRequest {
    /// Attendee timelines, all anchored at `start` with the same interval.
    pub schedules: Vec<ScheduleEntry>,
    /// Instant of interval 0, already in local wall-clock time.
    pub start: NaiveDateTime,
    pub interval_minutes: u32,
    pub duration_minutes: u32,
    pub working_hours: WorkingHours,
    pub max_candidates: usize,
    /// Accept windows where some attendees are only tentatively booked.
    pub include_tentative: bool,
    /// Drop windows that fall outside `working_hours`.
    pub working_hours_only: bool,
}

impl SlotSearchRequest {
    /// Check the numeric preconditions the engine relies on.
    ///
    /// The engine does not call this itself; callers should before invoking it.
    pub fn validate(&self) -> Result<()> {
        if self.interval_minutes == 0 {
            return Err(SlotError::InvalidParameter(
                "interval_minutes must be greater than 0".to_string(),
            ));
        }
        if self.duration_minutes == 0 {
            return Err(SlotError::InvalidParameter(
                "duration_minutes must be greater than 0".to_string(),
            ));
        }
        if self.max_candidates == 0 {
            return Err(SlotError::InvalidParameter(
                "max_candidates must be greater than 0".to_string(),
            ));
        }
        let intervals = self
            .schedules
            .iter()
            .map(|s| s.availability_view.len())
            .min()
            .unwrap_or(0);
        let end = (intervals as i64)
            .checked_mul(i64::from(self.interval_minutes))
            .and_then(|span| add_minutes(self.start, span));
        if end.is_none() {
            return Err(SlotError::InvalidParameter(format!(
                "{} intervals of {} minutes run past the supported date range",
                intervals, self.interval_minutes
            )));
        }
        Ok(())
    }
}
