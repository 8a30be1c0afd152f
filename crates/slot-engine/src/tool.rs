//! Tool layer: named parameters with declared defaults, wired to a provider
//! and the search engine.
//!
//! This is where defaults live. The engine in [`crate::search`] only ever
//! sees a fully-populated [`SlotSearchRequest`].

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Result, SlotError};
use crate::event::NewEvent;
use crate::provider::{AvailabilityProvider, EventWriter, ScheduleQuery};
use crate::request::{ScheduleEntry, SlotSearchRequest, WorkingHours};
use crate::search::{find_available_slots, SlotSearchResult};
use crate::time::{format_local_datetime, local_datetime};

pub const DEFAULT_DURATION_MINUTES: u32 = 60;
pub const DEFAULT_MAX_CANDIDATES: usize = 5;
pub const DEFAULT_INTERVAL_MINUTES: u32 = 30;

fn default_duration() -> u32 {
    DEFAULT_DURATION_MINUTES
}

fn default_max_candidates() -> usize {
    DEFAULT_MAX_CANDIDATES
}

fn default_interval() -> u32 {
    DEFAULT_INTERVAL_MINUTES
}

fn default_true() -> bool {
    true
}

/// Parameters of the `find_available_slots` tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindSlotsParams {
    /// Attendee email addresses.
    pub emails: Vec<String>,
    pub start_date: NaiveDate,
    /// Inclusive; the search runs to 23:59:59 on this date.
    pub end_date: NaiveDate,
    #[serde(default = "default_duration")]
    pub duration_minutes: u32,
    #[serde(default = "default_true")]
    pub working_hours_only: bool,
    #[serde(default = "default_max_candidates")]
    pub max_candidates: usize,
    #[serde(default = "default_true")]
    pub include_tentative: bool,
}

impl FindSlotsParams {
    /// Parameters with every optional field at its default.
    pub fn new(emails: Vec<String>, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            emails,
            start_date,
            end_date,
            duration_minutes: DEFAULT_DURATION_MINUTES,
            working_hours_only: true,
            max_candidates: DEFAULT_MAX_CANDIDATES,
            include_tentative: true,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.end_date < self.start_date {
            return Err(SlotError::InvalidParameter(format!(
                "end date {} is before start date {}",
                self.end_date, self.start_date
            )));
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
        Ok(())
    }

    /// First instant searched: midnight on the start date.
    pub fn range_start(&self) -> NaiveDateTime {
        self.start_date.and_time(NaiveTime::MIN)
    }

    /// Last instant searched: 23:59:59 on the end date.
    pub fn range_end(&self) -> NaiveDateTime {
        // wraps to 23:59:59
        self.end_date.and_time(NaiveTime::MIN - TimeDelta::seconds(1))
    }
}

/// Parameters of the `get_schedule` tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetScheduleParams {
    pub emails: Vec<String>,
    #[serde(with = "local_datetime")]
    pub start_date_time: NaiveDateTime,
    #[serde(with = "local_datetime")]
    pub end_date_time: NaiveDateTime,
    #[serde(default = "default_interval")]
    pub interval_minutes: u32,
}

/// Deployment-wide settings the tools read instead of per-call parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolSettings {
    pub interval_minutes: u32,
    pub working_hours: WorkingHours,
    /// Zone the provider is asked to express availability in.
    pub time_zone: Tz,
}

impl ToolSettings {
    /// Build settings from their textual configuration values.
    pub fn parse(
        time_zone: &str,
        working_hours_start: &str,
        working_hours_end: &str,
        interval_minutes: u32,
    ) -> Result<Self> {
        if interval_minutes == 0 {
            return Err(SlotError::InvalidParameter(
                "interval_minutes must be greater than 0".to_string(),
            ));
        }
        Ok(Self {
            interval_minutes,
            working_hours: WorkingHours::parse(working_hours_start, working_hours_end)?,
            time_zone: parse_time_zone(time_zone)?,
        })
    }
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            interval_minutes: DEFAULT_INTERVAL_MINUTES,
            working_hours: WorkingHours::default(),
            time_zone: Tz::UTC,
        }
    }
}

/// Parse an IANA timezone name.
pub fn parse_time_zone(name: &str) -> Result<Tz> {
    name.parse()
        .map_err(|_| SlotError::InvalidTimezone(name.to_string()))
}

/// Fetch availability for `params.emails` and search it for meeting slots.
pub fn find_slots<P>(
    provider: &P,
    params: &FindSlotsParams,
    settings: &ToolSettings,
) -> Result<SlotSearchResult>
where
    P: AvailabilityProvider + ?Sized,
{
    params.validate()?;

    let query = ScheduleQuery {
        attendees: params.emails.clone(),
        start: params.range_start(),
        end: params.range_end(),
        interval_minutes: settings.interval_minutes,
        time_zone: settings.time_zone,
    };
    let schedules = provider.get_schedule(&query)?;

    let request = SlotSearchRequest {
        schedules,
        start: query.start,
        interval_minutes: settings.interval_minutes,
        duration_minutes: params.duration_minutes,
        working_hours: settings.working_hours,
        max_candidates: params.max_candidates,
        include_tentative: params.include_tentative,
        working_hours_only: params.working_hours_only,
    };
    request.validate()?;

    let result = find_available_slots(&request);
    info!(
        attendees = params.emails.len(),
        duration_minutes = params.duration_minutes,
        total_candidates_found = result.total_candidates_found,
        returned = result.candidates.len(),
        "slot search complete"
    );
    Ok(result)
}

/// Fetch raw availability for `params.emails`.
pub fn get_schedule<P>(
    provider: &P,
    params: &GetScheduleParams,
    settings: &ToolSettings,
) -> Result<Vec<ScheduleEntry>>
where
    P: AvailabilityProvider + ?Sized,
{
    if params.interval_minutes == 0 {
        return Err(SlotError::InvalidParameter(
            "interval_minutes must be greater than 0".to_string(),
        ));
    }
    if params.end_date_time <= params.start_date_time {
        return Err(SlotError::InvalidParameter(format!(
            "end {} is not after start {}",
            format_local_datetime(params.end_date_time),
            format_local_datetime(params.start_date_time)
        )));
    }
    let query = ScheduleQuery {
        attendees: params.emails.clone(),
        start: params.start_date_time,
        end: params.end_date_time,
        interval_minutes: params.interval_minutes,
        time_zone: settings.time_zone,
    };
    Ok(provider.get_schedule(&query)?)
}

/// Confirmation of a created meeting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventConfirmation {
    pub id: String,
    pub subject: String,
    #[serde(with = "local_datetime")]
    pub start: NaiveDateTime,
    #[serde(with = "local_datetime")]
    pub end: NaiveDateTime,
    pub duration_minutes: i64,
    pub attendees: Vec<String>,
    pub join_url: Option<String>,
    pub time_zone: String,
}

/// Create `event` through `writer`, in the configured zone.
pub fn create_event<W>(
    writer: &mut W,
    event: &NewEvent,
    settings: &ToolSettings,
) -> Result<EventConfirmation>
where
    W: EventWriter + ?Sized,
{
    event.validate()?;

    let created = writer.create_event(event, settings.time_zone)?;
    info!(
        id = %created.id,
        attendees = created.attendees.len(),
        online = created.join_url.is_some(),
        "event created"
    );
    Ok(EventConfirmation {
        id: created.id,
        subject: created.subject,
        start: event.start,
        end: event.end,
        duration_minutes: event.duration_minutes(),
        attendees: created.attendees,
        join_url: created.join_url,
        time_zone: settings.time_zone.name().to_string(),
    })
}

/// The current instant in UTC and in the configured zone.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentDateTime {
    pub utc: String,
    pub local: String,
    pub local_date: NaiveDate,
    pub time_zone: String,
    pub day_of_week: String,
}

/// Describe `now` in UTC and in `time_zone`, so callers can anchor relative
/// dates before searching.
pub fn current_datetime(now: DateTime<Utc>, time_zone: Tz) -> CurrentDateTime {
    let local = now.with_timezone(&time_zone);
    CurrentDateTime {
        utc: now.to_rfc3339(),
        local: local.to_rfc3339(),
        local_date: local.date_naive(),
        time_zone: time_zone.name().to_string(),
        day_of_week: local.format("%A").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{MemoryCalendar, StaticProvider};
    use chrono::TimeZone;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn params_apply_declared_defaults() {
        let params: FindSlotsParams = serde_json::from_str(
            r#"{"emails":["a@example.com"],"startDate":"2026-02-16","endDate":"2026-02-16"}"#,
        )
        .unwrap();
        assert_eq!(params.duration_minutes, 60);
        assert!(params.working_hours_only);
        assert_eq!(params.max_candidates, 5);
        assert!(params.include_tentative);
        assert_eq!(
            params,
            FindSlotsParams::new(
                vec!["a@example.com".to_string()],
                date("2026-02-16"),
                date("2026-02-16")
            )
        );
    }

    #[test]
    fn range_covers_whole_days() {
        let params = FindSlotsParams::new(vec![], date("2026-02-16"), date("2026-02-17"));
        assert_eq!(params.range_start().to_string(), "2026-02-16 00:00:00");
        assert_eq!(params.range_end().to_string(), "2026-02-17 23:59:59");
    }

    #[test]
    fn reversed_dates_are_rejected() {
        let params = FindSlotsParams::new(
            vec!["a@example.com".to_string()],
            date("2026-02-17"),
            date("2026-02-16"),
        );
        assert!(matches!(
            params.validate(),
            Err(SlotError::InvalidParameter(_))
        ));
    }

    #[test]
    fn find_slots_runs_provider_then_engine() {
        // 48 half-hour intervals for one day; busy 09:00-10:00, free otherwise.
        let view = format!("{}{}{}", "0".repeat(18), "22", "0".repeat(28));
        let doc = format!(
            r#"{{"value":[{{"scheduleId":"a@example.com","availabilityView":"{}"}}]}}"#,
            view
        );
        let provider = StaticProvider::from_json(&doc).unwrap();
        let params = FindSlotsParams::new(
            vec!["a@example.com".to_string()],
            date("2026-02-16"),
            date("2026-02-16"),
        );

        let result = find_slots(&provider, &params, &ToolSettings::default()).unwrap();
        assert_eq!(result.candidates.len(), 5);
        assert_eq!(result.candidates[0].start.to_string(), "2026-02-16 10:00:00");
        assert_eq!(result.search_range.end.to_string(), "2026-02-17 00:00:00");
    }

    #[test]
    fn get_schedule_rejects_reversed_range() {
        let provider = StaticProvider::from_json(
            r#"{"value":[{"scheduleId":"a@example.com","availabilityView":"0000"}]}"#,
        )
        .unwrap();
        let mut params = GetScheduleParams {
            emails: vec!["a@example.com".to_string()],
            start_date_time: date("2026-02-16").and_hms_opt(11, 0, 0).unwrap(),
            end_date_time: date("2026-02-16").and_hms_opt(9, 0, 0).unwrap(),
            interval_minutes: 30,
        };
        let err = get_schedule(&provider, &params, &ToolSettings::default()).unwrap_err();
        assert!(matches!(err, SlotError::InvalidParameter(_)));
        assert!(err.to_string().contains("not after start"));

        params.end_date_time = params.start_date_time;
        assert!(get_schedule(&provider, &params, &ToolSettings::default()).is_err());

        params.end_date_time = date("2026-02-16").and_hms_opt(12, 0, 0).unwrap();
        let entries = get_schedule(&provider, &params, &ToolSettings::default()).unwrap();
        assert_eq!(entries[0].availability_view.to_string(), "00");
    }

    #[test]
    fn range_end_is_safe_on_the_last_representable_day() {
        let params = FindSlotsParams::new(vec![], NaiveDate::MAX, NaiveDate::MAX);
        assert_eq!(params.range_end(), NaiveDate::MAX.and_hms_opt(23, 59, 59).unwrap());
    }

    #[test]
    fn attendee_without_view_clips_search_to_nothing() {
        let provider = StaticProvider::from_json(&format!(
            r#"{{"value":[{{"scheduleId":"a@example.com","availabilityView":"{}"}},
                          {{"scheduleId":"b@example.com"}}]}}"#,
            "0".repeat(48)
        ))
        .unwrap();
        let params = FindSlotsParams::new(
            vec!["a@example.com".to_string(), "b@example.com".to_string()],
            date("2026-02-16"),
            date("2026-02-16"),
        );

        let result = find_slots(&provider, &params, &ToolSettings::default()).unwrap();
        assert!(result.candidates.is_empty());
        assert_eq!(result.total_candidates_found, 0);
        assert_eq!(result.search_range.start, result.search_range.end);
    }

    #[test]
    fn provider_errors_surface() {
        let provider = StaticProvider::default();
        let params = FindSlotsParams::new(vec![], date("2026-02-16"), date("2026-02-16"));
        let err = find_slots(&provider, &params, &ToolSettings::default()).unwrap_err();
        assert!(matches!(err, SlotError::Provider(_)));
    }

    #[test]
    fn create_event_confirms_with_duration_and_zone() {
        let mut calendar = MemoryCalendar::new();
        let settings = ToolSettings::parse("Asia/Tokyo", "09:00", "18:00", 30).unwrap();
        let event = NewEvent::new(
            "Planning",
            date("2026-02-16").and_hms_opt(11, 0, 0).unwrap(),
            date("2026-02-16").and_hms_opt(12, 30, 0).unwrap(),
            vec![
                "a@example.com".to_string(),
                "b@example.com".to_string(),
                "a@example.com".to_string(),
            ],
        );

        let confirmation = create_event(&mut calendar, &event, &settings).unwrap();
        assert_eq!(confirmation.id, "event-1");
        assert_eq!(confirmation.duration_minutes, 90);
        assert_eq!(confirmation.attendees, vec!["a@example.com", "b@example.com"]);
        assert!(confirmation.join_url.is_some());
        assert_eq!(confirmation.time_zone, "Asia/Tokyo");
        assert_eq!(calendar.events()[0].time_zone, settings.time_zone);

        let json = serde_json::to_value(&confirmation).unwrap();
        assert_eq!(json["durationMinutes"], 90);
        assert_eq!(json["start"], "2026-02-16T11:00:00");
    }

    #[test]
    fn create_event_validates_before_writing() {
        let mut calendar = MemoryCalendar::new();
        let event = NewEvent::new(
            "Planning",
            date("2026-02-16").and_hms_opt(11, 0, 0).unwrap(),
            date("2026-02-16").and_hms_opt(12, 0, 0).unwrap(),
            vec![],
        );
        let err = create_event(&mut calendar, &event, &ToolSettings::default()).unwrap_err();
        assert!(matches!(err, SlotError::InvalidParameter(_)));
        assert!(calendar.events().is_empty());
    }

    #[test]
    fn settings_reject_bad_values() {
        assert!(matches!(
            ToolSettings::parse("Mars/Olympus", "09:00", "18:00", 30),
            Err(SlotError::InvalidTimezone(_))
        ));
        assert!(matches!(
            ToolSettings::parse("UTC", "9", "18:00", 30),
            Err(SlotError::InvalidTimeOfDay(_))
        ));
        assert!(ToolSettings::parse("Asia/Tokyo", "09:00", "18:00", 0).is_err());
    }

    #[test]
    fn current_datetime_reports_both_zones() {
        let now = Utc.with_ymd_and_hms(2026, 2, 15, 20, 30, 0).unwrap();
        let tokyo: Tz = "Asia/Tokyo".parse().unwrap();
        let info = current_datetime(now, tokyo);
        assert_eq!(info.utc, "2026-02-15T20:30:00+00:00");
        assert_eq!(info.local, "2026-02-16T05:30:00+09:00");
        assert_eq!(info.local_date, date("2026-02-16"));
        assert_eq!(info.day_of_week, "Monday");
    }
}
