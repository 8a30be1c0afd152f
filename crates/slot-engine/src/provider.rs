//! Calendar-availability providers.
//!
//! A provider turns a list of attendees and a time range into one
//! [`ScheduleEntry`] per attendee, all aligned to the query's start instant
//! and interval. Providers are passed explicitly to whoever needs them; the
//! search engine itself never holds one.
//!
//! Writing goes through [`EventWriter`], kept separate so read-only sources
//! like [`StaticProvider`] need not implement it.

use chrono::NaiveDateTime;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ProviderError, Result};
use crate::event::{CreatedEvent, NewEvent};
use crate::request::ScheduleEntry;
use crate::status::AvailabilityView;

/// What to fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleQuery {
    pub attendees: Vec<String>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub interval_minutes: u32,
    /// Zone the backend should express intervals in.
    pub time_zone: Tz,
}

impl ScheduleQuery {
    /// Number of whole or partial intervals between `start` and `end`.
    pub fn interval_count(&self) -> usize {
        if self.interval_minutes == 0 || self.end <= self.start {
            return 0;
        }
        let span = (self.end - self.start).num_minutes().max(0) as u64;
        span.div_ceil(u64::from(self.interval_minutes)) as usize
    }
}

/// Source of attendee availability.
pub trait AvailabilityProvider {
    /// Return one entry per requested attendee, in request order.
    fn get_schedule(
        &self,
        query: &ScheduleQuery,
    ) -> std::result::Result<Vec<ScheduleEntry>, ProviderError>;
}

/// Sink for new calendar events.
pub trait EventWriter {
    /// Create `event` in the organizer's calendar, inviting each attendee once.
    ///
    /// Start and end are wall-clock times in `time_zone`.
    fn create_event(
        &mut self,
        event: &NewEvent,
        time_zone: Tz,
    ) -> std::result::Result<CreatedEvent, ProviderError>;
}

/// One schedule in a getSchedule-style response document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleInfo {
    pub schedule_id: String,
    /// Missing views decode as empty, which leaves nothing to search.
    #[serde(default)]
    pub availability_view: AvailabilityView,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schedule_items: Vec<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_hours: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ScheduleDocument {
    #[serde(default)]
    value: Vec<ScheduleInfo>,
}

/// Provider backed by an already-fetched response document.
///
/// The document's views are assumed to start at the query's start instant
/// with the query's interval. Views longer than the queried range are cut
/// to it.
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    schedules: Vec<ScheduleInfo>,
}

impl StaticProvider {
    pub fn new(schedules: Vec<ScheduleInfo>) -> Self {
        Self { schedules }
    }

    /// Load a document of the form `{"value": [{"scheduleId", "availabilityView"}, ...]}`.
    pub fn from_json(json: &str) -> Result<Self> {
        let doc: ScheduleDocument = serde_json::from_str(json)?;
        Ok(Self::new(doc.value))
    }

    fn lookup(&self, attendee: &str) -> Option<&ScheduleInfo> {
        self.schedules
            .iter()
            .find(|s| s.schedule_id.eq_ignore_ascii_case(attendee))
    }
}

impl AvailabilityProvider for StaticProvider {
    fn get_schedule(
        &self,
        query: &ScheduleQuery,
    ) -> std::result::Result<Vec<ScheduleEntry>, ProviderError> {
        if query.attendees.is_empty() {
            return Err(ProviderError::NoAttendees);
        }

        let limit = query.interval_count();
        let entries = query
            .attendees
            .iter()
            .map(|attendee| {
                let info = self
                    .lookup(attendee)
                    .ok_or_else(|| ProviderError::UnknownAttendee(attendee.clone()))?;
                let statuses = info.availability_view.statuses();
                let clipped = &statuses[..statuses.len().min(limit)];
                Ok(ScheduleEntry {
                    schedule_id: Some(info.schedule_id.clone()),
                    availability_view: AvailabilityView::new(clipped.to_vec()),
                })
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        debug!(
            attendees = entries.len(),
            intervals = limit,
            time_zone = %query.time_zone,
            "served schedules from static document"
        );
        Ok(entries)
    }
}

/// An event held by a [`MemoryCalendar`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredEvent {
    pub id: String,
    pub organizer: String,
    /// The event as created, attendees already de-duplicated.
    pub event: NewEvent,
    pub time_zone: Tz,
}

/// Event writer that keeps everything it creates in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryCalendar {
    events: Vec<StoredEvent>,
}

impl MemoryCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[StoredEvent] {
        &self.events
    }
}

impl EventWriter for MemoryCalendar {
    fn create_event(
        &mut self,
        event: &NewEvent,
        time_zone: Tz,
    ) -> std::result::Result<CreatedEvent, ProviderError> {
        let organizer = event.organizer().ok_or(ProviderError::NoAttendees)?.to_string();
        let id = format!("event-{}", self.events.len() + 1);
        let attendees = event.unique_attendees();
        let join_url = event
            .is_online_meeting
            .then(|| format!("memory://{}/{}", organizer, id));

        debug!(
            %id,
            %organizer,
            attendees = attendees.len(),
            online = event.is_online_meeting,
            "stored event in memory"
        );
        self.events.push(StoredEvent {
            id: id.clone(),
            organizer,
            event: NewEvent {
                attendees: attendees.clone(),
                ..event.clone()
            },
            time_zone,
        });

        Ok(CreatedEvent {
            id,
            subject: event.subject.clone(),
            attendees,
            join_url,
        })
    }
}
