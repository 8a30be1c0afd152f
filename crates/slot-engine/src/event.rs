//! Meeting events created from a chosen slot.
//!
//! [`NewEvent`] is what a caller asks a calendar backend to create;
//! [`CreatedEvent`] is what the backend reports back. The organizer is the
//! first attendee, and each address is invited once, in first-seen order.

use std::collections::HashSet;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};
use crate::search::CandidateSlot;
use crate::time::local_datetime;

fn default_true() -> bool {
    true
}

/// A meeting to create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub subject: String,
    #[serde(rename = "startDateTime", with = "local_datetime")]
    pub start: NaiveDateTime,
    #[serde(rename = "endDateTime", with = "local_datetime")]
    pub end: NaiveDateTime,
    /// Attendee addresses; the first one organizes the meeting.
    pub attendees: Vec<String>,
    /// Meeting body, HTML allowed.
    #[serde(default)]
    pub body: String,
    #[serde(default = "default_true")]
    pub is_online_meeting: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl NewEvent {
    /// An online meeting with no body or location.
    pub fn new(
        subject: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
        attendees: Vec<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            start,
            end,
            attendees,
            body: String::new(),
            is_online_meeting: true,
            location: None,
        }
    }

    /// A meeting occupying a search candidate.
    pub fn for_slot(subject: impl Into<String>, slot: &CandidateSlot, attendees: Vec<String>) -> Self {
        Self::new(subject, slot.start, slot.end, attendees)
    }

    pub fn validate(&self) -> Result<()> {
        if self.attendees.is_empty() {
            return Err(SlotError::InvalidParameter(
                "attendees must include at least one address".to_string(),
            ));
        }
        if self.end <= self.start {
            return Err(SlotError::InvalidParameter(format!(
                "event end {} is not after start {}",
                self.end, self.start
            )));
        }
        Ok(())
    }

    /// The first listed attendee, if any.
    pub fn organizer(&self) -> Option<&str> {
        self.attendees.first().map(String::as_str)
    }

    /// Attendees with repeats removed, keeping first-seen order.
    pub fn unique_attendees(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.attendees
            .iter()
            .filter(|a| seen.insert(a.as_str()))
            .cloned()
            .collect()
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// What the backend reports after creating an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedEvent {
    pub id: String,
    pub subject: String,
    pub attendees: Vec<String>,
    /// Present for online meetings when the backend issued one.
    pub join_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::parse_local_datetime;

    fn at(s: &str) -> NaiveDateTime {
        parse_local_datetime(s).unwrap()
    }

    fn event(attendees: &[&str]) -> NewEvent {
        NewEvent::new(
            "Design review",
            at("2026-02-16T11:00"),
            at("2026-02-16T12:30"),
            attendees.iter().map(|a| a.to_string()).collect(),
        )
    }

    #[test]
    fn empty_attendee_list_is_rejected() {
        assert!(matches!(
            event(&[]).validate(),
            Err(SlotError::InvalidParameter(_))
        ));
        assert!(event(&["a@example.com"]).validate().is_ok());
    }

    #[test]
    fn end_must_follow_start() {
        let mut e = event(&["a@example.com"]);
        e.end = e.start;
        assert!(e.validate().is_err());
    }

    #[test]
    fn organizer_is_first_attendee_and_repeats_collapse() {
        let e = event(&["b@example.com", "a@example.com", "b@example.com", "c@example.com"]);
        assert_eq!(e.organizer(), Some("b@example.com"));
        assert_eq!(
            e.unique_attendees(),
            vec!["b@example.com", "a@example.com", "c@example.com"]
        );
    }

    #[test]
    fn duration_is_exact() {
        assert_eq!(event(&["a@example.com"]).duration_minutes(), 90);
    }

    #[test]
    fn deserializes_with_defaults() {
        let e: NewEvent = serde_json::from_str(
            r#"{"subject":"Sync","startDateTime":"2026-02-16T11:00:00",
                "endDateTime":"2026-02-16T12:00:00","attendees":["a@example.com"]}"#,
        )
        .unwrap();
        assert!(e.is_online_meeting);
        assert_eq!(e.body, "");
        assert_eq!(e.location, None);
        assert_eq!(e.duration_minutes(), 60);
    }

    #[test]
    fn slot_becomes_event_window() {
        let slot = CandidateSlot {
            start: at("2026-02-16T10:00"),
            end: at("2026-02-16T11:00"),
            confidence: crate::Confidence::High,
            all_available: true,
            tentative_count: 0,
            tentative_attendees: Default::default(),
        };
        let e = NewEvent::for_slot("Sync", &slot, vec!["a@example.com".to_string()]);
        assert_eq!(e.start, slot.start);
        assert_eq!(e.end, slot.end);
    }
}
