//! Error types for slot-engine operations.
//!
//! The search pipeline itself is infallible. These errors come from the
//! boundary: parameter validation, parsing caller-supplied values, and the
//! availability provider.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlotError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid time of day '{0}' (expected HH:MM)")]
    InvalidTimeOfDay(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Failures reported by an [`AvailabilityProvider`](crate::provider::AvailabilityProvider).
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ProviderError {
    #[error("at least one attendee is required")]
    NoAttendees,

    #[error("no availability found for attendee '{0}'")]
    UnknownAttendee(String),
}

pub type Result<T> = std::result::Result<T, SlotError>;
