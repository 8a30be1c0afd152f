//! # slot-engine
//!
//! Deterministic meeting-slot search over aggregated free/busy timelines for
//! AI calendar agents.
//!
//! Given each attendee's discretized availability (one status per fixed
//! interval), the engine finds every window of the requested duration in
//! which nobody is busy, grades each window by how many attendees are only
//! tentatively booked, optionally keeps only business hours, and returns the
//! best candidates first. The search itself is a pure, infallible function.
//!
//! ## Modules
//!
//! - [`status`] — status codes → [`AvailabilityStatus`] / [`AvailabilityView`]
//! - [`aggregate`] — N views → one per-interval aggregate
//! - [`scanner`] — sliding-window acceptance over the aggregate
//! - [`confidence`] — high / medium / low tiers from tentative overlap
//! - [`search`] — the full pipeline and ranking
//! - [`request`] — search inputs and working hours
//! - [`provider`] — calendar-availability provider and event writer boundary
//! - [`event`] — meetings to create from a chosen slot
//! - [`tool`] — tool-level parameters, defaults and settings
//! - [`summary`] — structured summaries for presentation layers
//! - [`time`] — wall-clock parsing helpers
//! - [`error`] — Error types

pub mod aggregate;
pub mod confidence;
pub mod error;
pub mod event;
pub mod provider;
pub mod request;
pub mod scanner;
pub mod search;
pub mod status;
pub mod summary;
pub mod time;
pub mod tool;

pub use confidence::Confidence;
pub use error::{ProviderError, SlotError};
pub use event::{CreatedEvent, NewEvent};
pub use provider::{
    AvailabilityProvider, EventWriter, MemoryCalendar, ScheduleQuery, StaticProvider,
};
pub use request::{ScheduleEntry, SlotSearchRequest, WorkingHours};
pub use search::{find_available_slots, CandidateSlot, SearchRange, SlotSearchResult};
pub use status::{AvailabilityStatus, AvailabilityView};
pub use summary::{summarize, SearchSummary};
pub use tool::{create_event, find_slots, EventConfirmation, FindSlotsParams, ToolSettings};
