//! Confidence tiers for candidate windows.

use serde::{Deserialize, Serialize};

/// How likely a window is to stick, ordered best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// Every attendee is free for the whole window.
    High,
    /// Some attendees are tentative, at most half of them at any interval.
    Medium,
    /// More than half of the attendees are tentative at some interval.
    Low,
}

/// Classify a window from its peak tentative count.
///
/// `total_attendees` is the number of schedules in the request. The medium
/// boundary is `max_tentative <= total_attendees / 2` under real division, so
/// with 4 attendees exactly 2 tentative is still `Medium`, and with 3
/// attendees 2 tentative is `Low`. `2 * m <= n` is the same test without
/// leaving integers.
pub fn classify(max_tentative: usize, total_attendees: usize) -> Confidence {
    if max_tentative == 0 {
        Confidence::High
    } else if 2 * max_tentative <= total_attendees {
        Confidence::Medium
    } else {
        Confidence::Low
    }
}
