//! Structured summaries of a search result for presentation layers.
//!
//! Everything here is data: icons, ranks, resolved attendee names. Turning it
//! into prose or a card is left to the renderer.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::confidence::Confidence;
use crate::search::SlotSearchResult;
use crate::time::local_datetime;

impl Confidence {
    /// Status icon shown next to a slot.
    pub fn icon(self) -> &'static str {
        match self {
            Confidence::High => "✅",
            Confidence::Medium => "⚠️",
            Confidence::Low => "🔶",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotSummary {
    /// 1-based position in the ranked list.
    pub rank: usize,
    #[serde(with = "local_datetime")]
    pub start: NaiveDateTime,
    #[serde(with = "local_datetime")]
    pub end: NaiveDateTime,
    pub confidence: Confidence,
    pub icon: &'static str,
    pub tentative_count: usize,
    pub tentative_attendees: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSummary {
    pub attendee_count: usize,
    pub duration_minutes: u32,
    pub total_candidates_found: usize,
    pub shown: usize,
    pub slots: Vec<SlotSummary>,
}

/// Summarize `result`, resolving tentative attendee indices against `emails`.
///
/// Indices with no matching email are rendered as `#<n>` (1-based).
pub fn summarize(
    result: &SlotSearchResult,
    emails: &[String],
    duration_minutes: u32,
) -> SearchSummary {
    let slots = result
        .candidates
        .iter()
        .enumerate()
        .map(|(i, slot)| SlotSummary {
            rank: i + 1,
            start: slot.start,
            end: slot.end,
            confidence: slot.confidence,
            icon: slot.confidence.icon(),
            tentative_count: slot.tentative_count,
            tentative_attendees: slot
                .tentative_attendees
                .iter()
                .map(|&idx| {
                    emails
                        .get(idx)
                        .cloned()
                        .unwrap_or_else(|| format!("#{}", idx + 1))
                })
                .collect(),
        })
        .collect::<Vec<_>>();

    SearchSummary {
        attendee_count: emails.len(),
        duration_minutes,
        total_candidates_found: result.total_candidates_found,
        shown: slots.len(),
        slots,
    }
}
