//! The slot search pipeline: aggregate, scan, classify, filter, rank.
//!
//! [`find_available_slots`] is a pure function of its request. It never fails;
//! degenerate input (no schedules, mismatched view lengths, unknown status
//! codes) is absorbed and produces a well-formed, possibly empty, result.

use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregate::aggregate_views;
use crate::confidence::{classify, Confidence};
use crate::request::SlotSearchRequest;
use crate::scanner::{required_intervals, scan_windows};
use crate::time::{add_minutes, local_datetime};

/// A window in which every attendee can attend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateSlot {
    #[serde(with = "local_datetime")]
    pub start: NaiveDateTime,
    /// Always `start + duration`, not rounded to an interval boundary.
    #[serde(with = "local_datetime")]
    pub end: NaiveDateTime,
    pub confidence: Confidence,
    /// No attendee is tentative anywhere in the window.
    pub all_available: bool,
    /// Peak number of tentative attendees at any one interval.
    pub tentative_count: usize,
    /// Indices into the request's schedule list, ascending.
    pub tentative_attendees: BTreeSet<usize>,
}

/// The span of time the aggregate actually covered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRange {
    #[serde(with = "local_datetime")]
    pub start: NaiveDateTime,
    #[serde(with = "local_datetime")]
    pub end: NaiveDateTime,
}

/// Ranked, truncated candidates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotSearchResult {
    pub candidates: Vec<CandidateSlot>,
    /// Eligible candidates before truncation to `max_candidates`.
    pub total_candidates_found: usize,
    pub search_range: SearchRange,
}

impl SlotSearchResult {
    fn empty(anchor: NaiveDateTime) -> Self {
        Self {
            candidates: Vec::new(),
            total_candidates_found: 0,
            search_range: SearchRange {
                start: anchor,
                end: anchor,
            },
        }
    }
}

/// Find meeting windows in which every attendee is free or tentative.
///
/// Candidates are ordered `High`, then `Medium`, then `Low`; within a tier
/// they stay in chronological order. At most `max_candidates` are returned,
/// while `total_candidates_found` counts all of them.
pub fn find_available_slots(request: &SlotSearchRequest) -> SlotSearchResult {
    if request.schedules.is_empty() {
        debug!("no schedules supplied, returning empty result");
        return SlotSearchResult::empty(request.start);
    }

    let intervals = aggregate_views(request.schedules.iter().map(|s| &s.availability_view));
    let width = required_intervals(request.duration_minutes, request.interval_minutes);
    let windows = scan_windows(&intervals, width, request.include_tentative);
    debug!(
        attendees = request.schedules.len(),
        intervals = intervals.len(),
        width,
        accepted = windows.len(),
        "scanned availability windows"
    );

    let interval = i64::from(request.interval_minutes);
    let duration = i64::from(request.duration_minutes);
    let total_attendees = request.schedules.len();

    let candidates: Vec<CandidateSlot> = windows
        .into_iter()
        .filter_map(|window| {
            // Windows past the representable date range are dropped.
            let offset = (window.start_index as i64).checked_mul(interval)?;
            let start = add_minutes(request.start, offset)?;
            let end = add_minutes(start, duration)?;
            if request.working_hours_only && !request.working_hours.contains(start, end) {
                return None;
            }
            Some(CandidateSlot {
                start,
                end,
                confidence: classify(window.max_tentative_count, total_attendees),
                all_available: window.max_tentative_count == 0,
                tentative_count: window.max_tentative_count,
                tentative_attendees: window.tentative_attendees,
            })
        })
        .collect();

    let (candidates, total_candidates_found) = rank(candidates, request.max_candidates);
    debug!(
        total_candidates_found,
        returned = candidates.len(),
        "ranked candidates"
    );

    let end = (intervals.len() as i64)
        .checked_mul(interval)
        .and_then(|span| add_minutes(request.start, span))
        .unwrap_or(NaiveDateTime::MAX);

    SlotSearchResult {
        candidates,
        total_candidates_found,
        search_range: SearchRange {
            start: request.start,
            end,
        },
    }
}

/// Stable-sort by confidence, then keep the first `max_candidates`.
///
/// Returns the kept candidates and the count before truncation.
pub fn rank(
    mut candidates: Vec<CandidateSlot>,
    max_candidates: usize,
) -> (Vec<CandidateSlot>, usize) {
    // `sort_by_key` is stable, so ties keep discovery order.
    candidates.sort_by_key(|c| c.confidence);
    let total = candidates.len();
    candidates.truncate(max_candidates);
    (candidates, total)
}
