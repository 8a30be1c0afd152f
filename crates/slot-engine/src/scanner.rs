//! Slide a fixed-width window across the interval aggregate.
//!
//! A window is accepted when none of its intervals is blocked and, if
//! tentative inclusion is off, none of them has a tentative attendee.

use std::collections::BTreeSet;

use crate::aggregate::IntervalAggregate;

/// An accepted window, in interval units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    pub start_index: usize,
    /// Peak per-interval tentative count inside the window.
    pub max_tentative_count: usize,
    /// Union of tentative attendees across the window.
    pub tentative_attendees: BTreeSet<usize>,
}

/// Number of intervals a meeting of `duration_minutes` spans, rounded up.
///
/// Returns 0 for a zero interval or zero duration; callers treat that as
/// "no windows".
pub fn required_intervals(duration_minutes: u32, interval_minutes: u32) -> usize {
    if interval_minutes == 0 {
        return 0;
    }
    duration_minutes.div_ceil(interval_minutes) as usize
}

/// Evaluate every window of `width` intervals, in chronological order.
pub fn scan_windows(
    intervals: &[IntervalAggregate],
    width: usize,
    include_tentative: bool,
) -> Vec<Window> {
    if width == 0 || width > intervals.len() {
        return Vec::new();
    }

    intervals
        .windows(width)
        .enumerate()
        .filter_map(|(start_index, span)| evaluate(start_index, span, include_tentative))
        .collect()
}

fn evaluate(
    start_index: usize,
    span: &[IntervalAggregate],
    include_tentative: bool,
) -> Option<Window> {
    let mut max_tentative_count = 0;
    let mut tentative_attendees = BTreeSet::new();

    for interval in span {
        if interval.blocked {
            return None;
        }
        if interval.tentative_count > 0 {
            if !include_tentative {
                return None;
            }
            max_tentative_count = max_tentative_count.max(interval.tentative_count);
            tentative_attendees.extend(interval.tentative_attendees.iter().copied());
        }
    }

    Some(Window {
        start_index,
        max_tentative_count,
        tentative_attendees,
    })
}
