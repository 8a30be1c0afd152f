//! Merge N attendee timelines into one per-interval aggregate.
//!
//! Views of different lengths are not an error: the aggregate is clipped to
//! the shortest view.

use std::collections::BTreeSet;

use crate::status::{AvailabilityStatus, AvailabilityView};

/// Combined state of all attendees during one interval.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntervalAggregate {
    /// Some attendee cannot attend. Once set it is never cleared.
    pub blocked: bool,
    pub tentative_count: usize,
    /// Indices (into the schedule list) of the tentative attendees.
    pub tentative_attendees: BTreeSet<usize>,
}

/// Aggregate the given views interval by interval.
///
/// Blocking and tentative bookkeeping are independent: a tentative attendee
/// is recorded even when another attendee already blocks the interval.
pub fn aggregate_views<'a, I>(views: I) -> Vec<IntervalAggregate>
where
    I: IntoIterator<Item = &'a AvailabilityView>,
    I::IntoIter: Clone,
{
    let views = views.into_iter();
    let Some(len) = views.clone().map(AvailabilityView::len).min() else {
        return Vec::new();
    };

    let mut intervals = vec![IntervalAggregate::default(); len];

    for (attendee, view) in views.enumerate() {
        for (slot, status) in intervals.iter_mut().zip(view.statuses()) {
            if status.is_blocking() {
                slot.blocked = true;
            } else if *status == AvailabilityStatus::Tentative {
                slot.tentative_count += 1;
                slot.tentative_attendees.insert(attendee);
            }
        }
    }

    intervals
}
