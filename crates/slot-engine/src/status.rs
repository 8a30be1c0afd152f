//! Per-interval availability statuses and attendee timelines.
//!
//! Calendar backends report an attendee's availability as a string of
//! single-character codes, one per interval (`"0"` free through `"4"` working
//! elsewhere). The codes are decoded exactly once, here, into
//! [`AvailabilityStatus`]. Codes outside the known set are kept as
//! [`AvailabilityStatus::Unknown`] and treated as blocking.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Status of one attendee during one interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AvailabilityStatus {
    Free,
    /// Provisionally accepted meeting; still schedulable at lower confidence.
    Tentative,
    Busy,
    OutOfOffice,
    WorkingElsewhere,
    /// A code outside the known set, preserved for diagnostics.
    Unknown(char),
}

impl AvailabilityStatus {
    /// Decode a backend status code.
    pub fn from_code(code: char) -> Self {
        match code {
            '0' => Self::Free,
            '1' => Self::Tentative,
            '2' => Self::Busy,
            '3' => Self::OutOfOffice,
            '4' => Self::WorkingElsewhere,
            other => Self::Unknown(other),
        }
    }

    /// The backend code for this status.
    pub fn code(self) -> char {
        match self {
            Self::Free => '0',
            Self::Tentative => '1',
            Self::Busy => '2',
            Self::OutOfOffice => '3',
            Self::WorkingElsewhere => '4',
            Self::Unknown(c) => c,
        }
    }

    /// Whether this status makes the interval unschedulable.
    ///
    /// Everything except `Free` and `Tentative` blocks, including unknown codes.
    pub fn is_blocking(self) -> bool {
        !matches!(self, Self::Free | Self::Tentative)
    }
}

/// One attendee's discretized timeline, one status per interval.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct AvailabilityView(Vec<AvailabilityStatus>);

impl AvailabilityView {
    pub fn new(statuses: Vec<AvailabilityStatus>) -> Self {
        Self(statuses)
    }

    /// Decode a backend availability string such as `"0012200"`.
    ///
    /// Never fails: unrecognized characters become `Unknown`.
    pub fn parse(codes: &str) -> Self {
        Self(codes.chars().map(AvailabilityStatus::from_code).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn statuses(&self) -> &[AvailabilityStatus] {
        &self.0
    }
}

impl From<&str> for AvailabilityView {
    fn from(codes: &str) -> Self {
        Self::parse(codes)
    }
}

impl From<String> for AvailabilityView {
    fn from(codes: String) -> Self {
        Self::parse(&codes)
    }
}

impl From<AvailabilityView> for String {
    fn from(view: AvailabilityView) -> Self {
        view.to_string()
    }
}

impl fmt::Display for AvailabilityView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for status in &self.0 {
            write!(f, "{}", status.code())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_known_codes() {
        let view = AvailabilityView::parse("01234");
        assert_eq!(
            view.statuses(),
            &[
                AvailabilityStatus::Free,
                AvailabilityStatus::Tentative,
                AvailabilityStatus::Busy,
                AvailabilityStatus::OutOfOffice,
                AvailabilityStatus::WorkingElsewhere,
            ]
        );
    }

    #[test]
    fn unknown_code_is_preserved_and_blocking() {
        let status = AvailabilityStatus::from_code('9');
        assert_eq!(status, AvailabilityStatus::Unknown('9'));
        assert!(status.is_blocking());
        assert_eq!(status.code(), '9');
    }

    #[test]
    fn only_free_and_tentative_are_schedulable() {
        assert!(!AvailabilityStatus::Free.is_blocking());
        assert!(!AvailabilityStatus::Tentative.is_blocking());
        assert!(AvailabilityStatus::Busy.is_blocking());
        assert!(AvailabilityStatus::OutOfOffice.is_blocking());
        assert!(AvailabilityStatus::WorkingElsewhere.is_blocking());
    }

    #[test]
    fn view_serializes_as_code_string() {
        let view = AvailabilityView::parse("0x21");
        let json = serde_json::to_string(&view).unwrap();
        assert_eq!(json, r#""0x21""#);
        let back: AvailabilityView = serde_json::from_str(&json).unwrap();
        assert_eq!(back, view);
    }
}
