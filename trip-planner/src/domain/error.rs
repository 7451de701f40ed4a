//! Itinerary error types.
//!
//! These cover rejected direct operations on the itinerary. Unknown fares
//! are never errors, and cancelled moves are reported through the return
//! value of `move_stop` rather than here.

use chrono::NaiveDate;

/// Errors from direct itinerary operations. The itinerary is left untouched
/// when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ItineraryError {
    /// End date precedes start date
    #[error("invalid date range: end {end} is before start {start}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// More days than an itinerary may hold
    #[error("date range of {days} days exceeds the limit of {max}")]
    RangeTooLong { days: i64, max: usize },

    /// Day index past the last day
    #[error("day index {index} out of range ({len} days)")]
    DayOutOfRange { index: usize, len: usize },

    /// Stop index past the last stop of a day
    #[error("stop index {index} out of range for day {day} ({len} stops)")]
    StopOutOfRange { day: usize, index: usize, len: usize },
}

impl ItineraryError {
    /// True for either index variant.
    pub fn is_index_out_of_range(&self) -> bool {
        matches!(
            self,
            ItineraryError::DayOutOfRange { .. } | ItineraryError::StopOutOfRange { .. }
        )
    }
}
