//! Trip days.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{ItineraryError, Stop};

/// One calendar date of the trip and the stops planned for it, in visiting
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Day {
    pub date: NaiveDate,
    pub stops: Vec<Stop>,
}

impl Day {
    /// Longest date range [`Day::range`] accepts, in days.
    pub const MAX_SPAN: usize = 366;

    /// An empty day.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            stops: Vec::new(),
        }
    }

    /// Generates one empty day per date in `start..=end`, ascending.
    ///
    /// Ranges longer than [`Day::MAX_SPAN`] days are rejected before
    /// anything is allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use trip_planner::domain::Day;
    /// use chrono::NaiveDate;
    ///
    /// let start = NaiveDate::from_ymd_opt(2024, 2, 28).unwrap();
    /// let end = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    /// let days = Day::range(start, end).unwrap();
    /// assert_eq!(days.len(), 3); // 2024 is a leap year
    /// assert_eq!(days[1].display_date(), "29/02/2024");
    /// ```
    pub fn range(start: NaiveDate, end: NaiveDate) -> Result<Vec<Day>, ItineraryError> {
        if end < start {
            return Err(ItineraryError::InvalidRange { start, end });
        }
        let count = (end - start).num_days() + 1;
        if count > Self::MAX_SPAN as i64 {
            return Err(ItineraryError::RangeTooLong {
                days: count,
                max: Self::MAX_SPAN,
            });
        }
        Ok((0..count)
            .map(|offset| Day::new(start + Duration::days(offset)))
            .collect())
    }

    /// Date formatted as `DD/MM/YYYY`.
    pub fn display_date(&self) -> String {
        self.date.format("%d/%m/%Y").to_string()
    }

    /// Number of stops planned for the day.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Whether the day has no stops.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}
