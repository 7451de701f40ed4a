//! Stops and the transport legs that lead into them.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use super::{Money, Place, PlaceId};

/// Cost and time of getting from the previous stop to this one.
///
/// The first stop of a day always carries [`TransportLeg::NONE`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportLeg {
    pub cost: Money,
    pub minutes: u32,
}

impl TransportLeg {
    /// The leg of a day's first stop: free and instant.
    pub const NONE: TransportLeg = TransportLeg {
        cost: Money::ZERO,
        minutes: 0,
    };

    pub fn new(cost: Money, minutes: u32) -> Self {
        Self { cost, minutes }
    }

    /// Travel time as a `Duration`.
    pub fn duration(&self) -> Duration {
        Duration::minutes(i64::from(self.minutes))
    }

    /// Whether this is a zero-cost, zero-time leg.
    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }
}

/// A visit to a place on one day of the trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stop {
    pub place: Place,
    /// Planned time at the place, in hours.
    pub duration_hours: u8,
    pub note: String,
    pub stay_overnight: bool,
    /// Incoming leg. Owned by the aggregator, which re-links it whenever the
    /// predecessor changes.
    pub leg: TransportLeg,
}

impl Stop {
    /// A stop at `place` with no note, no overnight stay and no leg yet.
    pub fn new(place: Place, duration_hours: u8) -> Self {
        Self {
            place,
            duration_hours,
            note: String::new(),
            stay_overnight: false,
            leg: TransportLeg::NONE,
        }
    }

    /// Id of the visited place.
    pub fn place_id(&self) -> PlaceId {
        self.place.id
    }
}

/// A change to one editable field of a stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopUpdate {
    DurationHours(u8),
    Note(String),
    StayOvernight(bool),
}

impl StopUpdate {
    /// Whether applying this update can change the trip cost.
    pub fn affects_cost(&self) -> bool {
        matches!(self, StopUpdate::StayOvernight(_))
    }

    /// Applies the update to `stop`.
    pub fn apply(self, stop: &mut Stop) {
        match self {
            StopUpdate::DurationHours(h) => stop.duration_hours = h,
            StopUpdate::Note(n) => stop.note = n,
            StopUpdate::StayOvernight(s) => stop.stay_overnight = s,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop() -> Stop {
        Stop::new(Place::new(1, "Đà Nẵng", "biển"), 2)
    }

    #[test]
    fn new_stop_defaults() {
        let s = stop();
        assert_eq!(s.place_id(), PlaceId(1));
        assert_eq!(s.duration_hours, 2);
        assert!(s.note.is_empty());
        assert!(!s.stay_overnight);
        assert!(s.leg.is_none());
    }

    #[test]
    fn leg_duration() {
        let leg = TransportLeg::new(Money(150_000), 30);
        assert_eq!(leg.duration(), Duration::minutes(30));
        assert!(!leg.is_none());
    }

    #[test]
    fn apply_updates() {
        let mut s = stop();
        StopUpdate::DurationHours(5).apply(&mut s);
        StopUpdate::Note("bring sunscreen".into()).apply(&mut s);
        StopUpdate::StayOvernight(true).apply(&mut s);

        assert_eq!(s.duration_hours, 5);
        assert_eq!(s.note, "bring sunscreen");
        assert!(s.stay_overnight);
    }

    #[test]
    fn only_overnight_affects_cost() {
        assert!(StopUpdate::StayOvernight(false).affects_cost());
        assert!(!StopUpdate::Note(String::new()).affects_cost());
        assert!(!StopUpdate::DurationHours(3).affects_cost());
    }
}
