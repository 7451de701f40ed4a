//! Derived trip totals.

use chrono::Duration;

use crate::domain::{Day, Money};
use crate::fares::FareTable;

/// Trip cost split by what it is spent on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CostBreakdown {
    pub entrance: Money,
    pub food: Money,
    /// Only counted for stops marked as staying overnight.
    pub lodging: Money,
    pub transport: Money,
}

impl CostBreakdown {
    /// Sum of all four components.
    pub fn total(&self) -> Money {
        self.entrance + self.food + self.lodging + self.transport
    }
}

/// Cached totals for an itinerary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub cost: Money,
    pub transport_minutes: u32,
    pub breakdown: CostBreakdown,
}

impl Totals {
    /// Total travel time as a duration.
    pub fn transport_time(&self) -> Duration {
        Duration::minutes(i64::from(self.transport_minutes))
    }
}

/// Computes totals from scratch.
///
/// Every stop adds its entrance and food cost, plus lodging when staying
/// overnight. Every pair of adjacent stops within a day adds the fare
/// between them. Nothing links the last stop of one day to the first stop
/// of the next.
pub fn compute_totals(days: &[Day], fares: &FareTable) -> Totals {
    let mut breakdown = CostBreakdown::default();
    let mut transport_minutes: u32 = 0;

    for day in days {
        for stop in &day.stops {
            let activity = fares.activity_cost(stop.place_id());
            breakdown.entrance += activity.entrance;
            breakdown.food += activity.food;
            if stop.stay_overnight {
                breakdown.lodging += activity.lodging;
            }
        }

        for pair in day.stops.windows(2) {
            let fare = fares.lookup(pair[0].place_id(), pair[1].place_id());
            breakdown.transport += fare.cost;
            transport_minutes = transport_minutes.saturating_add(fare.minutes);
        }
    }

    Totals {
        cost: breakdown.total(),
        transport_minutes,
        breakdown,
    }
}
