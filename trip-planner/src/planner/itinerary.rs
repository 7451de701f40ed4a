//! The itinerary aggregator.
//!
//! [`Itinerary`] owns the day and stop state of a trip. Every structural
//! mutation re-links the transport legs whose predecessor changed and then
//! recomputes the cached totals before returning, so readers never see
//! totals that disagree with the stops.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use super::config::PlannerConfig;
use super::totals::{Totals, compute_totals};
use crate::domain::{Day, ItineraryError, Money, Place, Stop, StopUpdate, TransportLeg};
use crate::fares::FareTable;

/// Persisted form of an itinerary. Totals are derived, so not stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItinerarySnapshot {
    pub name: String,
    pub budget: Money,
    pub days: Vec<Day>,
}

/// A trip being planned: named, budgeted, and split into days of stops.
///
/// With no date range selected the day list is empty.
#[derive(Debug, Clone)]
pub struct Itinerary {
    name: String,
    budget: Money,
    days: Vec<Day>,
    totals: Totals,
    fares: Arc<FareTable>,
    stop_hours: u8,
}

impl Itinerary {
    /// Create an empty itinerary.
    pub fn new(name: impl Into<String>, budget: Money, fares: Arc<FareTable>) -> Self {
        Self {
            name: name.into(),
            budget,
            days: Vec::new(),
            totals: Totals::default(),
            fares,
            stop_hours: PlannerConfig::default().default_stop_hours,
        }
    }

    /// Create an empty itinerary using the configured name, budget and stop
    /// duration.
    pub fn with_config(config: &PlannerConfig, fares: Arc<FareTable>) -> Self {
        let mut itinerary = Self::new(config.trip_name.clone(), config.budget, fares);
        itinerary.stop_hours = config.default_stop_hours;
        itinerary
    }

    /// Rebuild from a persisted snapshot.
    ///
    /// Stored legs are discarded and re-linked against `fares`, which may
    /// have changed since the snapshot was written.
    pub fn from_snapshot(
        snapshot: ItinerarySnapshot,
        config: &PlannerConfig,
        fares: Arc<FareTable>,
    ) -> Self {
        let mut itinerary = Self::with_config(config, fares);
        itinerary.name = snapshot.name;
        itinerary.budget = snapshot.budget;
        itinerary.days = snapshot.days;
        for day in 0..itinerary.days.len() {
            for stop in 0..itinerary.days[day].stops.len() {
                itinerary.relink(day, stop);
            }
        }
        itinerary.recompute_totals();
        debug!(
            total = %itinerary.totals.cost,
            over_budget = itinerary.is_over_budget(),
            "itinerary restored"
        );
        itinerary
    }

    /// Copy of the persistent state.
    pub fn snapshot(&self) -> ItinerarySnapshot {
        ItinerarySnapshot {
            name: self.name.clone(),
            budget: self.budget,
            days: self.days.clone(),
        }
    }

    /// Display name of the trip.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Replace the display name.
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Budget ceiling the total is compared against.
    pub fn budget(&self) -> Money {
        self.budget
    }

    /// Change the budget ceiling. Totals don't depend on it.
    pub fn set_budget(&mut self, budget: Money) {
        let was_over = self.is_over_budget();
        self.budget = budget;
        self.warn_if_newly_over(was_over);
    }

    /// All days, in date order.
    pub fn days(&self) -> &[Day] {
        &self.days
    }

    /// The day at `index`, if any.
    pub fn day(&self, index: usize) -> Option<&Day> {
        self.days.get(index)
    }

    /// The stop at `(day, index)`, if any.
    pub fn stop(&self, day: usize, index: usize) -> Option<&Stop> {
        self.days.get(day)?.stops.get(index)
    }

    /// Total number of stops over all days.
    pub fn stop_count(&self) -> usize {
        self.days.iter().map(Day::len).sum()
    }

    /// Whether a date range has been chosen.
    pub fn has_days(&self) -> bool {
        !self.days.is_empty()
    }

    /// Fare table used for legs and activity costs.
    pub fn fares(&self) -> &FareTable {
        &self.fares
    }

    /// Cached totals, current as of the last mutation.
    pub fn totals(&self) -> &Totals {
        &self.totals
    }

    /// Cached total cost.
    pub fn total_cost(&self) -> Money {
        self.totals.cost
    }

    /// Cached total travel time in minutes.
    pub fn transport_minutes(&self) -> u32 {
        self.totals.transport_minutes
    }

    /// Replace all days with one empty day per date in `start..=end`.
    ///
    /// Existing stops are discarded. On error nothing changes.
    pub fn set_date_range(&mut self, start: NaiveDate, end: NaiveDate) -> Result<(), ItineraryError> {
        let days = Day::range(start, end)?;
        debug!(%start, %end, days = days.len(), dropped_stops = self.stop_count(), "regenerating days");
        self.days = days;
        self.refresh_totals();
        Ok(())
    }

    /// Append a stop for `place` at the end of a day.
    pub fn add_stop(&mut self, day: usize, place: Place) -> Result<(), ItineraryError> {
        let len = self.day_checked(day)?.len();
        let stop = Stop::new(place, self.stop_hours);
        self.insert_stop(day, len, stop)
    }

    /// Insert an existing stop at `index` within a day (`index` may equal
    /// the day's length to append).
    pub fn insert_stop(&mut self, day: usize, index: usize, stop: Stop) -> Result<(), ItineraryError> {
        let len = self.day_checked(day)?.len();
        if index > len {
            return Err(ItineraryError::StopOutOfRange { day, index, len });
        }
        trace!(day, index, place = %stop.place.name, "inserting stop");
        self.days[day].stops.insert(index, stop);
        self.relink(day, index);
        self.relink(day, index + 1);
        self.refresh_totals();
        Ok(())
    }

    /// Delete a stop and return it. Its successor is re-linked to its new
    /// predecessor.
    pub fn remove_stop(&mut self, day: usize, index: usize) -> Result<Stop, ItineraryError> {
        self.stop_checked(day, index)?;
        let removed = self.days[day].stops.remove(index);
        trace!(day, index, place = %removed.place.name, "removed stop");
        self.relink(day, index);
        self.refresh_totals();
        Ok(removed)
    }

    /// Move a stop to another position, on the same day or another one.
    ///
    /// `dest_index` is the position the stop ends up at. Returns `false`
    /// without changing anything when any coordinate is out of range, which
    /// is how an abandoned drag arrives.
    pub fn move_stop(
        &mut self,
        source_day: usize,
        source_index: usize,
        dest_day: usize,
        dest_index: usize,
    ) -> bool {
        if !self.move_in_range(source_day, source_index, dest_day, dest_index) {
            debug!(
                source_day,
                source_index, dest_day, dest_index, "discarding out of range move"
            );
            return false;
        }

        let stop = self.days[source_day].stops.remove(source_index);
        self.days[dest_day].stops.insert(dest_index, stop);

        if source_day == dest_day {
            let lo = source_index.min(dest_index);
            let hi = source_index.max(dest_index);
            for i in lo..=hi + 1 {
                self.relink(dest_day, i);
            }
        } else {
            self.relink(source_day, source_index);
            self.relink(dest_day, dest_index);
            self.relink(dest_day, dest_index + 1);
        }

        trace!(source_day, source_index, dest_day, dest_index, "moved stop");
        self.refresh_totals();
        true
    }

    /// Change one field of a stop. Only cost-relevant changes recompute.
    pub fn update_stop(
        &mut self,
        day: usize,
        index: usize,
        update: StopUpdate,
    ) -> Result<(), ItineraryError> {
        self.stop_checked(day, index)?;
        let recompute = update.affects_cost();
        update.apply(&mut self.days[day].stops[index]);
        if recompute {
            self.refresh_totals();
        }
        Ok(())
    }

    /// Recompute cached totals from the current days.
    ///
    /// Only the cache is written. Calling it twice in a row leaves the same
    /// totals and logs nothing.
    pub fn recompute_totals(&mut self) -> Totals {
        self.totals = compute_totals(&self.days, &self.fares);
        self.totals
    }

    /// Whether the total cost is strictly above the budget.
    pub fn is_over_budget(&self) -> bool {
        self.totals.cost > self.budget
    }

    /// How far the total exceeds the budget, if it does.
    pub fn budget_overrun(&self) -> Option<Money> {
        self.totals
            .cost
            .checked_sub(self.budget)
            .filter(|over| *over > Money::ZERO)
    }

    /// Recompute after a mutation, warning once when the plan goes over
    /// budget.
    fn refresh_totals(&mut self) {
        let was_over = self.is_over_budget();
        self.recompute_totals();
        self.warn_if_newly_over(was_over);
    }

    fn warn_if_newly_over(&self, was_over: bool) {
        if !was_over && self.is_over_budget() {
            warn!(total = %self.totals.cost, budget = %self.budget, "itinerary is over budget");
        }
    }

    fn day_checked(&self, day: usize) -> Result<&Day, ItineraryError> {
        self.days.get(day).ok_or(ItineraryError::DayOutOfRange {
            index: day,
            len: self.days.len(),
        })
    }

    fn stop_checked(&self, day: usize, index: usize) -> Result<&Stop, ItineraryError> {
        let d = self.day_checked(day)?;
        d.stops.get(index).ok_or(ItineraryError::StopOutOfRange {
            day,
            index,
            len: d.len(),
        })
    }

    fn move_in_range(
        &self,
        source_day: usize,
        source_index: usize,
        dest_day: usize,
        dest_index: usize,
    ) -> bool {
        let (Some(src), Some(dst)) = (self.days.get(source_day), self.days.get(dest_day)) else {
            return false;
        };
        if source_index >= src.len() {
            return false;
        }
        // The destination is measured after the stop has been taken out.
        let dest_len = if source_day == dest_day {
            dst.len() - 1
        } else {
            dst.len()
        };
        dest_index <= dest_len
    }

    /// Recompute the incoming leg of the stop at `(day, index)`, if any.
    fn relink(&mut self, day: usize, index: usize) {
        let stops = &mut self.days[day].stops;
        if index >= stops.len() {
            return;
        }
        let leg = match index {
            0 => TransportLeg::NONE,
            _ => self
                .fares
                .lookup(stops[index - 1].place_id(), stops[index].place_id())
                .as_leg(),
        };
        stops[index].leg = leg;
    }
}
