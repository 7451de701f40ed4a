//! Fare table: transport between places and activity cost at each place.
//!
//! Transport fares are symmetric: getting from A to B costs the same and
//! takes as long as getting from B to A. Data for untracked pairs or places
//! is expected to be missing, so lookups fall back to zero instead of
//! failing.

pub mod danang;

use std::collections::HashMap;
use std::path::Path;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::domain::{Money, PlaceId, TransportLeg};

/// Unordered pair of places, normalised so that `a <= b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlacePair {
    a: PlaceId,
    b: PlaceId,
}

impl PlacePair {
    /// The pair `{x, y}`; argument order is irrelevant.
    pub fn new(x: PlaceId, y: PlaceId) -> Self {
        if x <= y {
            Self { a: x, b: y }
        } else {
            Self { a: y, b: x }
        }
    }

    /// The pair as `(smaller, larger)`.
    pub fn ids(&self) -> (PlaceId, PlaceId) {
        (self.a, self.b)
    }
}

/// Transport time and cost between two places.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FareEntry {
    pub minutes: u32,
    pub cost: Money,
}

impl FareEntry {
    /// Travel time as a duration.
    pub fn duration(&self) -> Duration {
        Duration::minutes(i64::from(self.minutes))
    }

    /// The leg a stop carries when reached by this fare.
    pub fn as_leg(&self) -> TransportLeg {
        TransportLeg::new(self.cost, self.minutes)
    }
}

/// Spending at a place: entrance fee, food, and lodging if staying the night.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActivityCost {
    pub entrance: Money,
    pub food: Money,
    pub lodging: Money,
}

impl ActivityCost {
    /// Cost of visiting, including lodging only when staying overnight.
    pub fn visit_cost(&self, stay_overnight: bool) -> Money {
        let base = self.entrance + self.food;
        if stay_overnight {
            base + self.lodging
        } else {
            base
        }
    }
}

/// Errors loading a fare table from configuration.
#[derive(Debug, thiserror::Error)]
pub enum FareConfigError {
    #[error("failed to read fare config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid fare config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Static lookup of transport fares and activity costs.
///
/// Built once at startup and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct FareTable {
    fares: HashMap<PlacePair, FareEntry>,
    activities: HashMap<PlaceId, ActivityCost>,
}

impl FareTable {
    /// Create an empty table. Every lookup returns zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fare between two places. Order of arguments is irrelevant.
    pub fn insert_fare(&mut self, a: PlaceId, b: PlaceId, entry: FareEntry) {
        self.fares.insert(PlacePair::new(a, b), entry);
    }

    /// Set the activity cost at a place.
    pub fn insert_activity(&mut self, place: PlaceId, cost: ActivityCost) {
        self.activities.insert(place, cost);
    }

    /// Transport fare between two places, in either order.
    ///
    /// Returns a zero entry when the pair is not tracked.
    ///
    /// # Example
    ///
    /// ```
    /// use trip_planner::domain::{Money, PlaceId};
    /// use trip_planner::fares::FareTableBuilder;
    ///
    /// let table = FareTableBuilder::new().fare(1, 2, 30, 150_000).build();
    ///
    /// let there = table.lookup(PlaceId(1), PlaceId(2));
    /// let back = table.lookup(PlaceId(2), PlaceId(1));
    /// assert_eq!(there, back);
    /// assert_eq!(there.cost, Money(150_000));
    ///
    /// assert_eq!(table.lookup(PlaceId(1), PlaceId(9)).cost, Money::ZERO);
    /// ```
    pub fn lookup(&self, a: PlaceId, b: PlaceId) -> FareEntry {
        self.fares
            .get(&PlacePair::new(a, b))
            .copied()
            .unwrap_or_default()
    }

    /// Whether a fare is recorded for the pair.
    pub fn has_fare(&self, a: PlaceId, b: PlaceId) -> bool {
        self.fares.contains_key(&PlacePair::new(a, b))
    }

    /// Activity cost at a place; all zero when the place is unknown.
    pub fn activity_cost(&self, place: PlaceId) -> ActivityCost {
        self.activities.get(&place).copied().unwrap_or_default()
    }

    /// Number of tracked place pairs.
    pub fn fare_count(&self) -> usize {
        self.fares.len()
    }

    /// Number of places with activity costs.
    pub fn activity_count(&self) -> usize {
        self.activities.len()
    }

    /// Whether neither fares nor activity costs are recorded.
    pub fn is_empty(&self) -> bool {
        self.fares.is_empty() && self.activities.is_empty()
    }

    /// Parse a table from its JSON configuration form.
    pub fn from_json(json: &str) -> Result<Self, FareConfigError> {
        let config: FareTableConfig = serde_json::from_str(json)?;
        Ok(config.into())
    }

    /// Read and parse a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FareConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }
}

/// On-disk form of a fare table.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct FareTableConfig {
    #[serde(default)]
    pub fares: Vec<FareRecord>,
    #[serde(default)]
    pub activities: Vec<ActivityRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FareRecord {
    pub a: PlaceId,
    pub b: PlaceId,
    pub minutes: u32,
    pub cost: Money,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub place: PlaceId,
    #[serde(default)]
    pub entrance: Money,
    #[serde(default)]
    pub food: Money,
    #[serde(default)]
    pub lodging: Money,
}

impl From<FareTableConfig> for FareTable {
    fn from(config: FareTableConfig) -> Self {
        let mut table = FareTable::new();
        for r in config.fares {
            table.insert_fare(
                r.a,
                r.b,
                FareEntry {
                    minutes: r.minutes,
                    cost: r.cost,
                },
            );
        }
        for r in config.activities {
            table.insert_activity(
                r.place,
                ActivityCost {
                    entrance: r.entrance,
                    food: r.food,
                    lodging: r.lodging,
                },
            );
        }
        table
    }
}

/// Builder for creating fare tables.
#[derive(Debug, Default)]
pub struct FareTableBuilder {
    inner: FareTable,
}

impl FareTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a transport fare between two places.
    pub fn fare(mut self, a: u32, b: u32, minutes: u32, cost: u64) -> Self {
        self.inner.insert_fare(
            PlaceId(a),
            PlaceId(b),
            FareEntry {
                minutes,
                cost: Money(cost),
            },
        );
        self
    }

    /// Add activity costs for a place.
    pub fn activity(mut self, place: u32, entrance: u64, food: u64, lodging: u64) -> Self {
        self.inner.insert_activity(
            PlaceId(place),
            ActivityCost {
                entrance: Money(entrance),
                food: Money(food),
                lodging: Money(lodging),
            },
        );
        self
    }

    pub fn build(self) -> FareTable {
        self.inner
    }
}
