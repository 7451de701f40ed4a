//! Planner configuration.

use std::path::PathBuf;

use tracing::warn;

use crate::domain::Money;

/// Environment variable naming the store directory.
pub const ENV_STORE: &str = "TRIP_PLANNER_STORE";
/// Environment variable holding the budget ceiling in dong.
pub const ENV_BUDGET: &str = "TRIP_PLANNER_BUDGET";
/// Environment variable naming a fare table JSON file.
pub const ENV_FARES: &str = "TRIP_PLANNER_FARES";

/// Defaults for new itineraries and where state lives.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Name given to a new itinerary.
    pub trip_name: String,

    /// Budget ceiling for a new itinerary.
    pub budget: Money,

    /// Planned duration of a newly added stop, in hours.
    pub default_stop_hours: u8,

    /// Directory holding the persisted itinerary and ledger.
    pub store_dir: PathBuf,

    /// Fare table to load instead of the built-in one.
    pub fares_path: Option<PathBuf>,
}

impl PlannerConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        trip_name: impl Into<String>,
        budget: Money,
        default_stop_hours: u8,
        store_dir: impl Into<PathBuf>,
        fares_path: Option<PathBuf>,
    ) -> Self {
        Self {
            trip_name: trip_name.into(),
            budget,
            default_stop_hours,
            store_dir: store_dir.into(),
            fares_path,
        }
    }

    /// Defaults overridden by `TRIP_PLANNER_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(dir) = lookup(ENV_STORE) {
            config.store_dir = PathBuf::from(dir);
        }

        if let Some(raw) = lookup(ENV_BUDGET) {
            match raw.trim().parse::<u64>() {
                Ok(amount) => config.budget = Money(amount),
                Err(e) => warn!(value = %raw, error = %e, "ignoring unparseable {}", ENV_BUDGET),
            }
        }

        if let Some(path) = lookup(ENV_FARES) {
            config.fares_path = Some(PathBuf::from(path));
        }

        config
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            trip_name: "Chuyến đi Đà Nẵng".to_string(),
            budget: Money(5_000_000),
            default_stop_hours: 2,
            store_dir: PathBuf::from("trip_planner_data"),
            fares_path: None,
        }
    }
}
