//! Itinerary planning.
//!
//! [`Itinerary`] keeps days of stops and their derived cost and travel time
//! consistent under insertion, removal, reordering and field edits.
//! [`Session`] ties an itinerary, an expense ledger and the destination
//! catalog to persistent storage.

mod config;
mod itinerary;
mod session;
mod totals;


pub use config::{ENV_BUDGET, ENV_FARES, ENV_STORE, PlannerConfig};
pub use itinerary::{Itinerary, ItinerarySnapshot};
pub use session::{Session, SessionError};
pub use totals::{CostBreakdown, Totals, compute_totals};
