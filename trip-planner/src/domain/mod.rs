//! Domain types for the trip planner.
//!
//! Value types shared by the fare table, the itinerary aggregator and the
//! persisted snapshot. Identifiers are newtypes so a place id can't be
//! confused with an index.

mod day;
mod error;
mod money;
mod place;
mod stop;

pub use day::Day;
pub use error::ItineraryError;
pub use money::Money;
pub use place::{Place, PlaceId};
pub use stop::{Stop, StopUpdate, TransportLeg};
