//! Trip itinerary planner.
//!
//! Plans a multi-day trip as days of stops, keeping transport legs, total
//! cost and travel time consistent with a static fare table, and persists
//! the plan, an expense ledger and a destination catalog to a key-value
//! store.

pub mod catalog;
pub mod domain;
pub mod fares;
pub mod ledger;
pub mod planner;
pub mod report;
pub mod store;
