//! Plain-text rendering of an itinerary, ledger and catalog.
//!
//! Each report borrows what it shows and renders through [`fmt::Display`].

use std::fmt;

use crate::catalog::{DestinationCatalog, DestinationFilter};
use crate::ledger::ExpenseLedger;
use crate::planner::Itinerary;

/// Multi-line summary: one block per day, then totals and budget status.
pub struct ItineraryReport<'a>(pub &'a Itinerary);

impl fmt::Display for ItineraryReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let itinerary = self.0;
        writeln!(f, "{}", itinerary.name())?;

        if !itinerary.has_days() {
            return writeln!(f, "  (no dates selected)");
        }

        for (i, day) in itinerary.days().iter().enumerate() {
            writeln!(f, "Day {} - {}", i + 1, day.display_date())?;
            if day.is_empty() {
                writeln!(f, "  (no stops)")?;
            }
            for (j, stop) in day.stops.iter().enumerate() {
                if j > 0 {
                    writeln!(f, "    -> {} min, {}", stop.leg.minutes, stop.leg.cost)?;
                }
                let overnight = if stop.stay_overnight { ", overnight" } else { "" };
                writeln!(
                    f,
                    "  {}. {} [{}] {}h{}",
                    j + 1,
                    stop.place.name,
                    stop.place.category,
                    stop.duration_hours,
                    overnight
                )?;
                if !stop.note.is_empty() {
                    writeln!(f, "     note: {}", stop.note)?;
                }
            }
        }

        let totals = itinerary.totals();
        let b = &totals.breakdown;
        writeln!(
            f,
            "Transport: {} ({} min)",
            b.transport, totals.transport_minutes
        )?;
        writeln!(
            f,
            "Entrance: {}  Food: {}  Lodging: {}",
            b.entrance, b.food, b.lodging
        )?;
        writeln!(f, "Total: {} / budget {}", totals.cost, itinerary.budget())?;
        if let Some(over) = itinerary.budget_overrun() {
            writeln!(f, "Over budget by {over}")?;
        }
        Ok(())
    }
}

/// Ledger total and per-category amounts.
pub struct LedgerReport<'a>(pub &'a ExpenseLedger);

impl fmt::Display for LedgerReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ledger = self.0;
        writeln!(f, "Expenses: {} ({} items)", ledger.total(), ledger.len())?;
        for (category, amount) in ledger.total_by_category() {
            writeln!(f, "  {category}: {amount}")?;
        }
        Ok(())
    }
}

/// Destinations matching a filter, one per line.
pub struct CatalogReport<'a> {
    pub catalog: &'a DestinationCatalog,
    pub filter: &'a DestinationFilter,
}

impl fmt::Display for CatalogReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let found = self.catalog.search(self.filter);
        writeln!(f, "Destinations: {} of {}", found.len(), self.catalog.len())?;
        for d in found {
            writeln!(
                f,
                "  {}. {} [{}] {} - {:.1}/5, {}",
                d.id, d.info.name, d.info.kind, d.info.location, d.info.rating, d.info.price
            )?;
        }
        Ok(())
    }
}
