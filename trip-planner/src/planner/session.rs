//! Persisted planning session.
//!
//! A [`Session`] is the owner of an itinerary, an expense ledger and the
//! destination catalog. It loads all three from a [`BlobStore`] when opened
//! and writes each back after every successful mutation. Nothing else
//! touches the store.

use std::convert::Infallible;
use std::sync::Arc;

use tracing::{debug, warn};

use super::config::PlannerConfig;
use super::itinerary::{Itinerary, ItinerarySnapshot};
use crate::catalog::{CatalogError, Destination, DestinationCatalog, builtin};
use crate::domain::{ItineraryError, Money, PlaceId};
use crate::fares::FareTable;
use crate::ledger::{ExpenseLedger, LedgerError};
use crate::store::{
    BlobStore, CATALOG_KEY, ITINERARY_KEY, LEDGER_KEY, StoreError, load_json, save_json,
};

/// Errors from session operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Itinerary(#[from] ItineraryError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

impl From<Infallible> for SessionError {
    fn from(e: Infallible) -> Self {
        match e {}
    }
}

/// An itinerary, ledger and catalog kept in sync with a store.
#[derive(Debug)]
pub struct Session<S: BlobStore> {
    store: S,
    itinerary: Itinerary,
    ledger: ExpenseLedger,
    catalog: DestinationCatalog,
    /// Destination whose price the ledger is checked against. Not persisted.
    budget_destination: Option<PlaceId>,
}

impl<S: BlobStore> Session<S> {
    /// Load saved state from `store`. A missing itinerary or ledger starts
    /// empty; a missing catalog starts as [`builtin::destinations`].
    pub fn open(
        store: S,
        config: &PlannerConfig,
        fares: Arc<FareTable>,
    ) -> Result<Self, SessionError> {
        let itinerary = match load_json::<ItinerarySnapshot, _>(&store, ITINERARY_KEY)? {
            Some(snapshot) => Itinerary::from_snapshot(snapshot, config, fares),
            None => Itinerary::with_config(config, fares),
        };
        let ledger: ExpenseLedger = load_json(&store, LEDGER_KEY)?.unwrap_or_default();
        let catalog = load_json(&store, CATALOG_KEY)?.unwrap_or_else(builtin::destinations);

        debug!(
            name = itinerary.name(),
            days = itinerary.days().len(),
            expenses = ledger.len(),
            destinations = catalog.len(),
            "session opened"
        );

        Ok(Self {
            store,
            itinerary,
            ledger,
            catalog,
            budget_destination: None,
        })
    }

    /// The itinerary being planned.
    pub fn itinerary(&self) -> &Itinerary {
        &self.itinerary
    }

    /// Recorded expenses.
    pub fn ledger(&self) -> &ExpenseLedger {
        &self.ledger
    }

    /// Known destinations.
    pub fn catalog(&self) -> &DestinationCatalog {
        &self.catalog
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Close the session, handing back the store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Run one itinerary mutation, then save. Nothing is saved if `op`
    /// fails.
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Arc;
    /// use chrono::NaiveDate;
    /// use trip_planner::fares::danang;
    /// use trip_planner::planner::{PlannerConfig, Session};
    /// use trip_planner::store::MemoryStore;
    ///
    /// let config = PlannerConfig::default();
    /// let fares = Arc::new(danang::fare_table());
    /// let mut session = Session::open(MemoryStore::new(), &config, fares).unwrap();
    ///
    /// let start = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();
    /// session.apply(|it| it.set_date_range(start, start)).unwrap();
    /// session.apply(|it| it.add_stop(0, danang::place(1).unwrap())).unwrap();
    ///
    /// assert_eq!(session.itinerary().stop_count(), 1);
    /// assert_eq!(session.store().write_count(), 2);
    /// ```
    pub fn apply<T, E, F>(&mut self, op: F) -> Result<T, SessionError>
    where
        F: FnOnce(&mut Itinerary) -> Result<T, E>,
        E: Into<SessionError>,
    {
        let out = op(&mut self.itinerary).map_err(Into::into)?;
        self.save_itinerary()?;
        Ok(out)
    }

    /// Move a stop and save if the move was applied.
    pub fn move_stop(
        &mut self,
        source_day: usize,
        source_index: usize,
        dest_day: usize,
        dest_index: usize,
    ) -> Result<bool, SessionError> {
        let moved = self
            .itinerary
            .move_stop(source_day, source_index, dest_day, dest_index);
        if moved {
            self.save_itinerary()?;
        }
        Ok(moved)
    }

    /// Run one ledger mutation, then save. Nothing is saved if `op` fails.
    ///
    /// Warns when the ledger total has gone past the price of the budget
    /// destination.
    pub fn apply_ledger<T, E, F>(&mut self, op: F) -> Result<T, SessionError>
    where
        F: FnOnce(&mut ExpenseLedger) -> Result<T, E>,
        E: Into<SessionError>,
    {
        let was_over = self.ledger_overrun().is_some();
        let out = op(&mut self.ledger).map_err(Into::into)?;
        save_json(&mut self.store, LEDGER_KEY, &self.ledger)?;
        if let (false, Some(over)) = (was_over, self.ledger_overrun()) {
            warn!(total = %self.ledger.total(), over = %over, "expenses exceed destination budget");
        }
        Ok(out)
    }

    /// Run one catalog mutation, then save. Nothing is saved if `op` fails.
    ///
    /// The budget destination is cleared if `op` removed it.
    pub fn apply_catalog<T, E, F>(&mut self, op: F) -> Result<T, SessionError>
    where
        F: FnOnce(&mut DestinationCatalog) -> Result<T, E>,
        E: Into<SessionError>,
    {
        let out = op(&mut self.catalog).map_err(Into::into)?;
        save_json(&mut self.store, CATALOG_KEY, &self.catalog)?;
        if self
            .budget_destination
            .is_some_and(|id| self.catalog.get(id).is_none())
        {
            debug!("budget destination removed from catalog");
            self.budget_destination = None;
        }
        Ok(out)
    }

    /// Check the ledger against the price of `id`, or stop checking with
    /// `None`.
    pub fn select_budget_destination(&mut self, id: Option<PlaceId>) -> Result<(), SessionError> {
        if let Some(id) = id {
            self.catalog
                .get(id)
                .ok_or(CatalogError::UnknownDestination(id))?;
        }
        self.budget_destination = id;
        Ok(())
    }

    /// The destination the ledger is checked against, if any.
    pub fn budget_destination(&self) -> Option<&Destination> {
        self.catalog.get(self.budget_destination?)
    }

    /// How far the ledger total exceeds the budget destination's price.
    pub fn ledger_overrun(&self) -> Option<Money> {
        let destination = self.budget_destination()?;
        self.ledger.overrun(destination.info.price)
    }

    /// Write the itinerary to the store.
    pub fn save_itinerary(&mut self) -> Result<(), SessionError> {
        save_json(&mut self.store, ITINERARY_KEY, &self.itinerary.snapshot())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::DestinationInfo;
    use crate::domain::StopUpdate;
    use crate::fares::danang;
    use crate::ledger::{ExpenseCategory, NewExpense};
    use crate::store::{FileStore, MemoryStore};
    use chrono::NaiveDate;
    use std::convert::Infallible;
    use tempfile::tempdir;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn fares() -> Arc<FareTable> {
        Arc::new(danang::fare_table())
    }

    fn open(store: MemoryStore) -> Session<MemoryStore> {
        Session::open(store, &PlannerConfig::default(), fares()).unwrap()
    }

    #[test]
    fn empty_store_starts_empty() {
        let session = open(MemoryStore::new());
        let it = session.itinerary();

        assert_eq!(it.name(), "Chuyến đi Đà Nẵng");
        assert_eq!(it.budget(), Money(5_000_000));
        assert!(!it.has_days());
        assert!(session.ledger().is_empty());
        assert_eq!(session.catalog(), &builtin::destinations());
        assert!(session.budget_destination().is_none());
        assert_eq!(session.store().write_count(), 0);
    }

    #[test]
    fn mutations_are_saved_and_reloaded() {
        let mut session = open(MemoryStore::new());
        session
            .apply(|it| it.set_date_range(date(20), date(21)))
            .unwrap();
        session
            .apply(|it| it.add_stop(0, danang::place(1).unwrap()))
            .unwrap();
        session
            .apply(|it| it.add_stop(0, danang::place(2).unwrap()))
            .unwrap();
        session
            .apply(|it| it.update_stop(0, 1, StopUpdate::StayOvernight(true)))
            .unwrap();
        let before = *session.itinerary().totals();

        let reopened = open(session.into_store());

        assert_eq!(reopened.itinerary().days().len(), 2);
        assert_eq!(reopened.itinerary().stop_count(), 2);
        assert_eq!(*reopened.itinerary().totals(), before);
        assert!(reopened.itinerary().stop(0, 1).unwrap().stay_overnight);
    }

    #[test]
    fn failed_mutation_is_not_saved() {
        let mut session = open(MemoryStore::new());
        let err = session
            .apply(|it| it.set_date_range(date(20), date(19)))
            .unwrap_err();

        assert!(matches!(
            err,
            SessionError::Itinerary(ItineraryError::InvalidRange { .. })
        ));
        assert_eq!(session.store().write_count(), 0);
    }

    #[test]
    fn cancelled_move_is_not_saved() {
        let mut session = open(MemoryStore::new());
        session
            .apply(|it| it.set_date_range(date(20), date(20)))
            .unwrap();
        let writes = session.store().write_count();

        assert!(!session.move_stop(0, 0, 0, 0).unwrap());
        assert_eq!(session.store().write_count(), writes);
    }

    #[test]
    fn applied_move_is_saved() {
        let mut session = open(MemoryStore::new());
        session
            .apply(|it| it.set_date_range(date(20), date(20)))
            .unwrap();
        session
            .apply(|it| it.add_stop(0, danang::place(1).unwrap()))
            .unwrap();
        session
            .apply(|it| it.add_stop(0, danang::place(2).unwrap()))
            .unwrap();
        let writes = session.store().write_count();

        assert!(session.move_stop(0, 1, 0, 0).unwrap());
        assert_eq!(session.store().write_count(), writes + 1);
    }

    #[test]
    fn infallible_setters_through_apply() {
        let mut session = open(MemoryStore::new());
        session
            .apply(|it| {
                it.rename("Huế");
                it.set_budget(Money(1));
                Ok::<_, Infallible>(())
            })
            .unwrap();

        let reopened = open(session.into_store());
        assert_eq!(reopened.itinerary().name(), "Huế");
        assert_eq!(reopened.itinerary().budget(), Money(1));
    }

    #[test]
    fn ledger_persists() {
        let mut session = open(MemoryStore::new());
        let id = session
            .apply_ledger(|l| {
                Ok::<_, Infallible>(l.add(NewExpense {
                    category: ExpenseCategory::Food,
                    amount: Money(500_000),
                    description: "Ăn tối".into(),
                    date: date(20),
                }))
            })
            .unwrap();

        let err = session.apply_ledger(|l| l.remove(id + 1)).unwrap_err();
        assert!(matches!(err, SessionError::Ledger(_)));

        let reopened = open(session.into_store());
        assert_eq!(reopened.ledger().total(), Money(500_000));
    }

    #[test]
    fn opens_browser_saved_ledger() {
        let mut store = MemoryStore::new();
        store
            .set(
                LEDGER_KEY,
                r#"[{"id":"1","category":"food","amount":500000,
                     "description":"Ăn tối tại nhà hàng","date":"2024-03-20"},
                    {"id":"2","category":"transport","amount":300000,"date":"2024-03-20"}]"#,
            )
            .unwrap();

        let mut session = open(store);
        assert_eq!(session.ledger().len(), 2);
        assert_eq!(session.ledger().total(), Money(800_000));

        let id = session
            .apply_ledger(|l| {
                Ok::<_, Infallible>(l.add(NewExpense {
                    category: ExpenseCategory::Other,
                    amount: Money(1),
                    description: String::new(),
                    date: date(21),
                }))
            })
            .unwrap();
        assert_eq!(id, 3);

        let saved = session.store().get(LEDGER_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&saved).unwrap();
        assert!(value.is_array());
        assert_eq!(value[2]["id"], "3");
    }

    #[test]
    fn catalog_edits_persist() {
        let mut session = open(MemoryStore::new());
        let id = session
            .apply_catalog(|c| {
                c.add(DestinationInfo::new(
                    "Quy Nhơn",
                    "Miền Trung, Việt Nam",
                    "biển",
                    4.4,
                    Money(800_000),
                ))
            })
            .unwrap();
        session.apply_catalog(|c| c.remove(PlaceId(2))).unwrap();

        let err = session.apply_catalog(|c| c.remove(PlaceId(2))).unwrap_err();
        assert!(matches!(
            err,
            SessionError::Catalog(CatalogError::UnknownDestination(_))
        ));
        assert_eq!(session.store().write_count(), 2);

        let reopened = open(session.into_store());
        assert_eq!(reopened.catalog().len(), 10);
        assert_eq!(reopened.catalog().get(id).unwrap().info.name, "Quy Nhơn");
        assert!(reopened.catalog().get(PlaceId(2)).is_none());
    }

    #[test]
    fn ledger_checked_against_destination_price() {
        let mut session = open(MemoryStore::new());
        let err = session
            .select_budget_destination(Some(PlaceId(99)))
            .unwrap_err();
        assert!(matches!(err, SessionError::Catalog(_)));
        assert!(session.budget_destination().is_none());

        // Mũi Né costs 700.000 ₫
        session.select_budget_destination(Some(PlaceId(9))).unwrap();
        let add = |amount| {
            move |l: &mut ExpenseLedger| {
                Ok::<_, Infallible>(l.add(NewExpense {
                    category: ExpenseCategory::Food,
                    amount: Money(amount),
                    description: String::new(),
                    date: date(20),
                }))
            }
        };
        session.apply_ledger(add(700_000)).unwrap();
        assert_eq!(session.ledger_overrun(), None);

        session.apply_ledger(add(50_000)).unwrap();
        assert_eq!(session.ledger_overrun(), Some(Money(50_000)));

        session.select_budget_destination(None).unwrap();
        assert_eq!(session.ledger_overrun(), None);
    }

    #[test]
    fn removing_budget_destination_clears_it() {
        let mut session = open(MemoryStore::new());
        session.select_budget_destination(Some(PlaceId(9))).unwrap();
        session.apply_catalog(|c| c.remove(PlaceId(1))).unwrap();
        assert_eq!(session.budget_destination().unwrap().id, PlaceId(9));

        session.apply_catalog(|c| c.remove(PlaceId(9))).unwrap();
        assert!(session.budget_destination().is_none());
    }

    #[test]
    fn catalog_destination_as_stop() {
        let mut session = open(MemoryStore::new());
        let place = session.catalog().get(PlaceId(1)).unwrap().as_place();
        session
            .apply(|it| it.set_date_range(date(20), date(20)))
            .unwrap();
        session.apply(|it| it.add_stop(0, place)).unwrap();
        assert_eq!(session.itinerary().stop(0, 0).unwrap().place.name, "Đà Nẵng");
    }

    #[test]
    fn restore_relinks_against_current_fares() {
        let mut store = MemoryStore::new();
        {
            let mut session = Session::open(&mut store, &PlannerConfig::default(), fares()).unwrap();
            session
                .apply(|it| it.set_date_range(date(20), date(20)))
                .unwrap();
            session
                .apply(|it| it.add_stop(0, danang::place(1).unwrap()))
                .unwrap();
            session
                .apply(|it| it.add_stop(0, danang::place(2).unwrap()))
                .unwrap();
        }

        let session =
            Session::open(store, &PlannerConfig::default(), Arc::new(FareTable::new())).unwrap();
        assert!(session.itinerary().stop(0, 1).unwrap().leg.is_none());
        assert_eq!(session.itinerary().total_cost(), Money::ZERO);
    }

    #[test]
    fn file_store_roundtrip() {
        let dir = tempdir().unwrap();
        let config = PlannerConfig::default();
        {
            let mut session = Session::open(FileStore::new(dir.path()), &config, fares()).unwrap();
            session
                .apply(|it| it.set_date_range(date(20), date(22)))
                .unwrap();
            session
                .apply(|it| it.add_stop(2, danang::place(4).unwrap()))
                .unwrap();
        }

        let session = Session::open(FileStore::new(dir.path()), &config, fares()).unwrap();
        assert_eq!(session.itinerary().days().len(), 3);
        assert_eq!(session.itinerary().stop(2, 0).unwrap().place.name, "Bà Nà Hills");
    }

    #[test]
    fn corrupt_store_fails_to_open() {
        let mut store = MemoryStore::new();
        store.set(ITINERARY_KEY, "{").unwrap();

        let err = Session::open(store, &PlannerConfig::default(), fares()).unwrap_err();
        assert!(matches!(err, SessionError::Store(StoreError::Json { .. })));
    }
}
