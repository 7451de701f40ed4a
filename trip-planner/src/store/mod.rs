//! Key-value blob storage for persisted planner state.
//!
//! The planner only ever needs whole-value reads and writes under a handful
//! of fixed keys. A missing key is a normal state meaning "nothing saved
//! yet", so `get` returns `Ok(None)` rather than an error.

mod error;
mod file;
mod memory;

pub use error::StoreError;
pub use file::FileStore;
pub use memory::MemoryStore;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Key of the persisted itinerary.
pub const ITINERARY_KEY: &str = "trip_itinerary";
/// Key of the persisted expense ledger.
pub const LEDGER_KEY: &str = "budget_manager_data";
/// Key of the persisted destination catalog.
pub const CATALOG_KEY: &str = "touristPlaces";

/// Whole-value storage keyed by string.
pub trait BlobStore {
    /// The value under `key`, or `None` if nothing was stored.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<S: BlobStore + ?Sized> BlobStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

/// Read and deserialize the JSON value under `key`.
pub fn load_json<T, S>(store: &S, key: &str) -> Result<Option<T>, StoreError>
where
    T: DeserializeOwned,
    S: BlobStore + ?Sized,
{
    let Some(raw) = store.get(key)? else {
        debug!(key, "nothing stored");
        return Ok(None);
    };
    let value = serde_json::from_str(&raw).map_err(|source| StoreError::Json {
        key: key.to_string(),
        source,
    })?;
    debug!(key, bytes = raw.len(), "loaded");
    Ok(Some(value))
}

/// Serialize `value` as pretty JSON and store it under `key`.
pub fn save_json<T, S>(store: &mut S, key: &str, value: &T) -> Result<(), StoreError>
where
    T: Serialize + ?Sized,
    S: BlobStore + ?Sized,
{
    let json = serde_json::to_string_pretty(value).map_err(|source| StoreError::Json {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &json)?;
    debug!(key, bytes = json.len(), "saved");
    Ok(())
}
