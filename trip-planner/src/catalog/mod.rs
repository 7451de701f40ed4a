//! Destination catalog: the browsable list of places a trip can go to.
//!
//! The catalog is persisted as a JSON array of destinations with camelCase
//! keys and the category under `"type"`. New destinations get the largest
//! existing id plus one.

pub mod builtin;

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::domain::{Money, Place, PlaceId};

/// Highest rating a destination can carry.
pub const MAX_RATING: f64 = 5.0;

/// Editable fields of a destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationInfo {
    pub name: String,

    /// Link to a picture, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Region, e.g. `"Miền Trung, Việt Nam"`.
    #[serde(default)]
    pub location: String,

    /// Free category tag such as `"biển"` or `"núi"`.
    #[serde(rename = "type")]
    pub kind: String,

    /// Visitor rating from 0 to [`MAX_RATING`].
    pub rating: f64,

    /// Typical cost of the trip, in dong.
    pub price: Money,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub activities: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_time_to_visit: Option<String>,
}

impl DestinationInfo {
    /// Required fields only; everything optional left empty.
    pub fn new(
        name: impl Into<String>,
        location: impl Into<String>,
        kind: impl Into<String>,
        rating: f64,
        price: Money,
    ) -> Self {
        Self {
            name: name.into(),
            image: None,
            location: location.into(),
            kind: kind.into(),
            rating,
            price,
            description: None,
            activities: Vec::new(),
            best_time_to_visit: None,
        }
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if self.name.trim().is_empty() {
            return Err(CatalogError::MissingName);
        }
        if !(0.0..=MAX_RATING).contains(&self.rating) {
            return Err(CatalogError::InvalidRating(self.rating));
        }
        Ok(())
    }
}

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    pub id: PlaceId,
    #[serde(flatten)]
    pub info: DestinationInfo,
}

impl Destination {
    /// The destination as an itinerary stop location.
    pub fn as_place(&self) -> Place {
        Place {
            id: self.id,
            name: self.info.name.clone(),
            category: self.info.kind.clone(),
        }
    }
}

/// Catalog errors. The catalog is unchanged when one is returned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("no destination with id {0}")]
    UnknownDestination(PlaceId),

    #[error("destination name is empty")]
    MissingName,

    #[error("rating {0} is outside 0..=5")]
    InvalidRating(f64),
}

/// Result ordering for [`DestinationCatalog::search`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Highest rated first.
    #[default]
    Rating,
    PriceAscending,
    PriceDescending,
    /// Catalog order.
    Listed,
}

/// Criteria for browsing the catalog. The default matches everything.
#[derive(Debug, Clone, PartialEq)]
pub struct DestinationFilter {
    query: String,
    kind: Option<String>,
    min_price: Money,
    max_price: Money,
    min_rating: f64,
    sort: SortOrder,
}

impl Default for DestinationFilter {
    fn default() -> Self {
        Self {
            query: String::new(),
            kind: None,
            min_price: Money::ZERO,
            max_price: Money(u64::MAX),
            min_rating: 0.0,
            sort: SortOrder::default(),
        }
    }
}

impl DestinationFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Case-insensitive substring of the name.
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into().to_lowercase();
        self
    }

    /// Exact category tag.
    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Inclusive price bounds.
    pub fn price(mut self, min: Money, max: Money) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    /// Lowest acceptable rating, inclusive.
    pub fn min_rating(mut self, rating: f64) -> Self {
        self.min_rating = rating;
        self
    }

    /// Result ordering.
    pub fn sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// Whether `destination` passes every criterion.
    pub fn matches(&self, destination: &Destination) -> bool {
        let info = &destination.info;
        (self.query.is_empty() || info.name.to_lowercase().contains(&self.query))
            && self.kind.as_ref().is_none_or(|k| *k == info.kind)
            && info.price >= self.min_price
            && info.price <= self.max_price
            && info.rating >= self.min_rating
    }

    fn compare(&self, a: &Destination, b: &Destination) -> Ordering {
        match self.sort {
            SortOrder::Rating => b.info.rating.total_cmp(&a.info.rating),
            SortOrder::PriceAscending => a.info.price.cmp(&b.info.price),
            SortOrder::PriceDescending => b.info.price.cmp(&a.info.price),
            SortOrder::Listed => Ordering::Equal,
        }
    }
}

/// All known destinations in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DestinationCatalog {
    destinations: Vec<Destination>,
}

impl DestinationCatalog {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every destination, in catalog order.
    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    /// The destination with `id`, if listed.
    pub fn get(&self, id: PlaceId) -> Option<&Destination> {
        self.destinations.iter().find(|d| d.id == id)
    }

    /// Number of destinations.
    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    /// Whether the catalog lists nothing.
    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }

    /// Distinct category tags, sorted.
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self
            .destinations
            .iter()
            .map(|d| d.info.kind.as_str())
            .collect();
        kinds.sort_unstable();
        kinds.dedup();
        kinds
    }

    /// List a new destination and return its id, one past the largest in
    /// use.
    pub fn add(&mut self, info: DestinationInfo) -> Result<PlaceId, CatalogError> {
        info.validate()?;
        let id = self
            .destinations
            .iter()
            .map(|d| d.id.0)
            .max()
            .map_or(PlaceId(1), |max| PlaceId(max.saturating_add(1)));
        self.destinations.push(Destination { id, info });
        Ok(id)
    }

    /// Replace the fields of a destination, keeping its id and position.
    pub fn update(&mut self, id: PlaceId, info: DestinationInfo) -> Result<(), CatalogError> {
        info.validate()?;
        let entry = self
            .destinations
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or(CatalogError::UnknownDestination(id))?;
        entry.info = info;
        Ok(())
    }

    /// Delete a destination and return it.
    pub fn remove(&mut self, id: PlaceId) -> Result<Destination, CatalogError> {
        let pos = self
            .destinations
            .iter()
            .position(|d| d.id == id)
            .ok_or(CatalogError::UnknownDestination(id))?;
        Ok(self.destinations.remove(pos))
    }

    /// Destinations passing `filter`, ordered by its sort. Ties keep catalog
    /// order.
    ///
    /// # Example
    ///
    /// ```
    /// use trip_planner::catalog::{DestinationFilter, SortOrder, builtin};
    /// use trip_planner::domain::Money;
    ///
    /// let catalog = builtin::destinations();
    /// let filter = DestinationFilter::new()
    ///     .kind("biển")
    ///     .price(Money(500_000), Money(1_500_000))
    ///     .sort(SortOrder::PriceAscending);
    ///
    /// let names: Vec<_> = catalog
    ///     .search(&filter)
    ///     .iter()
    ///     .map(|d| d.info.name.as_str())
    ///     .collect();
    /// assert_eq!(names, ["Mũi Né", "Đà Nẵng"]);
    /// ```
    pub fn search(&self, filter: &DestinationFilter) -> Vec<&Destination> {
        let mut found: Vec<&Destination> = self
            .destinations
            .iter()
            .filter(|d| filter.matches(d))
            .collect();
        found.sort_by(|a, b| filter.compare(a, b));
        found
    }
}

impl From<Vec<Destination>> for DestinationCatalog {
    fn from(destinations: Vec<Destination>) -> Self {
        Self { destinations }
    }
}
