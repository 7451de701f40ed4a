//! Place identity types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a destination in the catalog.
///
/// Ordering is numeric, which is what `PlacePair` normalisation relies on.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaceId(pub u32);

impl fmt::Debug for PlaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlaceId({})", self.0)
    }
}

impl fmt::Display for PlaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A destination that can be visited: identifier, display name and a free
/// category tag such as `"biển"` or `"núi"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
    pub id: PlaceId,
    pub name: String,
    pub category: String,
}

impl Place {
    /// A place with the given id, name and category tag.
    pub fn new(id: u32, name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: PlaceId(id),
            name: name.into(),
            category: category.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_is_numeric() {
        assert!(PlaceId(2) < PlaceId(10));
        assert_eq!(PlaceId(3).max(PlaceId(1)), PlaceId(3));
    }

    #[test]
    fn debug_and_display() {
        assert_eq!(format!("{:?}", PlaceId(4)), "PlaceId(4)");
        assert_eq!(PlaceId(4).to_string(), "4");
    }

    #[test]
    fn place_constructor() {
        let place = Place::new(1, "Đà Nẵng", "biển");
        assert_eq!(place.id, PlaceId(1));
        assert_eq!(place.name, "Đà Nẵng");
        assert_eq!(place.category, "biển");
    }
}
