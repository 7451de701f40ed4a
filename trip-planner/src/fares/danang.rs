//! Built-in Da Nang sample data.
//!
//! Six destinations around Da Nang with transport fares between every pair
//! and per-place activity costs. Amounts are in dong, times in minutes.

use crate::domain::Place;

use super::{FareTable, FareTableBuilder};

/// The destinations a stop can be picked from.
pub fn places() -> Vec<Place> {
    vec![
        Place::new(1, "Đà Nẵng", "biển"),
        Place::new(2, "Hội An", "thành phố"),
        Place::new(3, "Ngũ Hành Sơn", "núi"),
        Place::new(4, "Bà Nà Hills", "núi"),
        Place::new(5, "Biển Mỹ Khê", "biển"),
        Place::new(6, "Cầu Rồng", "thành phố"),
    ]
}

/// Look up a built-in destination by id.
pub fn place(id: u32) -> Option<Place> {
    places().into_iter().find(|p| p.id.0 == id)
}

/// Transport and activity costs for [`places`].
pub fn fare_table() -> FareTable {
    FareTableBuilder::new()
        .fare(1, 2, 30, 150_000)
        .fare(1, 3, 25, 120_000)
        .fare(1, 4, 45, 200_000)
        .fare(1, 5, 15, 80_000)
        .fare(1, 6, 10, 50_000)
        .fare(2, 3, 35, 170_000)
        .fare(2, 4, 60, 250_000)
        .fare(2, 5, 40, 180_000)
        .fare(2, 6, 35, 160_000)
        .fare(3, 4, 40, 190_000)
        .fare(3, 5, 30, 140_000)
        .fare(3, 6, 20, 100_000)
        .fare(4, 5, 60, 230_000)
        .fare(4, 6, 50, 220_000)
        .fare(5, 6, 20, 90_000)
        // place, entrance, food, lodging
        .activity(1, 0, 200_000, 750_000)
        .activity(2, 120_000, 250_000, 650_000)
        .activity(3, 100_000, 150_000, 0)
        .activity(4, 750_000, 350_000, 900_000)
        .activity(5, 0, 180_000, 0)
        .activity(6, 0, 220_000, 0)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Money, PlaceId};

    #[test]
    fn every_pair_has_a_fare() {
        let table = fare_table();
        let ids: Vec<PlaceId> = places().iter().map(|p| p.id).collect();

        assert_eq!(table.fare_count(), 15);
        for &a in &ids {
            for &b in &ids {
                if a != b {
                    assert!(table.has_fare(a, b), "missing fare {a}-{b}");
                }
            }
        }
    }

    #[test]
    fn every_place_has_activity_cost() {
        let table = fare_table();
        assert_eq!(table.activity_count(), places().len());
        assert_eq!(table.activity_cost(PlaceId(4)).entrance, Money(750_000));
    }

    #[test]
    fn place_lookup() {
        assert_eq!(place(2).map(|p| p.name), Some("Hội An".to_string()));
        assert!(place(99).is_none());
    }
}
