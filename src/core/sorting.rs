use std::cmp::Ordering;

use crate::models::{Coordinate, Listing, SortKey};
use crate::core::distance::distance_to_listing;

/// Return a new vector ordered by `key`; the input slice is left untouched
///
/// `Relevance` (which also stands in for any unrecognised key) keeps the
/// input order. `Distance` without an origin is likewise a no-op.
pub fn sort_listings(listings: &[Listing], key: SortKey, origin: Option<&Coordinate>) -> Vec<Listing> {
    let mut refs: Vec<&Listing> = listings.iter().collect();
    order_listings(&mut refs, key, origin);
    refs.into_iter().cloned().collect()
}

/// Reorder a slice of listing references in place
///
/// All orderings are stable. For `Distance`, ties are broken by listing id
/// and listings without coordinates go last in their original order.
pub fn order_listings(listings: &mut [&Listing], key: SortKey, origin: Option<&Coordinate>) {
    match key {
        SortKey::Price => listings.sort_by(|a, b| compare_price(a, b)),
        SortKey::Rating => listings.sort_by(|a, b| {
            b.rating.average.total_cmp(&a.rating.average)
        }),
        SortKey::Newest => listings.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortKey::Distance => {
            if let Some(origin) = origin {
                sort_by_distance(listings, origin);
            }
        }
        SortKey::Relevance => {}
    }
}

/// Ascending minimum rent; listings without a price sort last
#[inline]
fn compare_price(a: &Listing, b: &Listing) -> Ordering {
    match (a.min_price(), b.min_price()) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn sort_by_distance(listings: &mut [&Listing], origin: &Coordinate) {
    // Compute each distance once rather than on every comparison
    let mut keyed: Vec<(Option<f64>, &Listing)> = listings
        .iter()
        .map(|listing| (distance_to_listing(origin, listing), *listing))
        .collect();

    keyed.sort_by(|(da, a), (db, b)| match (da, db) {
        (Some(da), Some(db)) => da.total_cmp(db).then_with(|| a.id.cmp(&b.id)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    for (slot, (_, listing)) in listings.iter_mut().zip(keyed) {
        *slot = listing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Amenities, Furnishing, Gender, ListingLocation, Rating, RoomKind, RoomType,
    };
    use chrono::{TimeZone, Utc};

    fn create_listing(id: &str, rent: u32, rating: f64, coordinates: Option<Coordinate>) -> Listing {
        Listing {
            id: id.to_string(),
            name: format!("PG {}", id),
            location: ListingLocation {
                city: "Bangalore".to_string(),
                coordinates,
                ..Default::default()
            },
            room_types: vec![RoomType {
                kind: RoomKind::Single,
                base_rent: rent,
                security_deposit: rent,
                available_rooms: 1,
                furnishing: Furnishing::Fully,
            }],
            amenities: Amenities::default(),
            gender: Gender::CoEd,
            rating: Rating { average: rating, count: 10 },
            created_at: None,
        }
    }

    fn ids(listings: &[Listing]) -> Vec<&str> {
        listings.iter().map(|l| l.id.as_str()).collect()
    }

    #[test]
    fn test_price_ascending_stable() {
        let listings = vec![
            create_listing("a", 15000, 4.0, None),
            create_listing("b", 9000, 3.0, None),
            create_listing("c", 15000, 5.0, None),
            create_listing("d", 7000, 2.0, None),
        ];

        let sorted = sort_listings(&listings, SortKey::Price, None);
        assert_eq!(ids(&sorted), vec!["d", "b", "a", "c"]);
        // Source untouched
        assert_eq!(ids(&listings), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_price_missing_sorts_last() {
        let mut roomless = create_listing("x", 0, 4.0, None);
        roomless.room_types.clear();
        let listings = vec![roomless, create_listing("a", 12000, 4.0, None)];

        let sorted = sort_listings(&listings, SortKey::Price, None);
        assert_eq!(ids(&sorted), vec!["a", "x"]);
    }

    #[test]
    fn test_rating_descending_idempotent() {
        let listings = vec![
            create_listing("a", 1, 3.5, None),
            create_listing("b", 1, 4.8, None),
            create_listing("c", 1, 4.8, None),
        ];

        let once = sort_listings(&listings, SortKey::Rating, None);
        assert_eq!(ids(&once), vec!["b", "c", "a"]);

        let twice = sort_listings(&once, SortKey::Rating, None);
        assert_eq!(ids(&twice), ids(&once));
    }

    #[test]
    fn test_newest_first() {
        let mut old = create_listing("old", 1, 1.0, None);
        old.created_at = Some(Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap());
        let mut new = create_listing("new", 1, 1.0, None);
        new.created_at = Some(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap());
        let undated = create_listing("undated", 1, 1.0, None);

        let sorted = sort_listings(&[old, undated, new], SortKey::Newest, None);
        assert_eq!(ids(&sorted), vec!["new", "old", "undated"]);
    }

    #[test]
    fn test_distance_requires_origin() {
        let listings = vec![
            create_listing("far", 1, 1.0, Some(Coordinate::new(13.10, 77.59))),
            create_listing("near", 1, 1.0, Some(Coordinate::new(12.98, 77.60))),
        ];

        let unsorted = sort_listings(&listings, SortKey::Distance, None);
        assert_eq!(ids(&unsorted), vec!["far", "near"]);

        let origin = Coordinate::new(12.9756, 77.6050);
        let sorted = sort_listings(&listings, SortKey::Distance, Some(&origin));
        assert_eq!(ids(&sorted), vec!["near", "far"]);
    }

    #[test]
    fn test_distance_ties_by_id_and_unplaced_last() {
        let spot = Some(Coordinate::new(12.93, 77.62));
        let listings = vec![
            create_listing("unplaced-2", 1, 1.0, None),
            create_listing("z", 1, 1.0, spot),
            create_listing("unplaced-1", 1, 1.0, None),
            create_listing("m", 1, 1.0, spot),
        ];

        let origin = Coordinate::new(12.9756, 77.6050);
        let sorted = sort_listings(&listings, SortKey::Distance, Some(&origin));
        assert_eq!(ids(&sorted), vec!["m", "z", "unplaced-2", "unplaced-1"]);
    }

    #[test]
    fn test_nan_values_order_consistently() {
        let listings = vec![
            create_listing("a", 1, 4.0, None),
            create_listing("nan", 1, f64::NAN, None),
            create_listing("b", 1, 5.0, None),
            create_listing("c", 1, 3.0, None),
        ];
        let by_rating = sort_listings(&listings, SortKey::Rating, None);
        assert_eq!(ids(&by_rating), vec!["nan", "b", "a", "c"]);

        let listings = vec![
            create_listing("unplaced", 1, 1.0, None),
            create_listing("broken", 1, 1.0, Some(Coordinate::new(f64::NAN, 77.60))),
            create_listing("near", 1, 1.0, Some(Coordinate::new(12.98, 77.60))),
        ];
        let origin = Coordinate::new(12.9756, 77.6050);
        let by_distance = sort_listings(&listings, SortKey::Distance, Some(&origin));
        assert_eq!(ids(&by_distance), vec!["near", "broken", "unplaced"]);
    }

    #[test]
    fn test_relevance_is_noop() {
        let listings = vec![
            create_listing("b", 20000, 2.0, None),
            create_listing("a", 10000, 5.0, None),
        ];

        let sorted = sort_listings(&listings, "popularity".parse().unwrap(), None);
        assert_eq!(ids(&sorted), vec!["b", "a"]);
    }
}
