use crate::models::{Coordinate, FilterSpec, Listing, SearchHit};
use crate::core::{
    distance::distance_to_listing,
    filters::{matches, within_radius},
    sorting::order_listings,
};

/// Result of running the search pipeline
#[derive(Debug)]
pub struct SearchResult {
    pub hits: Vec<SearchHit>,
    /// Listings in the snapshot before filtering
    pub total_candidates: usize,
    /// Listings that passed every filter, before pagination
    pub total_matches: usize,
}

/// Page of results to return
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: usize,
    pub index: usize,
}

impl Page {
    pub fn new(limit: usize, index: usize) -> Self {
        Self { limit, index }
    }

    pub fn first(limit: usize) -> Self {
        Self::new(limit, 0)
    }

    /// Index of the first result on this page, for a page size of `limit`
    fn offset(&self, limit: usize) -> usize {
        limit.saturating_mul(self.index)
    }
}

/// Search orchestrator over an in-memory listing snapshot
///
/// # Pipeline Stages
/// 1. Predicate filtering against the filter spec
/// 2. Radius cut around the origin (when a max distance is set)
/// 3. Ordering by the spec's sort key
/// 4. Pagination
#[derive(Debug, Clone)]
pub struct SearchPipeline {
    max_limit: usize,
}

impl SearchPipeline {
    pub fn new(max_limit: usize) -> Self {
        Self { max_limit }
    }

    /// Run the full pipeline. The snapshot is never reordered.
    pub fn run(
        &self,
        listings: &[Listing],
        spec: &FilterSpec,
        origin: Option<&Coordinate>,
        page: Page,
    ) -> SearchResult {
        let total_candidates = listings.len();

        let mut survivors: Vec<&Listing> = listings
            .iter()
            // Stage 1: predicate checks
            .filter(|listing| matches(listing, spec))
            // Stage 2: radius cut
            .filter(|listing| within_radius(listing, spec, origin))
            .collect();

        let total_matches = survivors.len();

        // Stage 3: ordering
        order_listings(&mut survivors, spec.sort_by, origin);

        // Stage 4: pagination; pages are sized by the capped limit
        let limit = page.limit.min(self.max_limit);
        let hits = survivors
            .into_iter()
            .skip(page.offset(limit))
            .take(limit)
            .map(|listing| SearchHit {
                min_price: listing.min_price(),
                distance_km: origin.and_then(|origin| distance_to_listing(origin, listing)),
                listing: listing.clone(),
            })
            .collect();

        SearchResult {
            hits,
            total_candidates,
            total_matches,
        }
    }
}

impl Default for SearchPipeline {
    fn default() -> Self {
        Self::new(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Amenities, Furnishing, Gender, ListingLocation, PriceRange, Rating, RoomKind, RoomType,
        SortKey,
    };

    fn create_listing(id: &str, rent: u32, lat: f64, lng: f64) -> Listing {
        Listing {
            id: id.to_string(),
            name: format!("PG {}", id),
            location: ListingLocation {
                address: format!("{} Main Road", id),
                city: "Bangalore".to_string(),
                coordinates: Some(Coordinate::new(lat, lng)),
                ..Default::default()
            },
            room_types: vec![RoomType {
                kind: RoomKind::Double,
                base_rent: rent,
                security_deposit: rent * 2,
                available_rooms: 2,
                furnishing: Furnishing::Fully,
            }],
            amenities: Amenities::default(),
            gender: Gender::CoEd,
            rating: Rating { average: 4.0, count: 5 },
            created_at: None,
        }
    }

    fn snapshot() -> Vec<Listing> {
        vec![
            create_listing("1", 25000, 12.97, 77.75),
            create_listing("2", 12000, 12.93, 77.62),
            create_listing("3", 8000, 13.10, 77.59),
            create_listing("4", 15000, 12.98, 77.60),
            create_listing("5", 20000, 12.91, 77.64),
        ]
    }

    #[test]
    fn test_default_spec_returns_snapshot_order() {
        let pipeline = SearchPipeline::default();
        let listings = snapshot();

        let result = pipeline.run(&listings, &FilterSpec::default(), None, Page::first(10));

        assert_eq!(result.total_candidates, 5);
        assert_eq!(result.total_matches, 5);
        let ids: Vec<&str> = result.hits.iter().map(|h| h.listing.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);
        assert!(result.hits.iter().all(|h| h.distance_km.is_none()));
    }

    #[test]
    fn test_price_filter_and_sort() {
        let pipeline = SearchPipeline::default();
        let listings = snapshot();
        let spec = FilterSpec {
            price_range: PriceRange::new(10000, 18000),
            sort_by: SortKey::Price,
            ..Default::default()
        };

        let result = pipeline.run(&listings, &spec, None, Page::first(10));

        let prices: Vec<u32> = result.hits.iter().filter_map(|h| h.min_price).collect();
        assert_eq!(prices, vec![12000, 15000]);
    }

    #[test]
    fn test_radius_and_distance_sort() {
        let pipeline = SearchPipeline::default();
        let listings = snapshot();
        let origin = Coordinate::new(12.9756, 77.6050);
        let spec = FilterSpec {
            max_distance_km: 10.0,
            sort_by: SortKey::Distance,
            ..Default::default()
        };

        let result = pipeline.run(&listings, &spec, Some(&origin), Page::first(10));

        let ids: Vec<&str> = result.hits.iter().map(|h| h.listing.id.as_str()).collect();
        assert_eq!(ids, vec!["4", "2", "5"]);
        assert!(result.hits.iter().all(|h| h.distance_km.is_some_and(|d| d <= 10.0)));
    }

    #[test]
    fn test_pagination() {
        let pipeline = SearchPipeline::new(2);
        let listings = snapshot();
        let spec = FilterSpec {
            sort_by: SortKey::Price,
            ..Default::default()
        };

        // Limit capped at the pipeline maximum
        let first = pipeline.run(&listings, &spec, None, Page::new(50, 0));
        let second = pipeline.run(&listings, &spec, None, Page::new(2, 1));
        let beyond = pipeline.run(&listings, &spec, None, Page::new(2, 5));

        let prices = |r: &SearchResult| r.hits.iter().filter_map(|h| h.min_price).collect::<Vec<_>>();
        assert_eq!(prices(&first), vec![8000, 12000]);
        assert_eq!(prices(&second), vec![15000, 20000]);
        assert!(beyond.hits.is_empty());
        assert_eq!(beyond.total_matches, 5);
    }

    #[test]
    fn test_capped_limit_pages_are_contiguous() {
        let pipeline = SearchPipeline::new(3);
        let listings: Vec<Listing> = (0..10)
            .map(|i| create_listing(&format!("pg-{:02}", i), 5000 + i * 1000, 12.97, 77.59))
            .collect();
        let spec = FilterSpec {
            sort_by: SortKey::Price,
            ..Default::default()
        };

        let mut seen = Vec::new();
        for index in 0..4 {
            let result = pipeline.run(&listings, &spec, None, Page::new(5, index));
            assert!(result.hits.len() <= 3);
            seen.extend(result.hits.into_iter().map(|h| h.listing.id));
        }

        let expected: Vec<String> = (0..10).map(|i| format!("pg-{:02}", i)).collect();
        assert_eq!(seen, expected);
    }
}
