//! PG Finder - listing search and ranking service
//!
//! This library provides the search core used by the PG finder marketplace:
//! filter predicates, Haversine distance, sorting, and location suggestions
//! from a static gazetteer, plus the thin service layer around them.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{
    distance::haversine_distance, filters::matches, sorting::sort_listings, Gazetteer,
    RecentSearches, SearchPipeline,
};
pub use models::{Coordinate, FilterSpec, Listing, SearchHit, SortKey, Suggestion};

/// Suggestions for `query` from the built-in gazetteer
pub fn suggest_locations(query: &str, limit: usize) -> Vec<Suggestion> {
    Gazetteer::builtin().suggest(query, limit)
}
