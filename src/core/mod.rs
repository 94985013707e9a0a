// Core search exports
pub mod colleges;
pub mod distance;
pub mod filters;
pub mod history;
pub mod pipeline;
pub mod sorting;
pub mod suggest;

pub use colleges::{annotate_nearby_colleges, builtin_colleges};
pub use distance::{distance_to_listing, haversine_distance};
pub use filters::{matches, matches_location, within_radius};
pub use history::{RecentSearches, RECENT_SEARCH_CAPACITY};
pub use pipeline::{Page, SearchPipeline, SearchResult};
pub use sorting::{order_listings, sort_listings};
pub use suggest::{Gazetteer, Place, DEFAULT_SUGGESTION_LIMIT, MIN_QUERY_CHARS};
