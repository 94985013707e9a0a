// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Amenities, Amenity, College, CollegeKind, Coordinate, FilterSpec, Furnishing, Gender, Listing,
    ListingLocation, NearbyCollege, PriceRange, Rating, RoomKind, RoomType, SearchHit, SortKey,
    Suggestion, SuggestionKind,
};
pub use requests::{RecentSearchesQuery, SearchRequest, SelectSuggestionRequest, SuggestionQuery};
pub use responses::{
    CollegesResponse, ErrorResponse, HealthResponse, RecentSearchesResponse, SearchResponse,
    SuggestionsResponse,
};
