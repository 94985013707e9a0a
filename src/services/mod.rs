// Service exports
pub mod backend;
pub mod cache;
pub mod debounce;
pub mod postgres;

pub use backend::{BackendClient, BackendError, ListingQuery};
pub use cache::{CacheKey, CacheStats, SnapshotCache};
pub use debounce::{PendingSuggestions, SuggestionDebouncer, DEFAULT_DEBOUNCE_DELAY};
pub use postgres::{PostgresClient, PostgresError};
