use crate::models::Listing;
use crate::services::backend::ListingQuery;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// In-memory cache of listing snapshots keyed by upstream query
///
/// A TTL of zero disables caching so that every search fetches a fresh
/// snapshot from the backend.
pub struct SnapshotCache {
    inner: Option<moka::future::Cache<String, Arc<Vec<Listing>>>>,
    ttl_secs: u64,
}

impl SnapshotCache {
    pub fn new(capacity: u64, ttl_secs: u64) -> Self {
        let inner = (ttl_secs > 0).then(|| {
            moka::future::CacheBuilder::new(capacity)
                .time_to_live(Duration::from_secs(ttl_secs))
                .build()
        });

        Self { inner, ttl_secs }
    }

    pub fn disabled() -> Self {
        Self::new(0, 0)
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.is_some()
    }

    pub async fn get(&self, key: &str) -> Option<Arc<Vec<Listing>>> {
        let cache = self.inner.as_ref()?;
        let hit = cache.get(key).await;
        if hit.is_some() {
            tracing::trace!("Snapshot cache hit: {}", key);
        } else {
            tracing::trace!("Snapshot cache miss: {}", key);
        }
        hit
    }

    pub async fn insert(&self, key: String, listings: Arc<Vec<Listing>>) {
        if let Some(cache) = &self.inner {
            tracing::trace!("Snapshot cache set: {}", key);
            cache.insert(key, listings).await;
        }
    }

    pub fn invalidate_all(&self) {
        if let Some(cache) = &self.inner {
            cache.invalidate_all();
            tracing::debug!("Invalidated all cached snapshots");
        }
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            enabled: self.is_enabled(),
            entries: self.inner.as_ref().map_or(0, |cache| cache.entry_count()),
            ttl_secs: self.ttl_secs,
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub enabled: bool,
    pub entries: u64,
    pub ttl_secs: u64,
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Build a cache key for a listing snapshot
    pub fn snapshot(query: &ListingQuery) -> String {
        format!("pgs:{}", query.to_query_string())
    }
}
