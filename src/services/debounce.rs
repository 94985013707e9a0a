use crate::core::Gazetteer;
use crate::models::Suggestion;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Quiet period before a lookup runs
pub const DEFAULT_DEBOUNCE_DELAY: Duration = Duration::from_millis(300);

/// Receiver for a debounced lookup
///
/// Resolves to `Err` when a newer query superseded this one.
pub type PendingSuggestions = oneshot::Receiver<Vec<Suggestion>>;

/// Runs suggestion lookups after a quiet period, cancelling stale ones
///
/// Each `submit` schedules a lookup after `delay`. Submitting again before
/// it fires aborts the earlier task, so only the latest keystroke is
/// looked up. The gazetteer itself stays synchronous and pure.
pub struct SuggestionDebouncer {
    gazetteer: Arc<Gazetteer>,
    delay: Duration,
    limit: usize,
    include_colleges: bool,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl SuggestionDebouncer {
    pub fn new(gazetteer: Arc<Gazetteer>, delay: Duration, limit: usize) -> Self {
        Self {
            gazetteer,
            delay,
            limit,
            include_colleges: false,
            pending: Mutex::new(None),
        }
    }

    pub fn with_default_delay(gazetteer: Arc<Gazetteer>, limit: usize) -> Self {
        Self::new(gazetteer, DEFAULT_DEBOUNCE_DELAY, limit)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Also emit "Near {college}" suggestions
    pub fn with_colleges(mut self) -> Self {
        self.include_colleges = true;
        self
    }

    /// Schedule a lookup for `query`, superseding any pending one
    ///
    /// Must be called from within a tokio runtime.
    pub fn submit(&self, query: impl Into<String>) -> PendingSuggestions {
        let query = query.into();
        let (tx, rx) = oneshot::channel();

        let gazetteer = Arc::clone(&self.gazetteer);
        let delay = self.delay;
        let limit = self.limit;
        let include_colleges = self.include_colleges;

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let suggestions = if include_colleges {
                gazetteer.suggest_with_colleges(&query, limit)
            } else {
                gazetteer.suggest(&query, limit)
            };
            // Receiver may have been dropped by the caller
            let _ = tx.send(suggestions);
        });

        let previous = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(handle);

        if let Some(previous) = previous {
            previous.abort();
        }

        rx
    }

    /// Abort the pending lookup, if any
    pub fn cancel(&self) {
        let pending = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        if let Some(handle) = pending {
            handle.abort();
        }
    }
}

impl Drop for SuggestionDebouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
