use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Number of recent searches kept per user
pub const RECENT_SEARCH_CAPACITY: usize = 5;

/// Most-recent-first list of accepted suggestions, de-duplicated and bounded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentSearches {
    entries: VecDeque<String>,
    capacity: usize,
}

impl RecentSearches {
    pub fn new() -> Self {
        Self::with_capacity(RECENT_SEARCH_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Rebuild from stored entries, already ordered most recent first
    pub fn from_entries<I>(entries: I, capacity: usize) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut recent = Self::with_capacity(capacity);
        // Push oldest first so the newest ends up in front
        let entries: Vec<String> = entries.into_iter().collect();
        for entry in entries.into_iter().rev() {
            recent.push(&entry);
        }
        recent
    }

    /// Record a selection, moving an existing entry to the front
    ///
    /// Comparison ignores case and surrounding whitespace. Blank names are
    /// ignored. Returns whether the list changed.
    pub fn push(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.capacity == 0 {
            return false;
        }

        if let Some(position) = self
            .entries
            .iter()
            .position(|entry| entry.to_lowercase() == name.to_lowercase())
        {
            if position == 0 && self.entries[0] == name {
                return false;
            }
            self.entries.remove(position);
        }

        self.entries.push_front(name.to_string());
        self.entries.truncate(self.capacity);
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }
}

impl Default for RecentSearches {
    fn default() -> Self {
        Self::new()
    }
}
