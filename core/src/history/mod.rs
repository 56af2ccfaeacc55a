//! Search term history
//!
//! The history is a short, most-recent-first list of distinct search terms.
//! It is loaded from a [`HistoryStore`] on every read and merged then saved
//! on every submission, so the store is the single source of truth.

mod store;

use crate::error::{Error, HistoryError, Result};
use std::collections::VecDeque;

pub use store::{HistoryStore, JsonHistoryStore, HISTORY_SLOT};

#[cfg(any(test, feature = "testing"))]
pub use store::MemoryHistoryStore;

/// Maximum number of remembered terms; a configured limit can only lower it
pub const DEFAULT_HISTORY_LIMIT: usize = 20;

/// Ordered, de-duplicated search terms (most recent first)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchHistory {
    entries: VecDeque<String>,
    limit: usize,
}

impl SearchHistory {
    /// Empty history keeping at most `limit` terms, never more than
    /// [`DEFAULT_HISTORY_LIMIT`]
    pub fn new(limit: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            limit: limit.min(DEFAULT_HISTORY_LIMIT),
        }
    }

    /// Build from stored entries, dropping blanks and later duplicates
    pub fn from_entries<I>(entries: I, limit: usize) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut history = Self::new(limit);
        for entry in entries {
            if entry.is_empty() || history.entries.contains(&entry) {
                continue;
            }
            history.entries.push_back(entry);
        }
        history.trim_to_limit();
        history
    }

    /// Put `term` at the front, removing any earlier occurrence
    pub fn push(&mut self, term: &str) {
        if term.is_empty() {
            return;
        }
        self.entries.retain(|existing| existing != term);
        self.entries.push_front(term.to_string());
        self.trim_to_limit();
    }

    fn trim_to_limit(&mut self) {
        self.entries.truncate(self.limit);
    }

    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

/// Load the current history from `store`
pub fn load(store: &dyn HistoryStore, limit: usize) -> Result<SearchHistory> {
    Ok(SearchHistory::from_entries(store.load()?, limit))
}

/// Record a submitted term: load, move the term to the front, save.
///
/// A corrupt store is replaced rather than left to fail every later record.
/// Two processes recording at the same time may lose one update; there is
/// no locking around the read-modify-write.
pub fn record(store: &dyn HistoryStore, term: &str, limit: usize) -> Result<SearchHistory> {
    let mut history = match load(store, limit) {
        Ok(history) => history,
        Err(Error::History(e @ HistoryError::Corrupt { .. })) => {
            tracing::warn!("{}; starting a new history", e);
            SearchHistory::new(limit)
        }
        Err(e) => return Err(e),
    };
    history.push(term);
    store.save(&history.to_vec())?;
    tracing::debug!("Recorded '{}' in history ({} entries)", term, history.len());
    Ok(history)
}
