//! Search history: deduplicated, most recent first, bounded at 20 entries.

use chrono::Utc;

use super::JsonStore;
use crate::config::storage;
use crate::error::{StoreError, StoreResult};
use crate::models::HistoryEntry;

/// Persistent search history.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    store: JsonStore,
}

impl HistoryStore {
    /// Open the history collection in the given store.
    #[must_use]
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }

    /// All entries, most recent first.
    #[must_use]
    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.store.load(storage::HISTORY_KEY)
    }

    /// Record a search.
    ///
    /// Any existing entry with the same `query` (case-sensitive exact match)
    /// is removed first, then the new entry is inserted at the front and the
    /// collection is truncated to the most recent
    /// [`storage::HISTORY_LIMIT`] entries.
    ///
    /// # Errors
    ///
    /// Returns error when the collection cannot be persisted.
    pub fn add(&self, query: &str, ai_query: Option<&str>) -> StoreResult<()> {
        let mut entries = self.entries();
        entries.retain(|h| h.query != query);

        entries.insert(
            0,
            HistoryEntry {
                query: query.to_string(),
                ai_query: ai_query.map(String::from),
                date: Utc::now(),
            },
        );
        entries.truncate(storage::HISTORY_LIMIT);

        self.store.save(storage::HISTORY_KEY, &entries)
    }

    /// Remove the entry at `index` in the current ordered view.
    ///
    /// Returns the removed entry so callers can offer undo or re-run it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::IndexOutOfRange`] when `index` is past the end,
    /// or a persistence error when the collection cannot be written.
    pub fn remove(&self, index: usize) -> StoreResult<HistoryEntry> {
        let mut entries = self.entries();
        if index >= entries.len() {
            return Err(StoreError::IndexOutOfRange { index, len: entries.len() });
        }

        let removed = entries.remove(index);
        self.store.save(storage::HISTORY_KEY, &entries)?;
        Ok(removed)
    }

    /// Remove every entry.
    ///
    /// # Errors
    ///
    /// Returns error when the backing file cannot be removed.
    pub fn clear(&self) -> StoreResult<()> {
        self.store.clear(storage::HISTORY_KEY)
    }
}
