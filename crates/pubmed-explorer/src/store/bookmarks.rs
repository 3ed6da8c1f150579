//! Bookmark collection: snapshot copies of papers, at most one per PMID.

use chrono::Utc;

use super::JsonStore;
use crate::config::storage;
use crate::error::StoreResult;
use crate::models::{BookmarkEntry, Paper};

/// Persistent bookmark collection.
#[derive(Debug, Clone)]
pub struct BookmarkStore {
    store: JsonStore,
}

impl BookmarkStore {
    /// Open the bookmark collection in the given store.
    #[must_use]
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }

    /// All bookmarks, in insertion order.
    #[must_use]
    pub fn entries(&self) -> Vec<BookmarkEntry> {
        self.store.load(storage::BOOKMARKS_KEY)
    }

    /// Number of bookmarks.
    #[must_use]
    pub fn count(&self) -> usize {
        self.entries().len()
    }

    /// Check whether a paper is bookmarked.
    #[must_use]
    pub fn is_bookmarked(&self, pmid: &str) -> bool {
        self.entries().iter().any(|b| b.pmid == pmid)
    }

    /// Add a bookmark for the paper unless one already exists.
    ///
    /// An existing entry is left untouched (the snapshot is not refreshed).
    /// Returns the resulting bookmarked status, which is always `true`.
    ///
    /// # Errors
    ///
    /// Returns error when the collection cannot be persisted.
    pub fn upsert(&self, paper: &Paper) -> StoreResult<bool> {
        let mut entries = self.entries();
        if entries.iter().any(|b| b.pmid == paper.pmid) {
            return Ok(true);
        }

        entries.push(BookmarkEntry::snapshot(paper, Utc::now()));
        self.store.save(storage::BOOKMARKS_KEY, &entries)?;
        Ok(true)
    }

    /// Toggle the bookmark for a paper.
    ///
    /// Returns the resulting bookmarked status.
    ///
    /// # Errors
    ///
    /// Returns error when the collection cannot be persisted.
    pub fn toggle(&self, paper: &Paper) -> StoreResult<bool> {
        if self.is_bookmarked(&paper.pmid) {
            self.remove(&paper.pmid)?;
            Ok(false)
        } else {
            self.upsert(paper)
        }
    }

    /// Remove the bookmark with the given PMID, if present.
    ///
    /// Returns whether an entry was removed.
    ///
    /// # Errors
    ///
    /// Returns error when the collection cannot be persisted.
    pub fn remove(&self, pmid: &str) -> StoreResult<bool> {
        let mut entries = self.entries();
        let before = entries.len();
        entries.retain(|b| b.pmid != pmid);

        if entries.len() == before {
            return Ok(false);
        }

        self.store.save(storage::BOOKMARKS_KEY, &entries)?;
        Ok(true)
    }

    /// Remove every bookmark.
    ///
    /// # Errors
    ///
    /// Returns error when the backing file cannot be removed.
    pub fn clear(&self) -> StoreResult<()> {
        self.store.clear(storage::BOOKMARKS_KEY)
    }
}
