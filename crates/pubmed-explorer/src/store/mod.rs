//! Local persistence for named collections.
//!
//! Each collection is one JSON array file under the data directory, keyed by a
//! fixed collection name. Absent or malformed files read as an empty
//! collection, never an error; every mutation is written back immediately
//! (last write wins, single consumer).

mod bookmarks;
mod history;

pub use bookmarks::BookmarkStore;
pub use history::HistoryStore;

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::StoreResult;

/// File-backed store for JSON array collections.
#[derive(Debug, Clone)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    /// Create a store rooted at the given directory.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the collection files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of a collection's backing file.
    fn collection_path(&self, collection: &str) -> PathBuf {
        self.dir.join(format!("{collection}.json"))
    }

    /// Load a collection.
    ///
    /// Returns an empty Vec when the file does not exist or cannot be parsed.
    #[must_use]
    pub fn load<T: DeserializeOwned>(&self, collection: &str) -> Vec<T> {
        let path = self.collection_path(collection);
        if !path.exists() {
            debug!(collection, "collection file not found");
            return Vec::new();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<Vec<T>>(&content) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!(collection, error = %e, "failed to parse collection, treating as empty");
                    Vec::new()
                }
            },
            Err(e) => {
                warn!(collection, error = %e, "failed to read collection, treating as empty");
                Vec::new()
            }
        }
    }

    /// Persist a collection, replacing its previous contents.
    ///
    /// # Errors
    ///
    /// Returns error when the data directory cannot be created or written.
    pub fn save<T: Serialize>(&self, collection: &str, entries: &[T]) -> StoreResult<()> {
        std::fs::create_dir_all(&self.dir)?;
        let content = serde_json::to_string_pretty(entries)?;
        std::fs::write(self.collection_path(collection), content)?;
        debug!(collection, count = entries.len(), "saved collection");
        Ok(())
    }

    /// Delete a collection's backing file.
    ///
    /// # Errors
    ///
    /// Returns error when an existing file cannot be removed.
    pub fn clear(&self, collection: &str) -> StoreResult<()> {
        let path = self.collection_path(collection);
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}
