//! File-backed persistence for the watched list.
//!
//! The whole list lives in one named JSON slot; every save rewrites it.
//! A missing or unreadable slot loads as an empty list; stale or
//! corrupted state must never keep the application from starting.

use std::path::{Path, PathBuf};

use crate::error::PopcornError;
use crate::models::WatchedEntry;

/// Store for the watched list, bound to one file slot.
///
/// The path is injected at construction so tests can point it anywhere.
#[derive(Debug)]
pub struct WatchedStore {
    path: PathBuf,
}

impl WatchedStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted list, returning an empty list if the slot is
    /// absent or does not deserialize.
    pub fn load(&self) -> Vec<WatchedEntry> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(_) => return Vec::new(),
        };
        match serde_json::from_str(&content) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Discarding malformed watched list"
                );
                Vec::new()
            }
        }
    }

    /// Overwrite the slot with the full list.
    ///
    /// Writes to a sibling temp file and renames it into place, so a crash
    /// mid-write leaves the previous snapshot intact.
    pub fn save(&self, watched: &[WatchedEntry]) -> Result<(), PopcornError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(watched)?;
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MovieDetail;

    fn entry(imdb_id: &str) -> WatchedEntry {
        let detail = MovieDetail {
            imdb_id: imdb_id.into(),
            title: "Inception".into(),
            year: "2010".into(),
            poster_url: String::new(),
            runtime: "148 min".into(),
            imdb_rating: "8.8".into(),
            plot: String::new(),
            released: String::new(),
            actors: String::new(),
            director: String::new(),
            genre: String::new(),
            awards: String::new(),
        };
        WatchedEntry::from_detail(&detail, 8, 1)
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = WatchedStore::new(dir.path().join("watched.json"));
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_malformed_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("watched.json");
        std::fs::write(&path, "{ definitely not a list").unwrap();

        let store = WatchedStore::new(&path);
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = WatchedStore::new(dir.path().join("watched.json"));

        let watched = vec![entry("tt1375666"), entry("tt0137523")];
        store.save(&watched).unwrap();

        assert_eq!(store.load(), watched);
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let store = WatchedStore::new(dir.path().join("nested/data/watched.json"));
        store.save(&[entry("tt1375666")]).unwrap();
        assert_eq!(store.load().len(), 1);
    }

    #[test]
    fn test_save_overwrites_whole_slot() {
        let dir = tempfile::tempdir().unwrap();
        let store = WatchedStore::new(dir.path().join("watched.json"));

        store.save(&[entry("tt1375666"), entry("tt0137523")]).unwrap();
        store.save(&[entry("tt0137523")]).unwrap();

        let loaded = store.load();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].imdb_id, "tt0137523");
    }
}
