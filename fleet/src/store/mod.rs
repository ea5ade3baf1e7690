//! Store - file-backed key/value storage.
//!
//! Each key is a JSON document at `<root>/storage/<key>.json`, replaced
//! atomically on every write. Two keys are used by the application:
//! [`RECENT_SEARCHES_KEY`] and [`MAINTENANCE_HISTORY_KEY`].

mod atomic;
mod history;
mod recent;

use std::fs;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::{Config, Error, Result};

pub use recent::push_recent;

/// Recently committed search strings, most recent first.
pub const RECENT_SEARCHES_KEY: &str = "asset-search-recent";

/// Completed maintenance summaries, most recent first.
pub const MAINTENANCE_HISTORY_KEY: &str = "__maintenance_history__";

/// A PlantView store for reading and writing storage documents.
pub struct Store {
    config: Config,
}

impl Store {
    /// Open a store, creating the storage directory if needed.
    pub fn open(config: Config) -> Result<Self> {
        fs::create_dir_all(config.storage_dir())?;
        Ok(Self { config })
    }

    /// Get config reference.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Read a document. A missing key reads as `None`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let path = self.config.storage_path(key);
        let contents = match fs::read(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        serde_json::from_slice(&contents)
            .map(Some)
            .map_err(|e| Error::Storage {
                path,
                message: format!("corrupt document for key '{}': {}", key, e),
            })
    }

    /// Replace a document.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let path = self.config.storage_path(key);
        let contents = serde_json::to_vec(value)?;
        atomic::write_file(&path, &contents)?;
        log::debug!("wrote {} bytes to storage key {}", contents.len(), key);
        Ok(())
    }

    /// Delete a document. Returns whether it existed.
    pub fn remove(&self, key: &str) -> Result<bool> {
        let path = self.config.storage_path(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store(tmp: &TempDir) -> Store {
        Store::open(Config::with_root(tmp.path())).unwrap()
    }

    #[test]
    fn test_open_creates_storage_dir() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp);
        assert!(store.config().storage_dir().is_dir());
    }

    #[test]
    fn test_get_missing_key() {
        let tmp = TempDir::new().unwrap();
        let value: Option<Vec<String>> = store(&tmp).get("nothing-here").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_set_get_remove() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp);

        store.set("layout", &vec!["grid", "compact"]).unwrap();
        let value: Option<Vec<String>> = store.get("layout").unwrap();
        assert_eq!(value, Some(vec!["grid".to_string(), "compact".to_string()]));

        assert!(store.remove("layout").unwrap());
        assert!(!store.remove("layout").unwrap());
        assert!(store.get::<Vec<String>>("layout").unwrap().is_none());
    }

    #[test]
    fn test_corrupt_document_is_storage_error() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp);
        fs::write(store.config().storage_path(RECENT_SEARCHES_KEY), "{not json").unwrap();

        let err = store.get::<Vec<String>>(RECENT_SEARCHES_KEY).unwrap_err();
        assert!(matches!(err, Error::Storage { .. }));
        assert!(err.to_string().contains(RECENT_SEARCHES_KEY));
    }
}
