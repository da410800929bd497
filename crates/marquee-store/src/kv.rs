//! String-keyed JSON values persisted in a single file.
//!
//! The whole file is one JSON object. A missing file reads as empty. Writes
//! go to a sibling temp file first and are renamed into place.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::StoreError;

#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the value under `key`, or `None` if it was never set.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the file cannot be read, or
    /// [`StoreError::Json`] if it (or the stored value) does not parse.
    pub fn get_item<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let mut map = self.load()?;
        match map.remove(key) {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// # Errors
    ///
    /// Returns [`StoreError::Io`] or [`StoreError::Json`] if the file cannot
    /// be read back or rewritten.
    pub fn set_item<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let mut map = self.load()?;
        map.insert(key.to_owned(), serde_json::to_value(value)?);
        self.save(&map)
    }

    /// Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Same as [`JsonStore::set_item`].
    pub fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        let mut map = self.load()?;
        if map.remove(key).is_some() {
            self.save(&map)?;
        }
        Ok(())
    }

    fn load(&self) -> Result<Map<String, Value>, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(source) => return Err(self.io_error(source)),
        };
        if raw.trim().is_empty() {
            return Ok(Map::new());
        }
        Ok(serde_json::from_str(&raw)?)
    }

    fn save(&self, map: &Map<String, Value>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let body = serde_json::to_string_pretty(map)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, body).map_err(|e| self.io_error(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))?;
        tracing::debug!(path = %self.path.display(), keys = map.len(), "store saved");
        Ok(())
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> JsonStore {
        JsonStore::new(std::env::temp_dir().join(format!("marquee-kv-{}.json", uuid::Uuid::new_v4())))
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let store = temp_store();
        let value: Option<Vec<String>> = store.get_item("users").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn set_then_get_preserves_other_keys() {
        let store = temp_store();
        store.set_item("a", &vec![1, 2, 3]).unwrap();
        store.set_item("b", &"hello").unwrap();

        let a: Option<Vec<i32>> = store.get_item("a").unwrap();
        let b: Option<String> = store.get_item("b").unwrap();
        assert_eq!(a, Some(vec![1, 2, 3]));
        assert_eq!(b.as_deref(), Some("hello"));

        fs::remove_file(store.path()).ok();
    }

    #[test]
    fn remove_item_deletes_only_that_key() {
        let store = temp_store();
        store.set_item("a", &1).unwrap();
        store.set_item("b", &2).unwrap();
        store.remove_item("a").unwrap();
        store.remove_item("never-set").unwrap();

        assert!(store.get_item::<i32>("a").unwrap().is_none());
        assert_eq!(store.get_item::<i32>("b").unwrap(), Some(2));

        fs::remove_file(store.path()).ok();
    }

    #[test]
    fn corrupt_file_is_a_json_error() {
        let store = temp_store();
        fs::write(store.path(), "{not json").unwrap();
        let result = store.get_item::<i32>("a");
        assert!(matches!(result, Err(StoreError::Json(_))));
        fs::remove_file(store.path()).ok();
    }
}
