//! File-based Key-Value Store Adapter
//!
//! Stores each key as one JSON file in a data directory. `recipes:v1`
//! lives at `<data_dir>/recipes-v1.json`.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::ports::{KeyValueStore, KeyValueStoreError};

/// File-based key-value store
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    base_path: PathBuf,
}

impl FileKeyValueStore {
    /// Create a store rooted at `base_path`. The directory is created on
    /// first write.
    ///
    /// # Example
    /// ```ignore
    /// let store = FileKeyValueStore::new("./data");
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// File that holds `key`.
    ///
    /// Keys may contain letters, digits, `-`, `_`, `.` and `:`; `:` maps
    /// to `-` so keys stay valid file names everywhere.
    pub fn file_path(&self, key: &str) -> Result<PathBuf, KeyValueStoreError> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':'));
        if !valid {
            return Err(KeyValueStoreError::InvalidKey(key.to_string()));
        }
        Ok(self
            .base_path
            .join(format!("{}.json", key.replace(':', "-"))))
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, KeyValueStoreError> {
        let path = self.file_path(key)?;
        match fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(KeyValueStoreError::IoError(e.to_string())),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), KeyValueStoreError> {
        let path = self.file_path(key)?;
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| KeyValueStoreError::IoError(e.to_string()))?;

        // Write then rename so a crash never leaves a truncated catalog.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)
            .await
            .map_err(|e| KeyValueStoreError::IoError(e.to_string()))?;
        fs::rename(&tmp, &path)
            .await
            .map_err(|e| KeyValueStoreError::IoError(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn file_path_replaces_colon() {
        let store = FileKeyValueStore::new("/data");
        assert_eq!(
            store.file_path("recipes:v1").unwrap(),
            PathBuf::from("/data/recipes-v1.json")
        );
    }

    #[test]
    fn file_path_rejects_traversal_and_empty_keys() {
        let store = FileKeyValueStore::new("/data");
        assert!(store.file_path("").is_err());
        assert!(store.file_path("../secrets").is_err());
        assert!(store.file_path("a/b").is_err());
        assert!(store.file_path(".hidden").is_err());
    }

    #[tokio::test]
    async fn get_missing_key_returns_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp_dir.path());

        assert_eq!(store.get("recipes:v1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_then_get_round_trips() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp_dir.path().join("nested"));

        store.set("recipes:v1", "[]").await.unwrap();

        assert_eq!(store.get("recipes:v1").await.unwrap().as_deref(), Some("[]"));
        assert!(temp_dir.path().join("nested/recipes-v1.json").exists());
        assert!(!temp_dir.path().join("nested/recipes-v1.json.tmp").exists());
    }

    #[tokio::test]
    async fn set_overwrites_previous_value() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp_dir.path());

        store.set("k", "one").await.unwrap();
        store.set("k", "two").await.unwrap();

        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("two"));
    }
}
