//! Key-value store port - raw string storage under fixed keys.
//!
//! The recipe catalog is kept as one JSON document under a single key,
//! so the store only needs whole-value reads and writes.

use async_trait::async_trait;

/// Errors that can occur during key-value store operations
#[derive(Debug, thiserror::Error)]
pub enum KeyValueStoreError {
    #[error("Invalid key '{0}'")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Port for reading and writing string values by key.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// Returns `None` if nothing was ever stored.
    async fn get(&self, key: &str) -> Result<Option<String>, KeyValueStoreError>;

    /// Replace the value stored under `key`.
    async fn set(&self, key: &str, value: &str) -> Result<(), KeyValueStoreError>;
}
