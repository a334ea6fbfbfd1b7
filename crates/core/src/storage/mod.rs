//! Persistent string-keyed storage collaborator.
//!
//! The registry persists itself as an opaque JSON blob through this seam;
//! the hosting application decides what actually backs it (browser storage,
//! a file, a database row). `FsStore` is the native-host implementation.

mod fs;

pub use fs::FsStore;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(String),
}

/// Simple string-keyed get/set/remove capability.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, `None` when absent.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the value under `key`; deleting an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}
