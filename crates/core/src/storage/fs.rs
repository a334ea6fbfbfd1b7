//! Filesystem-backed key-value store, one file per key.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;

use super::{KeyValueStore, StorageError};

pub struct FsStore {
    dir: PathBuf,
}

impl FsStore {
    /// Create a store rooted at `dir`. The directory is created on first
    /// write, not here.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // Keys are storage identifiers, not paths; anything unsafe for a
        // filename gets flattened.
        let sanitized: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(sanitized)
    }
}

#[async_trait]
impl KeyValueStore for FsStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io(e.to_string())),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| StorageError::Io(e.to_string()))?;
        tokio::fs::write(self.path_for(key), value)
            .await
            .map_err(|e| StorageError::Io(e.to_string()))
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_missing_key() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FsStore::new(tmp.path());
        assert_eq!(store.get("absent").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_get_remove_roundtrip() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FsStore::new(tmp.path());

        store.set("expansions_v2", "[1,2,3]").await.unwrap();
        assert_eq!(
            store.get("expansions_v2").await.unwrap(),
            Some("[1,2,3]".to_string())
        );

        store.remove("expansions_v2").await.unwrap();
        assert_eq!(store.get("expansions_v2").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_remove_missing_key_is_ok() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FsStore::new(tmp.path());
        assert!(store.remove("never-existed").await.is_ok());
    }

    #[tokio::test]
    async fn test_keys_are_sanitized_to_filenames() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FsStore::new(tmp.path());

        store.set("weird/key with spaces", "v").await.unwrap();
        assert_eq!(
            store.get("weird/key with spaces").await.unwrap(),
            Some("v".to_string())
        );
        // Nothing escaped the store directory.
        assert!(tmp.path().join("weird_key_with_spaces").exists());
    }

    #[tokio::test]
    async fn test_set_creates_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FsStore::new(tmp.path().join("nested/store"));
        store.set("k", "v").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), Some("v".to_string()));
    }
}
