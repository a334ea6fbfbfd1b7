use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::storage::{KeyValueStore, StorageError};

/// In-memory [`KeyValueStore`] with a write-failure switch.
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
    fail_writes: AtomicBool,
    write_count: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            fail_writes: AtomicBool::new(false),
            write_count: AtomicUsize::new(0),
        }
    }

    /// Make every subsequent `set`/`remove` fail.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Successful writes so far.
    pub fn write_count(&self) -> usize {
        self.write_count.load(Ordering::SeqCst)
    }

    /// Place a value directly, bypassing the failure switch and the counter.
    pub async fn seed(&self, key: &str, value: &str) {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
    }

    /// Peek at a stored value.
    pub async fn value(&self, key: &str) -> Option<String> {
        self.entries.read().await.get(key).cloned()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Io("simulated write failure".to_string()));
        }
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        self.write_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Io("simulated write failure".to_string()));
        }
        self.entries.write().await.remove(key);
        self.write_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
