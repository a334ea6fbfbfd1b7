//! The registry service itself.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::config::RegistryConfig;
use crate::extractor::ExtractedExpansion;
use crate::storage::KeyValueStore;

use super::types::Expansion;

/// Invoked after every persisting mutation that changed at least one record.
pub type RegistryChangedCallback = Arc<dyn Fn() + Send + Sync>;

struct Inner {
    expansions: HashMap<String, Expansion>,
    initialized: bool,
}

/// Keyed, merge-on-insert store of [`Expansion`] records.
///
/// All mutation happens under one lock and completes its persistence write
/// before the lock is released, so concurrent callers never observe a
/// half-applied mutation.
pub struct ExpansionRegistry {
    store: Arc<dyn KeyValueStore>,
    config: RegistryConfig,
    inner: Mutex<Inner>,
    on_change: Option<RegistryChangedCallback>,
}

impl ExpansionRegistry {
    pub fn new(store: Arc<dyn KeyValueStore>, config: RegistryConfig) -> Self {
        Self {
            store,
            config,
            inner: Mutex::new(Inner {
                expansions: HashMap::new(),
                initialized: false,
            }),
            on_change: None,
        }
    }

    /// Register a callback fired after every effective mutation.
    pub fn with_change_callback(mut self, callback: RegistryChangedCallback) -> Self {
        self.on_change = Some(callback);
        self
    }

    /// Observe a batch of expansion names.
    ///
    /// Known names get their observation count bumped, unknown names become
    /// fresh records. Returns the number of newly created records. Persists
    /// and notifies only for non-empty input.
    pub async fn observe_names<S: AsRef<str>>(&self, names: &[S]) -> usize {
        let mut inner = self.inner.lock().await;
        self.ensure_initialized(&mut inner).await;

        let now = Utc::now();
        let mut added = 0;

        for name in names {
            let name = name.as_ref();
            if name.is_empty() {
                continue;
            }
            match inner.expansions.get_mut(name) {
                Some(existing) => {
                    existing.last_seen_at = now;
                    existing.times_seen += 1;
                }
                None => {
                    inner
                        .expansions
                        .insert(name.to_string(), Expansion::new(name, now));
                    added += 1;
                }
            }
        }

        if !names.is_empty() {
            self.persist(&inner).await;
            drop(inner);
            self.notify();
        }

        added
    }

    /// Observe a batch of extracted entries, overlaying their fields.
    ///
    /// Same merge policy as [`observe_names`](Self::observe_names), plus any
    /// present (non-empty) incoming field replaces the stored one; absent
    /// incoming fields leave existing values untouched.
    pub async fn observe_records(&self, records: &[ExtractedExpansion]) -> usize {
        let mut inner = self.inner.lock().await;
        self.ensure_initialized(&mut inner).await;

        let now = Utc::now();
        let mut added = 0;

        for record in records {
            if record.name.is_empty() {
                continue;
            }
            match inner.expansions.get_mut(&record.name) {
                Some(existing) => existing.merge_observation(record, now),
                None => {
                    inner
                        .expansions
                        .insert(record.name.clone(), Expansion::from_extracted(record, now));
                    added += 1;
                }
            }
        }

        if !records.is_empty() {
            self.persist(&inner).await;
            drop(inner);
            self.notify();
        }

        added
    }

    /// All records, ascending by name.
    pub async fn all(&self) -> Vec<Expansion> {
        let mut inner = self.inner.lock().await;
        self.ensure_initialized(&mut inner).await;
        sorted_records(&inner.expansions)
    }

    /// All names, ascending.
    pub async fn names(&self) -> Vec<String> {
        let mut inner = self.inner.lock().await;
        self.ensure_initialized(&mut inner).await;
        let mut names: Vec<String> = inner.expansions.keys().cloned().collect();
        names.sort();
        names
    }

    pub async fn count(&self) -> usize {
        let mut inner = self.inner.lock().await;
        self.ensure_initialized(&mut inner).await;
        inner.expansions.len()
    }

    /// Remove one record; returns whether anything was removed.
    pub async fn remove(&self, name: &str) -> bool {
        let mut inner = self.inner.lock().await;
        self.ensure_initialized(&mut inner).await;

        if inner.expansions.remove(name).is_none() {
            return false;
        }
        self.persist(&inner).await;
        drop(inner);
        self.notify();
        true
    }

    /// Remove every record; returns whether anything was removed.
    pub async fn clear(&self) -> bool {
        let mut inner = self.inner.lock().await;
        self.ensure_initialized(&mut inner).await;

        if inner.expansions.is_empty() {
            return false;
        }
        inner.expansions.clear();
        self.persist(&inner).await;
        drop(inner);
        self.notify();
        true
    }

    /// Serialize the full registry (ordered by name) as readable JSON.
    pub async fn export_json(&self) -> String {
        let mut inner = self.inner.lock().await;
        self.ensure_initialized(&mut inner).await;
        serde_json::to_string_pretty(&sorted_records(&inner.expansions)).unwrap_or_default()
    }

    /// Load persisted state on first use.
    ///
    /// The versioned key is checked first; only when it is absent does the
    /// one-time legacy migration run. Read or parse failures are swallowed
    /// and the registry starts empty - writes are where we get loud.
    async fn ensure_initialized(&self, inner: &mut Inner) {
        if inner.initialized {
            return;
        }
        inner.initialized = true;

        match self.store.get(&self.config.storage_key).await {
            Ok(Some(json)) => match serde_json::from_str::<Vec<Expansion>>(&json) {
                Ok(records) => {
                    for record in records {
                        inner.expansions.insert(record.name.clone(), record);
                    }
                    debug!(records = inner.expansions.len(), "registry loaded");
                }
                Err(e) => {
                    warn!(error = %e, "persisted registry is unreadable, starting empty");
                }
            },
            Ok(None) => self.migrate_legacy(inner).await,
            Err(e) => {
                warn!(error = %e, "failed to read persisted registry, starting empty");
            }
        }
    }

    /// One-time migration of the legacy bare-name-list format.
    async fn migrate_legacy(&self, inner: &mut Inner) {
        let legacy_json = match self.store.get(&self.config.legacy_storage_key).await {
            Ok(Some(json)) => json,
            Ok(None) => return,
            Err(e) => {
                warn!(error = %e, "failed to read legacy registry blob");
                return;
            }
        };

        let names: Vec<String> = match serde_json::from_str(&legacy_json) {
            Ok(names) => names,
            Err(e) => {
                warn!(error = %e, "legacy registry blob is unreadable, starting empty");
                return;
            }
        };

        let now = Utc::now();
        for name in names {
            if name.is_empty() {
                continue;
            }
            inner
                .expansions
                .insert(name.clone(), Expansion::new(&name, now));
        }
        debug!(records = inner.expansions.len(), "migrated legacy registry");

        self.persist(inner).await;
        if let Err(e) = self.store.remove(&self.config.legacy_storage_key).await {
            warn!(error = %e, "failed to delete legacy registry blob");
        }
    }

    /// Write the full registry back to the store, best-effort.
    async fn persist(&self, inner: &Inner) {
        let json = serde_json::to_string(&sorted_records(&inner.expansions)).unwrap_or_default();
        if let Err(e) = self.store.set(&self.config.storage_key, &json).await {
            warn!(error = %e, "failed to persist registry, in-memory state kept");
        }
    }

    fn notify(&self) {
        if let Some(callback) = &self.on_change {
            callback();
        }
    }
}

fn sorted_records(expansions: &HashMap<String, Expansion>) -> Vec<Expansion> {
    let mut records: Vec<Expansion> = expansions.values().cloned().collect();
    records.sort_by(|a, b| a.name.cmp(&b.name));
    records
}
