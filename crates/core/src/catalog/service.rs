//! Single-flight bulk catalog loader and query surface.

use std::collections::BTreeSet;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::config::CatalogConfig;
use crate::fetch::{FetchError, ResourceFetcher};

use super::decode::JsonArrayDecoder;
use super::types::{Card, CatalogCard};
use super::CatalogError;

/// One fully loaded bulk dataset.
pub struct CatalogSnapshot {
    pub source: String,
    pub cards: Arc<Vec<CatalogCard>>,
}

/// Loads a bulk card file at most once per selected source and serves
/// queries from the in-memory snapshot.
///
/// `load` is single-flight: concurrent callers during a load all wait on
/// the same guard and every one after the first finds the snapshot already
/// installed. Queries never trigger a transfer by themselves except
/// [`available_set_keys`](Self::available_set_keys), which loads on demand.
pub struct BulkCatalogService {
    fetcher: Arc<dyn ResourceFetcher>,
    config: CatalogConfig,
    source: RwLock<String>,
    snapshot: RwLock<Option<CatalogSnapshot>>,
    load_guard: Mutex<()>,
}

impl BulkCatalogService {
    pub fn new(fetcher: Arc<dyn ResourceFetcher>, config: CatalogConfig) -> Self {
        let source = config.source.clone();
        Self {
            fetcher,
            config,
            source: RwLock::new(source),
            snapshot: RwLock::new(None),
            load_guard: Mutex::new(()),
        }
    }

    /// Switch the active dataset identifier.
    ///
    /// Always drops the current snapshot, even when the identifier is
    /// unchanged, so the next load re-reads the file.
    pub async fn select_source(&self, source: &str) {
        let mut current = self.source.write().await;
        *current = source.to_string();
        drop(current);

        let mut snapshot = self.snapshot.write().await;
        *snapshot = None;
        debug!(source = %source, "catalog source selected, snapshot dropped");
    }

    pub async fn selected_source(&self) -> String {
        self.source.read().await.clone()
    }

    pub async fn is_loaded(&self) -> bool {
        self.snapshot.read().await.is_some()
    }

    /// Ensure the selected dataset is in memory; returns the card count.
    pub async fn load(&self) -> Result<usize, CatalogError> {
        if let Some(snapshot) = self.snapshot.read().await.as_ref() {
            return Ok(snapshot.cards.len());
        }

        let _guard = self.load_guard.lock().await;

        loop {
            // A concurrent caller may have finished while we waited.
            if let Some(snapshot) = self.snapshot.read().await.as_ref() {
                return Ok(snapshot.cards.len());
            }

            let source = self.source.read().await.clone();
            let path = self.resolve_source(&source).await?;
            let cards = self.stream_cards(&path).await?;

            if cards.is_empty() {
                return Err(CatalogError::Decode(format!(
                    "Bulk file '{}' contained no records",
                    path
                )));
            }

            // The selection may have moved while we streamed; installing
            // this result would pin the old dataset, so load the new one
            // instead.
            if *self.source.read().await != source {
                debug!(source = %source, "selection changed mid-load, result discarded");
                continue;
            }

            let count = cards.len();
            info!(source = %source, path = %path, cards = count, "bulk catalog loaded");

            let mut snapshot = self.snapshot.write().await;
            *snapshot = Some(CatalogSnapshot {
                source,
                cards: Arc::new(cards),
            });
            return Ok(count);
        }
    }

    /// Cards of one set, matched case-insensitively, ordered by collector
    /// number as an opaque string.
    ///
    /// Serves only from an existing snapshot; an unloaded catalog yields an
    /// empty list rather than a transfer.
    pub async fn cards_for_set(&self, set_key: &str) -> Vec<Card> {
        let snapshot = self.snapshot.read().await;
        let Some(snapshot) = snapshot.as_ref() else {
            return Vec::new();
        };

        let mut matched: Vec<&CatalogCard> = snapshot
            .cards
            .iter()
            .filter(|card| {
                card.set
                    .as_deref()
                    .is_some_and(|s| s.eq_ignore_ascii_case(set_key))
            })
            .collect();
        matched.sort_by(|a, b| {
            a.collector_number
                .as_deref()
                .unwrap_or("")
                .cmp(b.collector_number.as_deref().unwrap_or(""))
        });
        matched.into_iter().map(Card::from).collect()
    }

    /// Distinct set keys present in the dataset, loading it first if needed.
    ///
    /// Keys keep their original casing and are sorted ascending.
    pub async fn available_set_keys(&self) -> Result<Vec<String>, CatalogError> {
        self.load().await?;

        let snapshot = self.snapshot.read().await;
        let Some(snapshot) = snapshot.as_ref() else {
            return Ok(Vec::new());
        };

        let keys: BTreeSet<String> = snapshot
            .cards
            .iter()
            .filter_map(|card| card.set.clone())
            .filter(|key| !key.is_empty())
            .collect();
        Ok(keys.into_iter().collect())
    }

    /// Probe the candidate filenames for a dataset identifier, in order,
    /// returning the first that responds.
    ///
    /// A candidate that fails to respond, for whatever reason, falls
    /// through to the next one; only an exhausted list is an error.
    async fn resolve_source(&self, source: &str) -> Result<String, CatalogError> {
        for path in self.candidate_files(source) {
            match self.fetcher.probe(&path).await {
                Ok(info) => {
                    if let Some(length) = info.content_length {
                        if length > self.config.max_payload_bytes {
                            return Err(CatalogError::ResourceExhausted(format!(
                                "{} is {} bytes, cap is {}",
                                path, length, self.config.max_payload_bytes
                            )));
                        }
                    }
                    return Ok(path);
                }
                Err(FetchError::NotFound(_)) => {
                    debug!(path = %path, "candidate bulk file not present");
                }
                Err(e) => {
                    warn!(path = %path, error = %e, "candidate probe failed");
                }
            }
        }
        Err(CatalogError::SourceNotFound(source.to_string()))
    }

    /// Bare `{source}.json` first, then each configured dated variant.
    fn candidate_files(&self, source: &str) -> Vec<String> {
        let base = self.config.base_path.trim_end_matches('/');
        let mut candidates = vec![format!("{}/{}.json", base, source)];
        for suffix in &self.config.dated_suffixes {
            candidates.push(format!("{}/{}-{}.json", base, source, suffix));
        }
        candidates
    }

    /// Transfer and decode the bulk file, enforcing the payload cap on the
    /// actual byte count as well.
    async fn stream_cards(&self, path: &str) -> Result<Vec<CatalogCard>, CatalogError> {
        let mut stream = self.fetcher.fetch(path).await?;
        let mut decoder = JsonArrayDecoder::new();
        let mut cards: Vec<CatalogCard> = Vec::new();
        let mut received: u64 = 0;

        while let Some(chunk) = stream.next_chunk().await? {
            received += chunk.len() as u64;
            if received > self.config.max_payload_bytes {
                warn!(path = %path, received, "bulk transfer aborted, payload cap exceeded");
                return Err(CatalogError::ResourceExhausted(format!(
                    "{} exceeded {} bytes mid-transfer",
                    path, self.config.max_payload_bytes
                )));
            }
            cards.extend(
                decoder
                    .push::<CatalogCard>(&chunk)
                    .map_err(|e| CatalogError::Decode(e.to_string()))?,
            );
        }
        decoder
            .finish()
            .map_err(|e| CatalogError::Decode(e.to_string()))?;

        Ok(cards)
    }
}
