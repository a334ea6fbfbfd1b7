use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex as StdMutex};

use async_trait::async_trait;

use crate::fetch::{FetchError, ResourceFetcher, ResourceInfo, ResourceStream};

/// In-memory [`ResourceFetcher`] serving preloaded bodies.
///
/// Unregistered paths answer [`FetchError::NotFound`]. Bodies are streamed
/// in `chunk_size` pieces so chunk-boundary handling gets exercised.
pub struct MockFetcher {
    resources: HashMap<String, Vec<u8>>,
    chunk_size: usize,
    report_length: bool,
    probe_timeouts: HashSet<String>,
    fetch_count: Arc<AtomicUsize>,
    probed_paths: Arc<StdMutex<Vec<String>>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self {
            resources: HashMap::new(),
            chunk_size: 4096,
            report_length: true,
            probe_timeouts: HashSet::new(),
            fetch_count: Arc::new(AtomicUsize::new(0)),
            probed_paths: Arc::new(StdMutex::new(Vec::new())),
        }
    }

    pub fn with_resource(mut self, path: &str, body: &str) -> Self {
        self.resources
            .insert(path.to_string(), body.as_bytes().to_vec());
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Answer probes without a `content_length`, like a server that only
    /// does chunked transfer.
    pub fn with_unknown_length(mut self) -> Self {
        self.report_length = false;
        self
    }

    /// Make probes of `path` time out instead of answering.
    pub fn with_probe_timeout(mut self, path: &str) -> Self {
        self.probe_timeouts.insert(path.to_string());
        self
    }

    /// Counter of `fetch` calls, usable after the fetcher is boxed away.
    pub fn fetch_count_handle(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.fetch_count)
    }

    /// Log of probed paths in call order.
    pub fn probed_paths_handle(&self) -> Arc<StdMutex<Vec<String>>> {
        Arc::clone(&self.probed_paths)
    }
}

impl Default for MockFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResourceFetcher for MockFetcher {
    async fn probe(&self, path: &str) -> Result<ResourceInfo, FetchError> {
        self.probed_paths
            .lock()
            .unwrap()
            .push(path.to_string());
        if self.probe_timeouts.contains(path) {
            return Err(FetchError::Timeout);
        }
        match self.resources.get(path) {
            Some(body) => Ok(ResourceInfo {
                path: path.to_string(),
                content_length: self.report_length.then_some(body.len() as u64),
            }),
            None => Err(FetchError::NotFound(path.to_string())),
        }
    }

    async fn fetch(&self, path: &str) -> Result<Box<dyn ResourceStream>, FetchError> {
        let body = self
            .resources
            .get(path)
            .ok_or_else(|| FetchError::NotFound(path.to_string()))?;
        self.fetch_count.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockStream {
            chunks: body
                .chunks(self.chunk_size)
                .map(|chunk| chunk.to_vec())
                .collect(),
            next: 0,
        }))
    }
}

struct MockStream {
    chunks: Vec<Vec<u8>>,
    next: usize,
}

#[async_trait]
impl ResourceStream for MockStream {
    async fn next_chunk(&mut self) -> Result<Option<Vec<u8>>, FetchError> {
        // Yield so concurrent load() callers actually interleave.
        tokio::task::yield_now().await;
        let chunk = self.chunks.get(self.next).cloned();
        self.next += 1;
        Ok(chunk)
    }
}
