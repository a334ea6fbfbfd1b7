//! Network fetch collaborator - resolves relative resource paths to bodies.

mod http;

pub use http::HttpFetcher;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("HTTP error: {0}")]
    Http(String),
}

/// What a lightweight headers probe learned about a resource.
#[derive(Debug, Clone)]
pub struct ResourceInfo {
    pub path: String,
    /// Size hint when the server provided one.
    pub content_length: Option<u64>,
}

/// Capability to probe and retrieve a named resource by relative path.
#[async_trait]
pub trait ResourceFetcher: Send + Sync {
    /// Existence/headers check without transferring the body.
    async fn probe(&self, path: &str) -> Result<ResourceInfo, FetchError>;

    /// Open the resource body as a chunked stream.
    async fn fetch(&self, path: &str) -> Result<Box<dyn ResourceStream>, FetchError>;
}

/// A body being streamed chunk by chunk.
#[async_trait]
pub trait ResourceStream: Send {
    /// Next chunk of the body, `None` once exhausted.
    async fn next_chunk(&mut self) -> Result<Option<Vec<u8>>, FetchError>;
}
