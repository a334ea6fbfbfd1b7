//! Bulk card catalog - loading and querying the Scryfall-style dataset.
//!
//! The bulk file is a single JSON array that can run to hundreds of MB, so
//! it is stream-decoded chunk by chunk and loaded at most once per selected
//! source, shared by all readers.

mod decode;
mod service;
mod types;

pub use decode::JsonArrayDecoder;
pub use service::{BulkCatalogService, CatalogSnapshot};
pub use types::{Card, CardImageUris, CardPrices, CatalogCard};

use thiserror::Error;

use crate::fetch::FetchError;

/// Errors for catalog loading, kept distinguishable so the UI can print a
/// specific remedy for each.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No candidate bulk data file responded.
    #[error("No bulk data file found for '{0}'")]
    SourceNotFound(String),

    /// A file was found but its payload is structurally invalid or empty.
    #[error("Failed to decode bulk data: {0}")]
    Decode(String),

    /// The payload exceeds the configured memory cap.
    #[error("Bulk data too large: {0}; use a smaller dataset variant")]
    ResourceExhausted(String),

    /// The transfer itself failed after a candidate had been resolved.
    #[error("Bulk data transfer failed: {0}")]
    Fetch(#[from] FetchError),
}
