//! Cardmarket expansion extraction and bulk card catalog.
//!
//! The crate has two halves. The extraction side scans Cardmarket listing
//! pages for expansion entries and folds them into a persistent registry.
//! The catalog side loads a Scryfall-style bulk card file once per selected
//! source and answers per-set queries from the in-memory snapshot.

pub mod catalog;
pub mod config;
pub mod extractor;
pub mod fetch;
pub mod registry;
pub mod storage;
pub mod testing;

pub use catalog::{BulkCatalogService, Card, CatalogCard, CatalogError};
pub use config::{load_config, load_config_from_str, validate_config, Config, ConfigError};
pub use extractor::{extract_names, BlockExtractor, ExtractedExpansion};
pub use fetch::{HttpFetcher, ResourceFetcher};
pub use registry::{Expansion, ExpansionRegistry, RegistryChangedCallback};
pub use storage::{FsStore, KeyValueStore};
