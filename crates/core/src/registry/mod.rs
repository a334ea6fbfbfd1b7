//! Expansion registry - the de-duplicated collection of known expansions.
//!
//! Keyed by name (the only identity), merged on insert, persisted as a
//! single JSON blob through the [`crate::storage::KeyValueStore`] seam.
//! Persistence is best-effort: a broken store never fails a mutation, the
//! in-memory state stays authoritative for the session.

mod service;
mod types;

pub use service::{ExpansionRegistry, RegistryChangedCallback};
pub use types::Expansion;
