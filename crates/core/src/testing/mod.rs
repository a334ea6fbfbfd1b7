//! Shared test doubles and fixture payloads.
//!
//! Compiled into the library so integration tests and downstream crates can
//! reuse the same mocks.

mod fixtures;
mod memory_store;
mod mock_fetcher;

pub use fixtures::{catalog_json, listing_html};
pub use memory_store::MemoryStore;
pub use mock_fetcher::MockFetcher;
