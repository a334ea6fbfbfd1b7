//! Expansion extraction from Cardmarket listing pages.
//!
//! The listing markup is loosely structured but known, so extraction is
//! pattern matching over text plus an explicit nesting-depth scan for entry
//! boundaries - deliberately not a DOM parser.

mod blocks;
pub mod fields;
mod types;

pub use blocks::{extract_names, BlockExtractor};
pub use types::ExtractedExpansion;
