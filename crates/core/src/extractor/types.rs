//! Types produced by the extractor.

/// One expansion entry pulled out of a listing page.
///
/// Only `name` is guaranteed; every other field is best-effort and absent
/// when its pattern did not match. Lifecycle bookkeeping (first/last seen,
/// observation count) is added by the registry, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedExpansion {
    /// Expansion display name (`data-local-name`).
    pub name: String,
    /// Origin URL of the entry (`data-url`).
    pub source_path: Option<String>,
    /// Short code derived from the last path segment of `source_path`.
    pub set_code: Option<String>,
    /// Number of cards in the expansion, if the page listed one.
    pub card_count: Option<u32>,
    /// Release date exactly as printed on the page (e.g. "5. Dezember 2025").
    pub release_date: Option<String>,
    /// Expansion logo/image URL (`data-echo`).
    pub image_url: Option<String>,
}

impl ExtractedExpansion {
    /// Create an entry carrying only a name.
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            source_path: None,
            set_code: None,
            card_count: None,
            release_date: None,
            image_url: None,
        }
    }
}
