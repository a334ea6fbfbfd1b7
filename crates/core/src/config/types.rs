use serde::{Deserialize, Serialize};

/// Root configuration
///
/// Every section has defaults, so an empty config file is valid.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub extractor: ExtractorConfig,
    #[serde(default)]
    pub registry: RegistryConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
}

/// Block extractor configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExtractorConfig {
    /// Fallback slice length for entries whose markup never closes
    /// (default: 2000)
    #[serde(default = "default_max_entry_span_bytes")]
    pub max_entry_span_bytes: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            max_entry_span_bytes: default_max_entry_span_bytes(),
        }
    }
}

fn default_max_entry_span_bytes() -> usize {
    2000
}

/// Expansion registry persistence configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RegistryConfig {
    /// Versioned storage key holding the full expansion records
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    /// Pre-v2 storage key holding a bare name list; read once for
    /// migration, then deleted
    #[serde(default = "default_legacy_storage_key")]
    pub legacy_storage_key: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            legacy_storage_key: default_legacy_storage_key(),
        }
    }
}

fn default_storage_key() -> String {
    "cardmarket_expansions_v2".to_string()
}

fn default_legacy_storage_key() -> String {
    "cardmarket_expansions".to_string()
}

/// Bulk catalog source resolution and limits
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// Directory (relative path) the bulk data files live under
    #[serde(default = "default_base_path")]
    pub base_path: String,
    /// Bulk dataset identifier; resolved as `{source}.json` first, then the
    /// dated variants
    #[serde(default = "default_source")]
    pub source: String,
    /// Dated filename suffixes tried after the bare name, in order
    #[serde(default = "default_dated_suffixes")]
    pub dated_suffixes: Vec<String>,
    /// Hard cap on the bulk payload size (default: 2 GiB)
    #[serde(default = "default_max_payload_bytes")]
    pub max_payload_bytes: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_path: default_base_path(),
            source: default_source(),
            dated_suffixes: default_dated_suffixes(),
            max_payload_bytes: default_max_payload_bytes(),
        }
    }
}

fn default_base_path() -> String {
    "Scryfall".to_string()
}

fn default_source() -> String {
    "default-cards".to_string()
}

fn default_dated_suffixes() -> Vec<String> {
    vec!["20251205102358".to_string(), "20251129090000".to_string()]
}

fn default_max_payload_bytes() -> u64 {
    2 * 1024 * 1024 * 1024
}

/// HTTP fetcher configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FetchConfig {
    /// Base URL the relative resource paths resolve against
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Connect timeout in seconds (default: 10)
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Per-read timeout in seconds while streaming a body (default: 30)
    #[serde(default = "default_read_timeout_secs")]
    pub read_timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            connect_timeout_secs: default_connect_timeout_secs(),
            read_timeout_secs: default_read_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_read_timeout_secs() -> u64 {
    30
}
