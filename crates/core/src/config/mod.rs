//! Configuration loading and validation.

mod loader;
mod types;
mod validate;

pub use loader::{load_config, load_config_from_str};
pub use types::{CatalogConfig, Config, ExtractorConfig, FetchConfig, RegistryConfig};
pub use validate::validate_config;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse config: {0}")]
    ParseError(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}
