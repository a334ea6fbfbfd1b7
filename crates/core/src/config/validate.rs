use super::{Config, ConfigError};

/// Validate cross-field constraints the type system cannot express.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.extractor.max_entry_span_bytes == 0 {
        return Err(ConfigError::Invalid(
            "extractor.max_entry_span_bytes must be greater than 0".to_string(),
        ));
    }

    if config.registry.storage_key.is_empty() {
        return Err(ConfigError::Invalid(
            "registry.storage_key must not be empty".to_string(),
        ));
    }

    if config.registry.storage_key == config.registry.legacy_storage_key {
        return Err(ConfigError::Invalid(
            "registry.storage_key and registry.legacy_storage_key must differ".to_string(),
        ));
    }

    if config.catalog.source.is_empty() {
        return Err(ConfigError::Invalid(
            "catalog.source must not be empty".to_string(),
        ));
    }

    if config.catalog.max_payload_bytes == 0 {
        return Err(ConfigError::Invalid(
            "catalog.max_payload_bytes must be greater than 0".to_string(),
        ));
    }

    if config.fetch.base_url.is_empty() {
        return Err(ConfigError::Invalid(
            "fetch.base_url must not be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_zero_entry_span_rejected() {
        let mut config = Config::default();
        config.extractor.max_entry_span_bytes = 0;
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_colliding_storage_keys_rejected() {
        let mut config = Config::default();
        config.registry.legacy_storage_key = config.registry.storage_key.clone();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_empty_source_rejected() {
        let mut config = Config::default();
        config.catalog.source = String::new();
        assert!(validate_config(&config).is_err());
    }
}
