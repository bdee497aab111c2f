use crate::config::types::{CacheConfig, Config, ConverterConfig, ExtractionConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
///
/// The extraction token is not checked here: a dry run never fetches, so a
/// missing token is only an error once a fetcher is built.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_extraction_config(&config.extraction)?;
    validate_cache_config(&config.cache)?;
    validate_converter_config(&config.converter)?;
    Ok(())
}

/// Validates extraction service configuration
fn validate_extraction_config(config: &ExtractionConfig) -> Result<(), ConfigError> {
    let endpoint = Url::parse(&config.endpoint)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid endpoint: {}", e)))?;

    if endpoint.scheme() != "http" && endpoint.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "endpoint must use http or https, got '{}'",
            endpoint.scheme()
        )));
    }

    if config.timeout_secs == Some(0) {
        return Err(ConfigError::Validation(
            "timeout-secs must be >= 1 when set".to_string(),
        ));
    }

    Ok(())
}

/// Validates cache configuration
fn validate_cache_config(config: &CacheConfig) -> Result<(), ConfigError> {
    if config.path.trim().is_empty() {
        return Err(ConfigError::Validation(
            "cache path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates converter configuration
fn validate_converter_config(config: &ConverterConfig) -> Result<(), ConfigError> {
    match config.command.first() {
        Some(program) if !program.trim().is_empty() => {}
        _ => {
            return Err(ConfigError::Validation(
                "converter command must name a program".to_string(),
            ))
        }
    }

    if config.output_extension.is_empty()
        || !config
            .output_extension
            .chars()
            .all(|c| c.is_ascii_alphanumeric())
    {
        return Err(ConfigError::Validation(format!(
            "output-extension must be ASCII alphanumeric, got '{}'",
            config.output_extension
        )));
    }

    Ok(())
}
