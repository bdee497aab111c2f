use crate::config::types::{CacheConfig, Config};
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// Reads, parses and validates the TOML file at `path`
///
/// Tables left out of the file take their defaults.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let text = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&text)?;
    validate(&config)?;
    Ok(config)
}

/// Hex SHA-256 digest of the raw config file, logged at startup
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let bytes = std::fs::read(path)?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}

/// Like [`load_config`], also returning the file's digest
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    Ok((load_config(path)?, compute_config_hash(path)?))
}

/// Resolves the cache file location
///
/// Absolute paths are used as-is. Relative paths live next to the running
/// executable so every invocation shares one cache regardless of the working
/// directory.
pub fn resolve_cache_path(config: &CacheConfig) -> PathBuf {
    let path = PathBuf::from(&config.path);
    if path.is_absolute() {
        return path;
    }

    match std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        Some(dir) => dir.join(path),
        None => path,
    }
}
