//! Configuration module for Automobile
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Every setting has a default, so running without a file
//! is the same as loading an empty one.
//!
//! # Example
//!
//! ```no_run
//! use automobile::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("automobile.toml")).unwrap();
//! println!("Extraction endpoint: {}", config.extraction.endpoint);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    CacheConfig, Config, ConverterConfig, ExtractionConfig, SanitizerConfig, DEFAULT_ENDPOINT,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, resolve_cache_path};
pub use validation::validate;
