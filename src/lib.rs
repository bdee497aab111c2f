//! Automobile: turns a list of article URLs into an offline e-book
//!
//! This crate fetches article content through a content-extraction service,
//! caches sanitized results across runs, and assembles an EPUB package that an
//! external converter turns into a reader-device file.

pub mod cache;
pub mod config;
pub mod fetcher;
pub mod package;
pub mod pipeline;
pub mod sanitize;
pub mod url;

use thiserror::Error;

/// Main error type for Automobile operations
#[derive(Debug, Error)]
pub enum AutomobileError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Extraction service returned status {status} for {url}")]
    Fetch { url: String, status: u16 },

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Malformed extraction response for {url}: {message}")]
    InvalidResponse { url: String, message: String },

    #[error("Encoding error: {0}")]
    Encoding(#[from] EncodingError),

    #[error("Cache error: {0}")]
    Cache(#[from] cache::CacheError),

    #[error("Conversion failed: {0}")]
    Conversion(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Raised when sanitized markup cannot be written as 7-bit ASCII
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("non-ASCII character {character:?} at byte {offset}")]
pub struct EncodingError {
    pub character: char,
    pub offset: usize,
}

/// Result type alias for Automobile operations
pub type Result<T> = std::result::Result<T, AutomobileError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use cache::{ArticleCache, CachedArticle};
pub use config::Config;
pub use fetcher::{ArticleFetcher, ReadabilityFetcher};
pub use package::{assemble, CommandConverter, Converter};
pub use pipeline::{build_article_list, Article};
pub use sanitize::{sanitize, Sanitizer};
pub use crate::url::canonicalize;
