//! Article cache module
//!
//! This module persists extracted articles between runs, including:
//! - The in-memory mapping from canonical URL to title and sanitized HTML
//! - Lookup with fetch-on-miss
//! - The versioned, line-oriented on-disk format and its strict parser

mod format;
mod store;

pub use format::{decode_cache, encode_cache, CACHE_HEADER};
pub use store::ArticleCache;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or saving the cache
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("IO error on cache file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Corrupt cache at line {line}: {message}")]
    Corrupt { line: usize, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for cache operations
pub type CacheResult<T> = Result<T, CacheError>;

/// A cached article: its title and already-sanitized HTML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedArticle {
    pub title: String,
    pub html: String,
}

impl CachedArticle {
    pub fn new(title: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            html: html.into(),
        }
    }
}
