//! Article fetcher module
//!
//! This is the only network boundary of the pipeline: it asks the external
//! content-extraction service for an article's title and body and hands the
//! body to the sanitizer before anything is cached.

mod readability;

pub use readability::{build_http_client, ReadabilityFetcher};

use crate::cache::CachedArticle;
use async_trait::async_trait;

/// Source of extracted articles for cache misses
///
/// The pipeline only depends on this trait, so tests can substitute a fake
/// that never touches the network.
#[async_trait]
pub trait ArticleFetcher: Send + Sync {
    /// Fetches the article at the canonical `url`
    ///
    /// # Returns
    ///
    /// * `Ok(CachedArticle)` - Trimmed title and sanitized HTML
    /// * `Err(AutomobileError)` - Non-200 status, transport failure, malformed
    ///   response, or content the sanitizer rejects
    async fn fetch(&self, url: &str) -> crate::Result<CachedArticle>;
}
