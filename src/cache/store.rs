//! File-backed article cache
//!
//! The cache is loaded once at the start of a run, mutated in memory while
//! URLs are resolved, and rewritten wholesale when the run ends.

use crate::cache::{decode_cache, encode_cache, CacheError, CacheResult, CachedArticle};
use crate::fetcher::ArticleFetcher;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Persistent mapping from canonical URL to cached article
#[derive(Debug, Clone)]
pub struct ArticleCache {
    path: PathBuf,
    entries: BTreeMap<String, CachedArticle>,
}

impl ArticleCache {
    /// Creates an empty cache that will be saved to `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: BTreeMap::new(),
        }
    }

    /// Loads the cache stored at `path`
    ///
    /// # Returns
    ///
    /// * `Ok(ArticleCache)` - The persisted entries, or an empty cache if the file does not exist
    /// * `Err(CacheError::Corrupt)` - The file exists but is not a valid cache file
    /// * `Err(CacheError::Io)` - The file could not be read
    pub fn load(path: impl Into<PathBuf>) -> CacheResult<Self> {
        let path = path.into();
        if !path.exists() {
            tracing::debug!("No cache at {}, starting empty", path.display());
            return Ok(Self::new(path));
        }

        let text = std::fs::read_to_string(&path).map_err(|source| CacheError::Io {
            path: path.clone(),
            source,
        })?;
        let entries = decode_cache(&text)?;
        tracing::debug!("Loaded {} cached articles from {}", entries.len(), path.display());

        Ok(Self { path, entries })
    }

    /// Rewrites the whole cache file
    ///
    /// The text is written to a temporary file in the same directory and then
    /// moved over the target, so an interrupted save leaves the old file intact.
    pub fn save(&self) -> CacheResult<()> {
        let text = encode_cache(&self.entries)?;
        let io_err = |source: std::io::Error| CacheError::Io {
            path: self.path.clone(),
            source,
        };

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir).map_err(io_err)?;

        let mut tmp = NamedTempFile::new_in(&dir).map_err(io_err)?;
        tmp.write_all(text.as_bytes()).map_err(io_err)?;
        tmp.flush().map_err(io_err)?;
        tmp.persist(&self.path).map_err(|e| io_err(e.error))?;

        tracing::debug!("Saved {} cached articles to {}", self.entries.len(), self.path.display());
        Ok(())
    }

    /// Returns the cached article for `url`, fetching and caching it on a miss
    ///
    /// `url` must already be canonical. A hit never calls the fetcher. A failed
    /// fetch leaves every existing entry untouched.
    pub async fn get_or_fetch<F>(&mut self, url: &str, fetcher: &F) -> crate::Result<CachedArticle>
    where
        F: ArticleFetcher + ?Sized,
    {
        if let Some(article) = self.entries.get(url) {
            tracing::debug!("Cache hit: {}", url);
            return Ok(article.clone());
        }

        tracing::info!("Downloading URL: {}", url);
        let article = fetcher.fetch(url).await?;
        self.entries.insert(url.to_string(), article.clone());
        Ok(article)
    }

    pub fn get(&self, url: &str) -> Option<&CachedArticle> {
        self.entries.get(url)
    }

    pub fn contains(&self, url: &str) -> bool {
        self.entries.contains_key(url)
    }

    pub fn insert(&mut self, url: impl Into<String>, article: CachedArticle) {
        self.entries.insert(url.into(), article);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &BTreeMap<String, CachedArticle> {
        &self.entries
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
