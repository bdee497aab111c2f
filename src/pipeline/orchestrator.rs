//! Article list orchestration
//!
//! URLs are resolved strictly one after another: canonicalize, look up in the
//! cache, fetch on a miss. The cache is saved once every URL has been handled
//! or as soon as one fails, so partial progress is never lost.

use crate::cache::ArticleCache;
use crate::fetcher::ArticleFetcher;
use crate::pipeline::Article;
use crate::url::canonicalize;
use crate::Result;

/// Formats a 1-based chapter position as a zero-padded order ID
pub fn format_order_id(position: usize) -> String {
    format!("{:03}", position)
}

/// Builds the ordered article list for a run
///
/// The input is read bottom-up, so the most recently added link becomes the
/// first chapter. Order IDs start at `"001"` and follow that reversed order.
/// Cache identity depends only on the canonical URL, never on position.
///
/// The cache is saved after the loop whether or not it succeeded. When a URL
/// fails, the error is returned after every entry gathered before it has been
/// written to disk.
///
/// # Arguments
///
/// * `urls` - URLs in input-file order
/// * `cache` - Loaded article cache; owned by the caller
/// * `fetcher` - Source for cache misses
///
/// # Returns
///
/// * `Ok(Vec<Article>)` - One article per URL, in chapter order
/// * `Err(AutomobileError)` - The first fetch, sanitize, or cache-save failure
pub async fn build_article_list<F>(
    urls: &[String],
    cache: &mut ArticleCache,
    fetcher: &F,
) -> Result<Vec<Article>>
where
    F: ArticleFetcher + ?Sized,
{
    let outcome = resolve_articles(urls, cache, fetcher).await;

    match (outcome, cache.save()) {
        (Ok(articles), Ok(())) => Ok(articles),
        (Ok(_), Err(save_err)) => Err(save_err.into()),
        (Err(err), Ok(())) => {
            tracing::warn!(
                "Run failed; cache saved with {} articles before the failure",
                cache.len()
            );
            Err(err)
        }
        (Err(err), Err(save_err)) => {
            tracing::error!("Failed to save cache after failed run: {}", save_err);
            Err(err)
        }
    }
}

async fn resolve_articles<F>(
    urls: &[String],
    cache: &mut ArticleCache,
    fetcher: &F,
) -> Result<Vec<Article>>
where
    F: ArticleFetcher + ?Sized,
{
    let mut articles = Vec::with_capacity(urls.len());

    for (position, url) in urls.iter().rev().enumerate() {
        let canonical = canonicalize(url);
        let cached = cache.get_or_fetch(&canonical, fetcher).await?;
        articles.push(Article::new(
            format_order_id(position + 1),
            cached.title,
            cached.html,
        ));
    }

    Ok(articles)
}
