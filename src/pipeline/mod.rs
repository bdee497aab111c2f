//! Pipeline orchestration
//!
//! This module turns the URL list into the ordered article list, including:
//! - Reading URLs from a plain list or a Pocket HTML export
//! - Canonicalizing each URL and resolving it through the cache
//! - Assigning chapter order IDs
//! - Persisting the cache even when a URL fails

mod input;
mod orchestrator;

pub use input::{extract_pocket_urls, parse_url_list, read_pocket_export, read_url_list};
pub use orchestrator::{build_article_list, format_order_id};

/// One extracted, sanitized article with its chapter position
///
/// Built once per URL by [`build_article_list`] and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    order_id: String,
    title: String,
    content: String,
}

impl Article {
    pub fn new(
        order_id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            order_id: order_id.into(),
            title: title.into(),
            content: content.into(),
        }
    }

    /// Zero-padded chapter position, e.g. `"001"`
    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Sanitized HTML fragment
    pub fn content(&self) -> &str {
        &self.content
    }
}
