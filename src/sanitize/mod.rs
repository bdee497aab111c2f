//! HTML sanitizer for extracted article content
//!
//! This module reduces raw extracted HTML to a compact, embeddable fragment:
//! - Whitespace is collapsed before parsing
//! - Images, figures and `noscript` fallbacks are removed with their subtrees
//! - Elements without text are removed
//! - `class`, `id`, `name` and `style` attributes are dropped
//! - The result is 7-bit ASCII on a single line

mod minimize;
mod serialize;

pub use minimize::{collapse_whitespace, ensure_ascii, escape_non_ascii, minimize_html};
pub use serialize::STRIPPED_ATTRIBUTES;

use crate::config::SanitizerConfig;
use crate::EncodingError;
use scraper::{ElementRef, Html};

/// Elements removed together with everything inside them
///
/// `noscript` content is parsed as raw text, so its fallback images would
/// otherwise survive as escaped markup.
pub const DROPPED_ELEMENTS: &[&str] = &["img", "figure", "noscript"];

/// Sanitizes raw HTML with the default (strict ASCII) settings
///
/// # Example
///
/// ```
/// use automobile::sanitize;
///
/// let html = sanitize("<p class=\"x\">Hello<span></span>\n world</p>").unwrap();
/// assert_eq!(html, "<p>Hello world</p>");
/// ```
pub fn sanitize(raw_html: &str) -> Result<String, EncodingError> {
    Sanitizer::default().sanitize(raw_html)
}

/// Configurable HTML sanitizer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sanitizer {
    /// Write non-ASCII characters as numeric references instead of failing
    pub escape_non_ascii: bool,
}

impl Sanitizer {
    pub fn from_config(config: &SanitizerConfig) -> Self {
        Self {
            escape_non_ascii: config.escape_non_ascii,
        }
    }

    /// Runs the full sanitization pipeline on `raw_html`
    ///
    /// # Pipeline
    ///
    /// 1. Collapse tabs, newlines and repeated spaces to single spaces
    /// 2. Parse as an HTML fragment
    /// 3. Detach every `img`, `figure` and `noscript` subtree
    /// 4. Detach every element whose stripped text is empty (one pass)
    /// 5. Serialize, leaving out `class`/`id`/`name`/`style`
    /// 6. Check (or escape) for 7-bit ASCII
    /// 7. Strip each line and join into one string
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - Single-line sanitized fragment
    /// * `Err(EncodingError)` - Non-ASCII content while `escape_non_ascii` is off
    pub fn sanitize(&self, raw_html: &str) -> Result<String, EncodingError> {
        let collapsed = collapse_whitespace(raw_html);
        let mut fragment = Html::parse_fragment(&collapsed);

        remove_dropped_elements(&mut fragment);
        remove_empty_elements(&mut fragment);

        let mut serialized = String::with_capacity(collapsed.len());
        serialize::serialize_children(fragment.root_element(), &mut serialized);

        let encoded = if self.escape_non_ascii {
            escape_non_ascii(&serialized)
        } else {
            ensure_ascii(&serialized)?;
            serialized
        };

        Ok(minimize_html(&encoded))
    }
}

fn remove_dropped_elements(fragment: &mut Html) {
    let ids: Vec<_> = fragment
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|element| DROPPED_ELEMENTS.contains(&element.value().name()))
        .map(|element| element.id())
        .collect();

    for id in ids {
        if let Some(mut node) = fragment.tree.get_mut(id) {
            node.detach();
        }
    }
}

// A single pass is enough: an element's text includes all of its descendants'
// text, so every ancestor that ends up empty is already in the collected set.
fn remove_empty_elements(fragment: &mut Html) {
    let root = fragment.root_element();
    let root_id = root.id();
    let ids: Vec<_> = root
        .descendants()
        .filter(|node| node.id() != root_id)
        .filter_map(ElementRef::wrap)
        .filter(|element| element.text().collect::<String>().trim().is_empty())
        .map(|element| element.id())
        .collect();

    for id in ids {
        if let Some(mut node) = fragment.tree.get_mut(id) {
            node.detach();
        }
    }
}
