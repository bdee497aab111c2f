use crate::Result;
use scraper::{Html, Selector};
use std::path::Path;

/// Splits a URL list into trimmed, non-empty lines
pub fn parse_url_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Reads a plain-text URL list, one URL per line
pub fn read_url_list(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path)?;
    Ok(parse_url_list(&text))
}

/// Extracts saved links from a Pocket HTML export
///
/// The export keeps unread items in the first `<ul>`; every anchor's `href`
/// in that list is returned in document order.
pub fn extract_pocket_urls(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut urls = Vec::new();

    let (Ok(list_selector), Ok(link_selector)) = (Selector::parse("ul"), Selector::parse("a[href]"))
    else {
        return urls;
    };

    if let Some(list) = document.select(&list_selector).next() {
        for link in list.select(&link_selector) {
            if let Some(href) = link.value().attr("href") {
                let href = href.trim();
                if !href.is_empty() {
                    urls.push(href.to_string());
                }
            }
        }
    }

    urls
}

/// Reads a Pocket HTML export and extracts its saved links
pub fn read_pocket_export(path: &Path) -> Result<Vec<String>> {
    let html = std::fs::read_to_string(path)?;
    Ok(extract_pocket_urls(&html))
}
