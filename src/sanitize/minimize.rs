use crate::EncodingError;
use once_cell::sync::Lazy;
use regex::Regex;

static RE_WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t\r\n]+").unwrap());

/// Replaces tabs and newlines with spaces and collapses runs of spaces
pub fn collapse_whitespace(text: &str) -> String {
    RE_WHITESPACE_RUN.replace_all(text, " ").into_owned()
}

/// Strips every line and joins the lines into one unbroken string
///
/// Used on sanitized fragments and on every rendered package document.
pub fn minimize_html(html: &str) -> String {
    html.lines().map(str::trim).collect()
}

/// Fails on the first character outside 7-bit ASCII
pub fn ensure_ascii(text: &str) -> Result<(), EncodingError> {
    match text.char_indices().find(|(_, c)| !c.is_ascii()) {
        Some((offset, character)) => Err(EncodingError { character, offset }),
        None => Ok(()),
    }
}

/// Writes every character outside 7-bit ASCII as a numeric character reference
pub fn escape_non_ascii(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_ascii() {
            out.push(c);
        } else {
            out.push_str(&format!("&#{};", c as u32));
        }
    }
    out
}
