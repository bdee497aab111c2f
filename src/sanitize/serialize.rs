//! XHTML-friendly serializer for sanitized fragments
//!
//! Presentation-identity attributes are left out as elements are written, as
//! is any attribute whose name would make the chapter ill-formed XML. Void
//! elements carry no text, so the empty-element pass has removed them before
//! anything is serialized.

use scraper::node::Node;
use scraper::ElementRef;

/// Attributes that carry no meaning once page CSS and scripts are gone
pub const STRIPPED_ATTRIBUTES: &[&str] = &["class", "id", "name", "style"];

/// Serializes the children of `element`, but not the element itself
pub fn serialize_children(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => escape_into(text, false, out),
            Node::Element(_) => {
                if let Some(child) = ElementRef::wrap(child) {
                    serialize_element(child, out);
                }
            }
            // comments, doctypes and processing instructions are dropped
            _ => {}
        }
    }
}

fn serialize_element(element: ElementRef<'_>, out: &mut String) {
    let name = element.value().name();

    out.push('<');
    out.push_str(name);
    for (attr, value) in element.value().attrs() {
        if STRIPPED_ATTRIBUTES.contains(&attr) || !is_xml_name(attr) {
            continue;
        }
        out.push(' ');
        out.push_str(attr);
        out.push_str("=\"");
        escape_into(value, true, out);
        out.push('"');
    }

    out.push('>');
    serialize_children(element, out);
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

/// Accepts names that are well-formed in a namespace-aware XML document
///
/// Prefixed names are rejected since their prefixes are never declared.
fn is_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_'))
}

fn escape_into(text: &str, in_attribute: bool, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if in_attribute => out.push_str("&quot;"),
            // entity-encoded tabs and newlines survive parsing; keep output single-line
            '\t' | '\n' | '\r' => out.push(' '),
            _ => out.push(c),
        }
    }
}
