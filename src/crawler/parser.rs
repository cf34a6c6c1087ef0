//! HTML link extraction
//!
//! This module parses HTML content and returns the absolute addresses its
//! anchors point to, in document order.

use crate::url::Address;
use scraper::{Html, Selector};

/// Extracts outbound links from fetched content
pub trait LinkExtractor: Send + Sync {
    /// Returns the resolved absolute addresses referenced by `content`
    ///
    /// References are resolved against `base`. Anything that cannot be
    /// resolved to an HTTP(S) address is dropped silently. Duplicates are
    /// kept, in document order.
    fn extract(&self, content: &str, base: &Address) -> Vec<Address>;
}

/// Link extractor that queries `<a href>` elements with `scraper`
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlLinkExtractor;

impl LinkExtractor for HtmlLinkExtractor {
    fn extract(&self, content: &str, base: &Address) -> Vec<Address> {
        extract_links(content, base)
    }
}

/// Extracts every followable anchor link from an HTML document
///
/// # Link Extraction Rules
///
/// **Include:**
/// - `<a href="...">` anywhere in the document, `rel="nofollow"` and
///   `download` anchors included
///
/// **Exclude:**
/// - `javascript:`, `mailto:`, `tel:`, `data:` and other non-HTTP(S) targets
/// - Fragment-only references (`#section`)
/// - References that fail to resolve
///
/// # Example
///
/// ```
/// use focused_crawler::crawler::extract_links;
/// use focused_crawler::url::Address;
///
/// let html = r#"<html><body><a href="/page">Link</a></body></html>"#;
/// let base = Address::parse("https://example.com/").unwrap();
/// let links = extract_links(html, &base);
/// assert_eq!(links[0].as_str(), "https://example.com/page");
/// ```
pub fn extract_links(html: &str, base: &Address) -> Vec<Address> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();

    let Ok(a_selector) = Selector::parse("a[href]") else {
        return links;
    };

    for element in document.select(&a_selector) {
        if let Some(href) = element.value().attr("href") {
            if let Some(address) = resolve_link(href, base) {
                links.push(address);
            }
        }
    }

    links
}

/// Resolves a link href against the page address
fn resolve_link(href: &str, base: &Address) -> Option<Address> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    base.join(href)
}
