//! Link extraction over a parsed document tree
//!
//! Walks the tree in pre-order and collects `href` values of `<a>` elements
//! that look like absolute HTTP(S) addresses.
//!
//! **Include:**
//! - every `href` attribute on an `<a>` element whose value contains `http://`
//!   or `https://`, in attribute order
//!
//! **Exclude:**
//! - relative links, `mailto:`, `javascript:` and other schemes
//! - `href` on any element other than `<a>`
//!
//! Duplicates are kept; deduplication belongs to the crawl frontier.

use crate::crawler::document::Node;
use once_cell::sync::Lazy;
use regex::Regex;

const LINK_TAG: &str = "a";
const HREF_ATTR: &str = "href";

static ABSOLUTE_URI: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(http|https)://").expect("absolute URI pattern is valid"));

/// Extracts all absolute links below (and including) `node`
///
/// # Arguments
///
/// * `node` - The node to start from, `None` for an absent tree
///
/// # Returns
///
/// The matching addresses in document order
///
/// # Example
///
/// ```
/// use page_crawler::crawler::{extract_links, Document};
///
/// let document = Document::parse_html(r#"<a href="https://example.com/">x</a>"#);
/// assert_eq!(extract_links(document.root()), vec!["https://example.com/"]);
/// ```
pub fn extract_links(node: Option<&Node>) -> Vec<String> {
    collect_links(Vec::new(), node)
}

/// Accumulator form of [`extract_links`]: appends to `links` and returns it
pub fn collect_links(mut links: Vec<String>, node: Option<&Node>) -> Vec<String> {
    // Explicit stack; children are pushed in reverse so the first is visited first
    let mut pending: Vec<&Node> = node.into_iter().collect();

    while let Some(node) = pending.pop() {
        if node.tag_name() == Some(LINK_TAG) {
            for attribute in node.attributes() {
                if attribute.key == HREF_ATTR && is_absolute_link(&attribute.value) {
                    links.push(attribute.value.clone());
                }
            }
        }

        pending.extend(node.children.iter().rev());
    }

    links
}

/// Whether an href value looks like an absolute HTTP(S) address
pub fn is_absolute_link(href: &str) -> bool {
    ABSOLUTE_URI.is_match(href)
}
