//! HTML parser for extracting words and links
//!
//! This module turns a fetched HTML document into:
//! - Per-page word counts (from the visible text of `<body>`)
//! - Links to follow (from `<a href>` tags)

use crate::config::PatternSet;
use crate::parser::PageContent;
use scraper::{Html, Node, Selector};
use std::collections::HashMap;
use url::Url;

/// Parses HTML content and extracts word counts and links
///
/// # Word Extraction Rules
///
/// - Only text inside `<body>` is counted; `<script>` and `<style>` content is
///   skipped
/// - Text is split on whitespace, non-word characters are stripped, and the
///   remainder is lowercased
/// - Empty tokens and tokens matching `ignored_words` are dropped
///
/// # Link Extraction Rules
///
/// **Include:** `<a href="...">`, resolved against `base_url`
///
/// **Exclude:** `javascript:`, `mailto:`, `tel:`, `data:` and fragment-only
/// links, `<a download>` links, and anything that does not resolve to
/// `http`, `https` or `file`
///
/// # Example
///
/// ```
/// use wordcrawl::config::PatternSet;
/// use wordcrawl::parser::parse_html;
/// use url::Url;
///
/// let html = r#"<html><body><p>Hello, hello world!</p><a href="/next">next</a></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let page = parse_html(html, &base_url, &PatternSet::default());
///
/// assert_eq!(page.word_counts.get("hello"), Some(&2));
/// assert_eq!(page.links, vec!["https://example.com/next".to_string()]);
/// ```
pub fn parse_html(html: &str, base_url: &Url, ignored_words: &PatternSet) -> PageContent {
    let document = Html::parse_document(html);

    PageContent {
        word_counts: count_words(&body_text(&document), ignored_words),
        links: extract_links(&document, base_url),
    }
}

/// Collects the text of `<body>`, skipping script and style elements
fn body_text(document: &Html) -> String {
    let mut text = String::new();

    let Ok(body_selector) = Selector::parse("body") else {
        return text;
    };

    for body in document.select(&body_selector) {
        for node in body.descendants() {
            let Node::Text(fragment) = node.value() else {
                continue;
            };

            let hidden = node
                .parent()
                .and_then(|parent| parent.value().as_element().map(|e| e.name()))
                .map(|name| matches!(name, "script" | "style" | "noscript"))
                .unwrap_or(false);

            if !hidden {
                text.push_str(fragment);
                text.push(' ');
            }
        }
    }

    text
}

/// Splits text into normalised words and tallies them
pub(crate) fn count_words(text: &str, ignored_words: &PatternSet) -> HashMap<String, u64> {
    let mut counts = HashMap::new();

    for token in text.split_whitespace() {
        let word: String = token
            .chars()
            .filter(|c| c.is_alphanumeric() || *c == '_')
            .flat_map(char::to_lowercase)
            .collect();

        if word.is_empty() || ignored_words.matches(&word) {
            continue;
        }

        *counts.entry(word).or_insert(0) += 1;
    }

    counts
}

/// Extracts all followable links from the HTML document, in document order
fn extract_links(document: &Html, base_url: &Url) -> Vec<String> {
    let mut links = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            // Skip if it has the download attribute
            if element.value().attr("download").is_some() {
                continue;
            }

            if let Some(href) = element.value().attr("href") {
                if let Some(absolute_url) = resolve_link(href, base_url) {
                    links.push(absolute_url);
                }
            }
        }
    }

    links
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - fragment-only links
/// - Invalid URLs
/// - Schemes other than http, https and file after resolution
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    let mut absolute_url = base_url.join(href).ok()?;
    absolute_url.set_fragment(None);

    match absolute_url.scheme() {
        "http" | "https" | "file" => Some(absolute_url.to_string()),
        _ => None,
    }
}
