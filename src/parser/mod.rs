//! Page fetching and parsing
//!
//! This module contains the collaborator the crawler calls once per claimed
//! address:
//! - [`PageParser`], the seam the crawl engine depends on
//! - [`HtmlPageParser`], the production implementation that fetches over
//!   HTTP(S) or from disk and extracts words and links from HTML

mod fetcher;
mod html;

pub use fetcher::{build_http_client, fetch_body};
pub use html::parse_html;

use crate::config::PatternSet;
use crate::ParseError;
use futures::future::BoxFuture;
use futures::FutureExt;
use reqwest::Client;
use std::collections::HashMap;

/// Words and links extracted from a single page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageContent {
    /// Occurrences of each word on this page only
    pub word_counts: HashMap<String, u64>,

    /// Addresses linked from this page, in document order
    pub links: Vec<String>,
}

/// Fetches an address and turns it into [`PageContent`]
///
/// Implementations are shared by every task of a crawl, so they must be
/// `Send + Sync`. The returned future must not hold locks that other tasks
/// need; the crawler calls this with no locks held.
pub trait PageParser: Send + Sync {
    fn parse<'a>(&'a self, address: &'a str) -> BoxFuture<'a, Result<PageContent, ParseError>>;
}

/// Production parser: fetches HTML and counts the words in its body
#[derive(Debug, Clone)]
pub struct HtmlPageParser {
    client: Client,
    ignored_words: PatternSet,
}

impl HtmlPageParser {
    /// Creates a parser with its own HTTP client
    pub fn new(ignored_words: PatternSet) -> Result<Self, reqwest::Error> {
        Ok(Self::with_client(build_http_client()?, ignored_words))
    }

    /// Creates a parser that reuses an existing HTTP client
    pub fn with_client(client: Client, ignored_words: PatternSet) -> Self {
        Self {
            client,
            ignored_words,
        }
    }
}

impl PageParser for HtmlPageParser {
    fn parse<'a>(&'a self, address: &'a str) -> BoxFuture<'a, Result<PageContent, ParseError>> {
        async move {
            let (url, body) = fetch_body(&self.client, address).await?;
            Ok(parse_html(&body, &url, &self.ignored_words))
        }
        .boxed()
    }
}
