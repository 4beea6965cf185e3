//! In-memory link graph used by crawler tests

use crate::clock::ManualClock;
use crate::parser::{PageContent, PageParser};
use crate::ParseError;
use chrono::Duration;
use dashmap::DashMap;
use futures::future::BoxFuture;
use futures::FutureExt;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Parser that serves pages from a fixed graph and records every fetch
#[derive(Default)]
pub(crate) struct GraphParser {
    pages: HashMap<String, PageContent>,
    failing: HashSet<String>,
    panicking: HashSet<String>,
    fetches: DashMap<String, usize>,
    clock_step: Option<(Arc<ManualClock>, Duration)>,
}

impl GraphParser {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn page(mut self, address: &str, words: &[(&str, u64)], links: &[&str]) -> Self {
        let content = PageContent {
            word_counts: words.iter().map(|(w, c)| (w.to_string(), *c)).collect(),
            links: links.iter().map(|l| l.to_string()).collect(),
        };
        self.pages.insert(address.to_string(), content);
        self
    }

    /// Makes every fetch of `address` fail
    pub(crate) fn failing(mut self, address: &str) -> Self {
        self.failing.insert(address.to_string());
        self
    }

    /// Makes every fetch of `address` panic inside the task running it
    pub(crate) fn panicking(mut self, address: &str) -> Self {
        self.panicking.insert(address.to_string());
        self
    }

    /// Moves `clock` forward by `step` during every fetch
    pub(crate) fn advancing(mut self, clock: Arc<ManualClock>, step: Duration) -> Self {
        self.clock_step = Some((clock, step));
        self
    }

    pub(crate) fn fetches(&self, address: &str) -> usize {
        self.fetches.get(address).map(|n| *n).unwrap_or(0)
    }

    pub(crate) fn total_fetches(&self) -> usize {
        self.fetches.iter().map(|entry| *entry.value()).sum()
    }
}

impl PageParser for GraphParser {
    fn parse<'a>(&'a self, address: &'a str) -> BoxFuture<'a, Result<PageContent, ParseError>> {
        async move {
            *self.fetches.entry(address.to_string()).or_insert(0) += 1;

            if let Some((clock, step)) = &self.clock_step {
                clock.advance(*step);
            }

            // Give sibling tasks a chance to interleave with this fetch
            tokio::task::yield_now().await;

            if self.panicking.contains(address) {
                panic!("parser blew up on {}", address);
            }

            if self.failing.contains(address) {
                return Err(ParseError::Status {
                    url: address.to_string(),
                    status: 500,
                });
            }

            self.pages
                .get(address)
                .cloned()
                .ok_or_else(|| ParseError::Status {
                    url: address.to_string(),
                    status: 404,
                })
        }
        .boxed()
    }
}
