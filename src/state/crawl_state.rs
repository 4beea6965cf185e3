use chrono::{DateTime, Utc};
use dashmap::{DashMap, DashSet};
use std::collections::HashMap;

/// State shared by every task of a single crawl
///
/// Holds the fixed deadline, the set of addresses that have been claimed, and
/// the running word tally. Both collections are sharded concurrent
/// structures, so tasks never contend on a crawl-wide lock.
#[derive(Debug)]
pub struct SharedCrawlState {
    /// Instant after which no new page may be started
    deadline: DateTime<Utc>,

    /// Addresses claimed by some task
    visited: DashSet<String>,

    /// Word frequencies merged from every processed page
    counts: DashMap<String, u64>,
}

impl SharedCrawlState {
    /// Creates empty state for a crawl ending at `deadline`
    pub fn new(deadline: DateTime<Utc>) -> Self {
        Self {
            deadline,
            visited: DashSet::new(),
            counts: DashMap::new(),
        }
    }

    pub fn deadline(&self) -> DateTime<Utc> {
        self.deadline
    }

    /// Returns true once `now` has reached the deadline
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.deadline
    }

    /// Claims `address` for processing
    ///
    /// Returns `true` only for the first caller to claim a given address.
    /// Every later caller, concurrent or not, gets `false`.
    pub fn try_visit(&self, address: &str) -> bool {
        if self.visited.contains(address) {
            return false;
        }
        self.visited.insert(address.to_string())
    }

    /// Adds one page's word counts into the shared tally
    pub fn merge_counts<'a, I>(&self, page_counts: I)
    where
        I: IntoIterator<Item = (&'a String, &'a u64)>,
    {
        for (word, count) in page_counts {
            if let Some(mut total) = self.counts.get_mut(word.as_str()) {
                *total += *count;
                continue;
            }
            *self.counts.entry(word.clone()).or_insert(0) += *count;
        }
    }

    /// Number of distinct addresses claimed so far
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn has_visited(&self, address: &str) -> bool {
        self.visited.contains(address)
    }

    /// Number of distinct words counted so far
    pub fn word_count(&self) -> usize {
        self.counts.len()
    }

    /// Snapshot of the current word tally
    pub fn counts(&self) -> HashMap<String, u64> {
        self.counts
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect()
    }

    /// Consumes the state, returning the final word tally
    pub fn into_counts(self) -> HashMap<String, u64> {
        self.counts.into_iter().collect()
    }
}
