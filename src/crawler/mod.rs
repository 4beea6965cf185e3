//! Crawler module for concurrent page traversal
//!
//! This module contains the core crawling logic, including:
//! - The engine that owns the worker pool and runs a crawl
//! - The recursive per-address task
//! - Deterministic ranking of the merged word counts

mod engine;
mod ranker;
mod task;

#[cfg(test)]
pub(crate) mod testing;

pub use engine::CrawlerEngine;
pub use ranker::rank;
