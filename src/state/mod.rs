//! State module for tracking crawl progress
//!
//! This module provides the state shared between all tasks of one crawl.
//!
//! # Components
//!
//! - `SharedCrawlState`: the crawl deadline, the dedup set of visited
//!   addresses, and the concurrent word tally

mod crawl_state;

// Re-export main types
pub use crawl_state::SharedCrawlState;
