//! Configuration module for wordcrawl
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files, and turning them into the [`CrawlSettings`] the engine runs with.
//!
//! # Example
//!
//! ```no_run
//! use wordcrawl::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("crawl.toml")).unwrap();
//! println!("Crawler will use max depth: {}", config.crawler.max_depth);
//! ```

mod parser;
mod patterns;
mod settings;
mod types;
mod validation;

// Re-export types
pub use patterns::PatternSet;
pub use settings::CrawlSettings;
pub use types::{Config, CrawlerConfig, OutputConfig};

// Re-export parser functions
pub use parser::{load_config, parse_config};

pub(crate) use validation::{validate_parallelism, validate_timeout};
