//! Wordcrawl: a concurrent, deadline-bounded word-frequency crawler
//!
//! This crate walks a link graph from a set of seed addresses, counts the
//! words found on every page it visits, and reports the most popular words
//! together with the number of distinct pages visited.

pub mod clock;
pub mod config;
pub mod crawler;
pub mod output;
pub mod parser;
pub mod state;

use thiserror::Error;

/// Main error type for wordcrawl operations
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to build worker pool: {0}")]
    Runtime(#[source] std::io::Error),

    #[error("crawl() cannot block inside an async runtime; use crawl_async()")]
    NestedRuntime,

    #[error("Crawl task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },
}

/// Errors raised while fetching or parsing a single page
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Failed to read {url}: {source}")]
    Io {
        url: String,
        source: std::io::Error,
    },

    #[error("Failed to parse URL {url}: {source}")]
    InvalidUrl {
        url: String,
        source: ::url::ParseError,
    },

    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),
}

/// Result type alias for crawl operations
pub type Result<T> = std::result::Result<T, CrawlError>;

// Re-export commonly used types
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{Config, CrawlSettings, PatternSet};
pub use crawler::{rank, CrawlerEngine};
pub use output::CrawlResult;
pub use parser::{HtmlPageParser, PageContent, PageParser};
pub use state::SharedCrawlState;
