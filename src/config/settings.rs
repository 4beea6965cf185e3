use crate::config::patterns::PatternSet;
use crate::config::types::CrawlerConfig;
use crate::ConfigError;
use std::time::Duration;

/// Validated, ready-to-run crawl parameters
///
/// This is the form the engine consumes: patterns are already compiled and
/// the timeout is a [`Duration`]. Build it from a file-level
/// [`CrawlerConfig`] with [`CrawlSettings::from_config`], or fill it in
/// directly in tests.
#[derive(Debug, Clone)]
pub struct CrawlSettings {
    /// Total time budget for one crawl
    pub timeout: Duration,

    /// Number of words kept in the ranked result
    pub popular_word_count: usize,

    /// Requested worker pool size (capped by host parallelism)
    pub target_parallelism: usize,

    /// Addresses that are never visited
    pub ignored_urls: PatternSet,

    /// Maximum number of link hops from a seed
    pub max_depth: u32,
}

impl CrawlSettings {
    /// Converts a file-level crawler config into engine settings
    ///
    /// A missing `parallelism` falls back to `default_parallelism`.
    pub fn from_config(
        config: &CrawlerConfig,
        default_parallelism: usize,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            timeout: Duration::from_secs(config.timeout_seconds),
            popular_word_count: config.popular_word_count,
            target_parallelism: config.parallelism.unwrap_or(default_parallelism),
            ignored_urls: PatternSet::new(&config.ignored_urls)?,
            max_depth: config.max_depth,
        })
    }
}
