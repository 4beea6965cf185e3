use serde::Deserialize;

/// Main configuration structure for wordcrawl
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Seed addresses the crawl starts from
    #[serde(rename = "starting-urls")]
    pub starting_urls: Vec<String>,

    /// Maximum number of link hops to follow from a seed
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Wall-clock budget for the whole crawl (seconds)
    #[serde(rename = "timeout-seconds")]
    pub timeout_seconds: u64,

    /// Number of words to keep in the ranked result
    #[serde(rename = "popular-word-count")]
    pub popular_word_count: usize,

    /// Requested worker pool size; defaults to the host core count
    #[serde(default)]
    pub parallelism: Option<usize>,

    /// Addresses matching any of these patterns are never visited
    #[serde(rename = "ignored-urls", default)]
    pub ignored_urls: Vec<String>,

    /// Words matching any of these patterns are never counted
    #[serde(rename = "ignored-words", default)]
    pub ignored_words: Vec<String>,
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// Path of the JSON result file; results go to stdout when unset
    #[serde(rename = "result-path", default)]
    pub result_path: Option<String>,
}
