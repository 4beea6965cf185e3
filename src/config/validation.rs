use crate::config::patterns::PatternSet;
use crate::config::types::{Config, CrawlerConfig, OutputConfig};
use crate::ConfigError;
use std::time::Duration;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    // max_depth >= 0 is always true for u32, so no check needed

    if config.starting_urls.is_empty() {
        return Err(ConfigError::Validation(
            "starting_urls must contain at least one URL".to_string(),
        ));
    }

    for seed in &config.starting_urls {
        Url::parse(seed).map_err(|e| {
            ConfigError::InvalidUrl(format!("Invalid starting URL '{}': {}", seed, e))
        })?;
    }

    if let Some(parallelism) = config.parallelism {
        validate_parallelism(parallelism)?;
    }

    validate_timeout(Duration::from_secs(config.timeout_seconds))?;

    PatternSet::new(&config.ignored_urls)?;
    PatternSet::new(&config.ignored_words)?;

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if let Some(path) = &config.result_path {
        if path.is_empty() {
            return Err(ConfigError::Validation(
                "result_path cannot be empty".to_string(),
            ));
        }
    }

    Ok(())
}

/// Checks that a requested worker pool size is usable
pub(crate) fn validate_parallelism(parallelism: usize) -> Result<(), ConfigError> {
    if parallelism < 1 {
        return Err(ConfigError::Validation(format!(
            "parallelism must be >= 1, got {}",
            parallelism
        )));
    }
    Ok(())
}

/// Checks that a timeout can be added to a timestamp without overflowing
pub(crate) fn validate_timeout(timeout: Duration) -> Result<chrono::Duration, ConfigError> {
    chrono::Duration::from_std(timeout).map_err(|_| {
        ConfigError::Validation(format!("timeout of {:?} is out of range", timeout))
    })
}
