//! Wordcrawl main entry point
//!
//! This is the command-line interface for the wordcrawl word-frequency crawler.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use wordcrawl::config::{load_config, Config, CrawlSettings, PatternSet};
use wordcrawl::output::write_result;
use wordcrawl::{CrawlerEngine, HtmlPageParser, SystemClock};

/// Wordcrawl: a concurrent word-frequency crawler
///
/// Wordcrawl follows links from a set of starting URLs, counts the words on
/// every page it reaches within the depth and time limits, and reports the
/// most popular ones.
#[derive(Parser, Debug)]
#[command(name = "wordcrawl")]
#[command(version)]
#[command(about = "A concurrent word-frequency crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Write the JSON result here instead of the configured result path
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = load_config(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_crawl(config, cli.output)
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("wordcrawl=info,warn"),
            1 => EnvFilter::new("wordcrawl=debug,info"),
            2 => EnvFilter::new("wordcrawl=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    // Logs go to stderr so stdout stays clean for the JSON result
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &Config) {
    let crawler = &config.crawler;

    println!("=== Wordcrawl Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Max depth: {}", crawler.max_depth);
    println!("  Timeout: {}s", crawler.timeout_seconds);
    println!("  Popular word count: {}", crawler.popular_word_count);
    match crawler.parallelism {
        Some(n) => println!("  Parallelism: {} (host has {})", n, num_cpus::get()),
        None => println!("  Parallelism: host default ({})", num_cpus::get()),
    }

    println!("\nStarting URLs ({}):", crawler.starting_urls.len());
    for url in &crawler.starting_urls {
        println!("  - {}", url);
    }

    println!("\nIgnored URL patterns ({}):", crawler.ignored_urls.len());
    for pattern in &crawler.ignored_urls {
        println!("  - {}", pattern);
    }

    println!("\nIgnored word patterns ({}):", crawler.ignored_words.len());
    for pattern in &crawler.ignored_words {
        println!("  - {}", pattern);
    }

    println!("\nOutput:");
    match &config.output.result_path {
        Some(path) => println!("  Result: {}", path),
        None => println!("  Result: stdout"),
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
fn handle_crawl(config: Config, output: Option<PathBuf>) -> anyhow::Result<()> {
    let settings = CrawlSettings::from_config(&config.crawler, num_cpus::get())?;
    let ignored_words = PatternSet::new(&config.crawler.ignored_words)?;
    let parser = HtmlPageParser::new(ignored_words).context("Failed to build HTTP client")?;

    let engine = CrawlerEngine::new(settings, Arc::new(parser), Arc::new(SystemClock))?;
    let result = engine.crawl(&config.crawler.starting_urls)?;

    let result_path = output.or_else(|| config.output.result_path.map(PathBuf::from));
    write_result(&result, result_path.as_deref())?;

    Ok(())
}
