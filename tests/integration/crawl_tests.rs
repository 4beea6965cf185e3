//! Integration tests for the crawler
//!
//! These tests crawl small sites written to a temporary directory through
//! `file://` addresses, and use wiremock to exercise the HTTP fetcher.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use wordcrawl::config::{parse_config, CrawlSettings, PatternSet};
use wordcrawl::output::write_result;
use wordcrawl::{CrawlerEngine, HtmlPageParser, ManualClock, PageParser, ParseError, SystemClock};

/// Writes `pages` (file name, body HTML) into a fresh temporary directory
fn write_site(pages: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    for (name, body) in pages {
        let html = format!("<html><head><title>{}</title></head><body>{}</body></html>", name, body);
        std::fs::write(dir.path().join(name), html).expect("Failed to write page");
    }
    dir
}

fn address(dir: &TempDir, name: &str) -> String {
    Url::from_file_path(dir.path().join(name))
        .expect("Temp path is not absolute")
        .to_string()
}

fn create_test_settings() -> CrawlSettings {
    CrawlSettings {
        timeout: Duration::from_secs(30),
        popular_word_count: 10,
        target_parallelism: 4,
        ignored_urls: PatternSet::default(),
        max_depth: 10,
    }
}

fn engine(settings: CrawlSettings) -> CrawlerEngine {
    let parser = HtmlPageParser::new(PatternSet::default()).expect("Failed to build parser");
    CrawlerEngine::with_host_parallelism(settings, Arc::new(parser), Arc::new(SystemClock), 4)
        .expect("Failed to build engine")
}

/// index -> {left, right}, left -> shared, right -> shared, shared -> index
fn diamond_site() -> TempDir {
    write_site(&[
        (
            "index.html",
            r#"crawler crawler <a href="left.html">left</a> <a href="right.html">right</a>"#,
        ),
        ("left.html", r#"crawler words <a href="shared.html">on</a>"#),
        ("right.html", r#"crawler words <a href="shared.html">on</a>"#),
        ("shared.html", r#"words <a href="index.html">home</a>"#),
    ])
}

#[test]
fn test_full_crawl_of_local_site() {
    let site = diamond_site();
    let result = engine(create_test_settings())
        .crawl(&[address(&site, "index.html")])
        .expect("Crawl failed");

    assert_eq!(result.urls_visited, 4);

    let counts: HashMap<_, _> = result.word_counts.iter().cloned().collect();
    assert_eq!(counts.get("crawler"), Some(&4));
    assert_eq!(counts.get("words"), Some(&3));
    assert_eq!(counts.get("on"), Some(&2));
    assert_eq!(counts.get("home"), Some(&1));

    assert_eq!(result.word_counts[0], ("crawler".to_string(), 4));
    assert_eq!(result.word_counts[1], ("words".to_string(), 3));
}

#[test]
fn test_depth_limits_local_crawl() {
    let site = diamond_site();
    let mut settings = create_test_settings();
    settings.max_depth = 2;

    let result = engine(settings)
        .crawl(&[address(&site, "index.html")])
        .expect("Crawl failed");
    assert_eq!(result.urls_visited, 3);
}

#[test]
fn test_ignored_url_pattern() {
    let site = diamond_site();
    let mut settings = create_test_settings();
    settings.ignored_urls = PatternSet::new(&[".*/right\\.html".to_string()]).unwrap();

    let result = engine(settings)
        .crawl(&[address(&site, "index.html")])
        .expect("Crawl failed");
    assert_eq!(result.urls_visited, 3);

    let counts: HashMap<_, _> = result.word_counts.into_iter().collect();
    assert_eq!(counts.get("crawler"), Some(&3));
}

#[test]
fn test_missing_page_is_skipped() {
    let site = write_site(&[(
        "index.html",
        r#"alive <a href="gone.html">gone</a> <a href="other.html">other</a>"#,
    )]);
    std::fs::write(site.path().join("other.html"), "<html><body>alive</body></html>").unwrap();

    let result = engine(create_test_settings())
        .crawl(&[address(&site, "index.html")])
        .expect("Crawl failed");

    assert_eq!(result.urls_visited, 3);
    let counts: HashMap<_, _> = result.word_counts.into_iter().collect();
    assert_eq!(counts.get("alive"), Some(&2));
}

#[test]
fn test_zero_timeout_with_frozen_clock() {
    let site = diamond_site();
    let mut settings = create_test_settings();
    settings.timeout = Duration::ZERO;

    let parser = HtmlPageParser::new(PatternSet::default()).unwrap();
    let engine = CrawlerEngine::with_host_parallelism(
        settings,
        Arc::new(parser),
        Arc::new(ManualClock::default()),
        2,
    )
    .unwrap();

    let result = engine.crawl(&[address(&site, "index.html")]).expect("Crawl failed");
    assert_eq!(result.urls_visited, 0);
    assert!(result.word_counts.is_empty());
}

#[test]
fn test_same_result_for_any_pool_size() {
    let site = diamond_site();
    let seeds = [address(&site, "index.html"), address(&site, "shared.html")];

    let results: Vec<_> = [1, 2, 8]
        .into_iter()
        .map(|pool| {
            let mut settings = create_test_settings();
            settings.target_parallelism = pool;
            engine(settings).crawl(&seeds).expect("Crawl failed")
        })
        .collect();

    assert_eq!(results[0], results[1]);
    assert_eq!(results[1], results[2]);
}

#[test]
fn test_config_to_json_result() {
    let site = diamond_site();
    let out_dir = tempfile::tempdir().unwrap();
    let result_path = out_dir.path().join("result.json");

    let config_content = format!(
        r#"
[crawler]
starting-urls = ["{}"]
max-depth = 5
timeout-seconds = 30
popular-word-count = 2
parallelism = 2
ignored-words = ["^.{{1,2}}$"]

[output]
result-path = "{}"
"#,
        address(&site, "index.html"),
        result_path.display()
    );

    let config = parse_config(&config_content).expect("Config should be valid");
    let settings = CrawlSettings::from_config(&config.crawler, 4).unwrap();
    let ignored_words = PatternSet::new(&config.crawler.ignored_words).unwrap();
    let parser = HtmlPageParser::new(ignored_words).unwrap();
    let engine = CrawlerEngine::new(settings, Arc::new(parser), Arc::new(SystemClock)).unwrap();

    let result = engine.crawl(&config.crawler.starting_urls).unwrap();
    let path = config.output.result_path.as_deref().map(Path::new);
    write_result(&result, path).unwrap();

    let written = std::fs::read_to_string(&result_path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&written).unwrap();

    assert_eq!(value["urlsVisited"], 4);
    let words = value["wordCounts"].as_object().unwrap();
    assert_eq!(words.len(), 2);
    assert_eq!(words["crawler"], 4);
    assert_eq!(words["words"], 3);
    assert!(!words.contains_key("on"));
}

#[tokio::test]
async fn test_async_crawl_of_local_site() {
    let site = diamond_site();
    let engine = engine(create_test_settings());

    let result = engine
        .crawl_async(&[address(&site, "index.html")])
        .await
        .expect("Crawl failed");

    assert_eq!(result.urls_visited, 4);
    assert_eq!(result.word_counts[0], ("crawler".to_string(), 4));
}

#[tokio::test]
async fn test_http_page_parser() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(
                    r#"<html><head><title>Home</title></head><body>
                    <p>Served over HTTP, served well.</p>
                    <a href="/page1">Page 1</a>
                    <a href="mailto:someone@example.com">mail</a>
                    </body></html>"#,
                )
                .insert_header("content-type", "text/html"),
        )
        .mount(&mock_server)
        .await;

    let parser = HtmlPageParser::new(PatternSet::default()).unwrap();
    let page = parser
        .parse(&format!("{}/", base_url))
        .await
        .expect("Parse failed");

    assert_eq!(page.word_counts.get("served"), Some(&2));
    assert_eq!(page.word_counts.get("http"), Some(&1));
    assert!(!page.word_counts.contains_key("home"));
    assert_eq!(page.links, vec![format!("{}/page1", base_url)]);
}

#[tokio::test]
async fn test_http_error_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let parser = HtmlPageParser::new(PatternSet::default()).unwrap();
    let result = parser
        .parse(&format!("{}/missing", mock_server.uri()))
        .await;

    assert!(matches!(result, Err(ParseError::Status { status: 404, .. })));
}
