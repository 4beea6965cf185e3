//! Page fetcher implementation
//!
//! This module loads the raw content behind an address:
//! - `http` and `https` addresses via a shared `reqwest` client
//! - `file` addresses straight from disk
//!
//! Failures are returned as [`ParseError`] for the caller to classify.

use crate::ParseError;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// User agent sent with every HTTP request
const USER_AGENT: &str = concat!("wordcrawl/", env!("CARGO_PKG_VERSION"));

/// Builds an HTTP client with proper configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches the body behind `address`
///
/// # Arguments
///
/// * `client` - The HTTP client to use for `http`/`https` addresses
/// * `address` - The absolute address to load
///
/// # Returns
///
/// * `Ok((Url, String))` - The parsed address and its body
/// * `Err(ParseError)` - The address could not be loaded
pub async fn fetch_body(client: &Client, address: &str) -> Result<(Url, String), ParseError> {
    let url = Url::parse(address).map_err(|source| ParseError::InvalidUrl {
        url: address.to_string(),
        source,
    })?;

    let body = match url.scheme() {
        "http" | "https" => fetch_http(client, &url).await?,
        "file" => fetch_file(&url).await?,
        other => return Err(ParseError::UnsupportedScheme(other.to_string())),
    };

    Ok((url, body))
}

async fn fetch_http(client: &Client, url: &Url) -> Result<String, ParseError> {
    let http_error = |source| ParseError::Http {
        url: url.to_string(),
        source,
    };

    let response = client.get(url.clone()).send().await.map_err(http_error)?;

    let status = response.status();
    if !status.is_success() {
        return Err(ParseError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(http_error)
}

async fn fetch_file(url: &Url) -> Result<String, ParseError> {
    let io_error = |source| ParseError::Io {
        url: url.to_string(),
        source,
    };

    let path = url.to_file_path().map_err(|_| {
        io_error(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "not a local file path",
        ))
    })?;

    tokio::fs::read_to_string(&path).await.map_err(io_error)
}
