//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with proper user agent strings
//! - GET requests to fetch page content
//! - Error classification into [`FetchError`]

use crate::config::UserAgentConfig;
use crate::url::Address;
use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client};
use std::time::Duration;
use thiserror::Error;

/// Per-address fetch failure
///
/// Fetch failures never abort a crawl; the address is simply skipped.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// Server answered with a non-success status
    #[error("HTTP {status_code}")]
    Http { status_code: u16 },

    /// The request did not complete in time
    #[error("Request timeout")]
    Timeout,

    /// The connection could not be established
    #[error("Connection failed: {0}")]
    Connect(String),

    /// The response is not an HTML document
    #[error("Expected HTML, got {content_type}")]
    ContentMismatch { content_type: String },

    /// The response body could not be read
    #[error("Failed to read body: {0}")]
    Body(String),

    /// Any other transport error
    #[error("Network error: {0}")]
    Network(String),
}

/// Retrieves raw page content for an address
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches the content at `address`
    ///
    /// All failures surface as a [`FetchError`]; implementations must not panic.
    async fn fetch(&self, address: &Address) -> Result<String, FetchError>;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
/// * `timeout` - Per-request timeout
///
/// # Example
///
/// ```no_run
/// use focused_crawler::config::UserAgentConfig;
/// use focused_crawler::crawler::build_http_client;
/// use std::time::Duration;
///
/// let config = UserAgentConfig::default();
/// let client = build_http_client(&config, Duration::from_secs(30)).unwrap();
/// ```
pub fn build_http_client(
    config: &UserAgentConfig,
    timeout: Duration,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.header_value())
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetcher backed by a `reqwest` client
///
/// Redirects are followed by the client; the final response must be a
/// 2xx HTML (or untyped) document to count as a success.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher from the user agent configuration
    pub fn new(config: &UserAgentConfig, timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config, timeout)?,
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, address: &Address) -> Result<String, FetchError> {
        let response = self
            .client
            .get(address.as_str())
            .send()
            .await
            .map_err(classify_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                status_code: status.as_u16(),
            });
        }

        if let Some(content_type) = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
        {
            if !is_html_content_type(content_type) {
                return Err(FetchError::ContentMismatch {
                    content_type: content_type.to_string(),
                });
            }
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::Body(e.to_string()))
    }
}

/// Returns true for Content-Type values that carry an HTML document
fn is_html_content_type(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    mime.is_empty() || mime == "text/html" || mime == "application/xhtml+xml"
}

/// Maps a transport error onto the fetch error taxonomy
fn classify_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else if e.is_connect() {
        FetchError::Connect(e.to_string())
    } else {
        FetchError::Network(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        let config = UserAgentConfig::default();
        let client = build_http_client(&config, Duration::from_secs(5));
        assert!(client.is_ok());
    }

    #[test]
    fn test_html_content_types() {
        assert!(is_html_content_type("text/html"));
        assert!(is_html_content_type("text/html; charset=utf-8"));
        assert!(is_html_content_type("TEXT/HTML"));
        assert!(is_html_content_type("application/xhtml+xml"));
    }

    #[test]
    fn test_non_html_content_types() {
        assert!(!is_html_content_type("application/pdf"));
        assert!(!is_html_content_type("image/png"));
        assert!(!is_html_content_type("application/json"));
    }

    #[test]
    fn test_fetch_error_display() {
        assert_eq!(FetchError::Http { status_code: 404 }.to_string(), "HTTP 404");
        assert_eq!(FetchError::Timeout.to_string(), "Request timeout");
        assert_eq!(
            FetchError::ContentMismatch {
                content_type: "image/png".to_string()
            }
            .to_string(),
            "Expected HTML, got image/png"
        );
    }

    // Request/response behaviour is covered with wiremock in the integration tests
}
