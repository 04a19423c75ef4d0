//! Page fetching
//!
//! This module defines the [`PageFetcher`] seam the crawl engine consumes and
//! its HTTP implementation, including:
//! - Building HTTP clients with proper user agent strings and timeouts
//! - GET requests to fetch page content
//! - Parsing HTML bodies into a [`Document`]
//! - Error classification

use crate::config::{CrawlerConfig, UserAgentConfig};
use crate::crawler::document::Document;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// Failure to turn an address into a document
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request for {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to read response body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTML parse error for {url}: {message}")]
    Parse { url: String, message: String },
}

impl FetchError {
    /// The address whose fetch failed
    pub fn url(&self) -> &str {
        match self {
            Self::Request { url, .. } | Self::Body { url, .. } | Self::Parse { url, .. } => url,
        }
    }
}

/// Retrieves an address and parses it into a navigable document
///
/// Implementations carry their own request timeout; the crawl engine imposes
/// none.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn get_document(&self, address: &str) -> Result<Document, FetchError>;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - The user agent configuration
/// * `crawler` - Timeouts for each request
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use page_crawler::config::{CrawlerConfig, UserAgentConfig};
/// use page_crawler::crawler::build_http_client;
///
/// let user_agent = UserAgentConfig {
///     crawler_name: "PageCrawler".to_string(),
///     crawler_version: "1.0".to_string(),
///     contact_url: "https://example.com/about".to_string(),
///     contact_email: "admin@example.com".to_string(),
/// };
///
/// let client = build_http_client(&user_agent, &CrawlerConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    crawler: &CrawlerConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(Duration::from_secs(crawler.request_timeout))
        .connect_timeout(Duration::from_secs(crawler.connect_timeout))
        .gzip(true)
        .brotli(true)
        .build()
}

/// [`PageFetcher`] backed by a `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpPageFetcher {
    client: Client,
}

impl HttpPageFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds the client from configuration and wraps it
    pub fn from_config(
        user_agent: &UserAgentConfig,
        crawler: &CrawlerConfig,
    ) -> Result<Self, reqwest::Error> {
        build_http_client(user_agent, crawler).map(Self::new)
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    /// Fetches `address` and parses the body
    ///
    /// The status code is not treated as failure: an error page is still a
    /// page, and its links are still links. Bodies declared as something other
    /// than HTML produce an empty document.
    async fn get_document(&self, address: &str) -> Result<Document, FetchError> {
        let response = self
            .client
            .get(address)
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: address.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!("{} answered with HTTP {}", address, status.as_u16());
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        if let Some(content_type) = content_type.as_deref() {
            if !is_html(content_type) {
                tracing::debug!("Skipping non-HTML content at {}: {}", address, content_type);
                return Ok(Document::empty());
            }
        }

        let body = response.text().await.map_err(|source| FetchError::Body {
            url: address.to_string(),
            source,
        })?;

        Ok(Document::parse_html(&body))
    }
}

fn is_html(content_type: &str) -> bool {
    let content_type = content_type.to_ascii_lowercase();
    content_type.contains("text/html") || content_type.contains("application/xhtml+xml")
}
