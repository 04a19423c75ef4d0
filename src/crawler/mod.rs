//! Crawler module for bounded, concurrent link harvesting
//!
//! This module contains the core crawling logic, including:
//! - Document trees and link extraction
//! - Frontier tracking so each address is fetched once per crawl
//! - Concurrent fetch dispatch over a completion queue
//! - The crawl engine tying these to a memoizing store

mod dispatcher;
mod document;
mod engine;
mod extractor;
mod fetcher;
mod frontier;
mod request;

pub use dispatcher::{Completions, Dispatcher, FetchOutcome};
pub use document::{Attribute, Document, Node, NodeKind};
pub use engine::CrawlEngine;
pub use extractor::{collect_links, extract_links, is_absolute_link};
pub use fetcher::{build_http_client, FetchError, HttpPageFetcher, PageFetcher};
pub use frontier::FrontierTracker;
pub use request::CrawlRequest;

use crate::config::Config;
use crate::observer::CrawlObserver;
use crate::storage::CrawlStore;
use crate::CrawlError;
use std::sync::Arc;

/// Builds an engine with the HTTP page fetcher described by `config`
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `store` - Where finished crawls are memoized
/// * `observer` - Receives instrumentation events
///
/// # Returns
///
/// * `Ok(CrawlEngine)` - Ready to crawl
/// * `Err(CrawlError)` - The HTTP client could not be built
pub fn build_engine(
    config: &Config,
    store: Arc<dyn CrawlStore>,
    observer: Arc<dyn CrawlObserver>,
) -> Result<CrawlEngine, CrawlError> {
    let fetcher = HttpPageFetcher::from_config(&config.user_agent, &config.crawler)?;
    Ok(CrawlEngine::new(Arc::new(fetcher), store, observer))
}
