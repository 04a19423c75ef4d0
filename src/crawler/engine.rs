//! Crawl engine - main crawl orchestration logic
//!
//! This module contains the loop that coordinates one crawl invocation:
//! - Checking the crawl store for a memoized result
//! - Dispatching the root address and every newly discovered one
//! - Consuming completion events until the work budget is spent
//! - Persisting the aggregated link set
//!
//! The `depth` budget counts consumed completion events, not link distance
//! from the root.

use crate::crawler::dispatcher::{Completions, Dispatcher};
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::frontier::FrontierTracker;
use crate::crawler::request::CrawlRequest;
use crate::observer::CrawlObserver;
use crate::storage::{CrawlStore, StorageResult};
use crate::CrawlError;
use std::sync::Arc;
use std::time::Instant;

/// Bounded, memoizing crawler over a page fetcher and a crawl store
#[derive(Clone)]
pub struct CrawlEngine {
    fetcher: Arc<dyn PageFetcher>,
    store: Arc<dyn CrawlStore>,
    observer: Arc<dyn CrawlObserver>,
}

impl CrawlEngine {
    /// Creates a new engine from its collaborators
    ///
    /// # Arguments
    ///
    /// * `fetcher` - Turns addresses into documents
    /// * `store` - Memoizes finished crawls
    /// * `observer` - Receives instrumentation events
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        store: Arc<dyn CrawlStore>,
        observer: Arc<dyn CrawlObserver>,
    ) -> Self {
        Self {
            fetcher,
            store,
            observer,
        }
    }

    /// Crawls a validated request
    pub async fn crawl_request(&self, request: &CrawlRequest) -> Result<Vec<String>, CrawlError> {
        self.crawl(request.uri(), request.depth()).await
    }

    /// Crawls `root`, consuming at most `depth` completion events
    ///
    /// Expects a non-empty `root` and `depth >= 1`; see [`CrawlRequest`] for
    /// validation.
    ///
    /// # Returns
    ///
    /// * `Ok(links)` - Every newly discovered address, in completion order
    /// * `Err(CrawlError::Fetch)` - The first failing fetch; no partial links
    pub async fn crawl(&self, root: &str, depth: u32) -> Result<Vec<String>, CrawlError> {
        let started = Instant::now();

        let result = self.run(root, depth).await;
        if let Err(e) = &result {
            tracing::warn!("Crawl of {} (depth {}) failed: {}", root, depth, e);
            self.observer.crawl_failed();
        }

        self.observer.crawl_finished(started.elapsed());
        result
    }

    async fn run(&self, root: &str, depth: u32) -> Result<Vec<String>, CrawlError> {
        match self.find_cached(root, depth).await {
            Ok(links) if !links.is_empty() => {
                tracing::debug!("Cache hit for {} (depth {}): {} links", root, depth, links.len());
                return Ok(links);
            }
            Ok(_) => tracing::debug!("Cache miss for {} (depth {})", root, depth),
            Err(e) => tracing::debug!("Cache lookup for {} failed, crawling: {}", root, e),
        }

        tracing::info!("Crawling {} with budget {}", root, depth);

        let frontier = FrontierTracker::new();
        let (mut dispatcher, completions) = Dispatcher::new(Arc::clone(&self.fetcher));

        frontier.try_mark(root);
        dispatcher.dispatch(root.to_string());

        let links = self
            .aggregate(depth, &frontier, &mut dispatcher, completions)
            .await?;

        tracing::info!(
            "Crawl of {} finished: {} links, {} fetches dispatched",
            root,
            links.len(),
            dispatcher.dispatched()
        );

        if let Err(e) = self.store_result(root, depth, links.clone()).await {
            tracing::warn!("Failed to store crawl result for {}: {}", root, e);
        }

        Ok(links)
    }

    /// Runs the blocking store lookup off the runtime threads
    async fn find_cached(&self, root: &str, depth: u32) -> StorageResult<Vec<String>> {
        let store = Arc::clone(&self.store);
        let uri = root.to_string();
        tokio::task::spawn_blocking(move || store.find(&uri, depth)).await?
    }

    /// Runs the blocking store insert off the runtime threads
    async fn store_result(&self, root: &str, depth: u32, links: Vec<String>) -> StorageResult<()> {
        let store = Arc::clone(&self.store);
        let uri = root.to_string();
        tokio::task::spawn_blocking(move || store.insert(&uri, depth, &links)).await?
    }

    /// Consumes completion events until the budget is spent, a page yields no
    /// links, or nothing is left in flight
    ///
    /// The completion queue is dropped on return, so tasks still running
    /// discard their outcomes instead of waiting on a consumer.
    async fn aggregate(
        &self,
        depth: u32,
        frontier: &FrontierTracker,
        dispatcher: &mut Dispatcher,
        mut completions: Completions,
    ) -> Result<Vec<String>, CrawlError> {
        let mut links = Vec::new();
        let mut consumed = 0usize;

        for _ in 0..depth {
            if consumed == dispatcher.dispatched() {
                tracing::debug!("Frontier exhausted after {} pages", consumed);
                break;
            }

            let Some(outcome) = completions.recv().await else {
                break;
            };
            consumed += 1;

            let discovered = outcome.links?;
            if discovered.is_empty() {
                tracing::debug!("{} yielded no links, stopping", outcome.address);
                break;
            }

            for address in discovered {
                if frontier.try_mark(&address) {
                    self.observer.link_discovered();
                    dispatcher.dispatch(address.clone());
                    links.push(address);
                }
            }
        }

        Ok(links)
    }
}
