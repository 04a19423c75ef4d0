//! Fetch dispatch
//!
//! Every dispatched address becomes its own tokio task that fetches the page,
//! extracts its links and publishes a [`FetchOutcome`] on the completion
//! queue. The queue is unbounded so publishing never waits on the consumer;
//! once the consumer is gone, late outcomes are dropped and the task exits.

use crate::crawler::extractor::extract_links;
use crate::crawler::fetcher::{FetchError, PageFetcher};
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Result of one fetch-and-extract task
#[derive(Debug)]
pub struct FetchOutcome {
    /// The address that was fetched
    pub address: String,

    /// Links extracted from the page, or the reason it could not be fetched
    pub links: Result<Vec<String>, FetchError>,
}

/// Receiving end of the completion queue
pub type Completions = UnboundedReceiver<FetchOutcome>;

/// Spawns fetch tasks and counts how many were launched
pub struct Dispatcher {
    fetcher: Arc<dyn PageFetcher>,
    completions: UnboundedSender<FetchOutcome>,
    dispatched: usize,
}

impl Dispatcher {
    /// Creates a dispatcher and the queue its tasks report to
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> (Self, Completions) {
        let (completions, receiver) = mpsc::unbounded_channel();
        let dispatcher = Self {
            fetcher,
            completions,
            dispatched: 0,
        };
        (dispatcher, receiver)
    }

    /// Launches a fetch task for `address`
    ///
    /// Must be called from within a tokio runtime.
    pub fn dispatch(&mut self, address: String) {
        let fetcher = Arc::clone(&self.fetcher);
        let completions = self.completions.clone();
        self.dispatched += 1;

        tokio::spawn(async move {
            tracing::debug!("Fetching {}", address);
            let links = fetcher
                .get_document(&address)
                .await
                .map(|document| extract_links(document.root()));

            if let Err(unsent) = completions.send(FetchOutcome { address, links }) {
                tracing::trace!(
                    "Discarding outcome for {}: crawl already finished",
                    unsent.0.address
                );
            }
        });
    }

    /// Number of tasks launched so far
    pub fn dispatched(&self) -> usize {
        self.dispatched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::document::{Attribute, Document, Node};
    use async_trait::async_trait;

    struct StaticFetcher;

    #[async_trait]
    impl PageFetcher for StaticFetcher {
        async fn get_document(&self, address: &str) -> Result<Document, FetchError> {
            if address.ends_with("/broken") {
                return Err(FetchError::Parse {
                    url: address.to_string(),
                    message: "unexpected error".to_string(),
                });
            }
            Ok(Document::from_root(Node::element(
                "a",
                vec![Attribute::new("href", "https://next.com")],
            )))
        }
    }

    #[tokio::test]
    async fn test_outcome_carries_address_and_links() {
        let (mut dispatcher, mut completions) = Dispatcher::new(Arc::new(StaticFetcher));
        dispatcher.dispatch("https://start.com".to_string());
        assert_eq!(dispatcher.dispatched(), 1);

        let outcome = completions.recv().await.unwrap();
        assert_eq!(outcome.address, "https://start.com");
        assert_eq!(outcome.links.unwrap(), vec!["https://next.com"]);
    }

    #[tokio::test]
    async fn test_outcome_carries_error() {
        let (mut dispatcher, mut completions) = Dispatcher::new(Arc::new(StaticFetcher));
        dispatcher.dispatch("https://start.com/broken".to_string());

        let outcome = completions.recv().await.unwrap();
        assert_eq!(outcome.address, "https://start.com/broken");
        assert!(matches!(outcome.links, Err(FetchError::Parse { .. })));
    }

    #[tokio::test]
    async fn test_dispatch_after_consumer_dropped_does_not_block() {
        let (mut dispatcher, completions) = Dispatcher::new(Arc::new(StaticFetcher));
        drop(completions);

        for i in 0..10 {
            dispatcher.dispatch(format!("https://start.com/{}", i));
        }
        assert_eq!(dispatcher.dispatched(), 10);

        // Give the detached tasks a chance to run and discard their outcomes
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        assert!(dispatcher.completions.is_closed());
    }
}
