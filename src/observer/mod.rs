//! Instrumentation sinks for the crawl engine
//!
//! The engine reports three fire-and-forget events through a [`CrawlObserver`]
//! injected at construction:
//! - a newly dispatched link
//! - an aborted crawl
//! - the wall-clock duration of one crawl call
//!
//! None of them influence control flow.

pub mod stats;

pub use stats::{CrawlStatistics, StatsObserver};

use std::sync::Arc;
use std::time::Duration;

/// Counter name for newly dispatched links
pub const LINKS_COUNTER: &str = "crawler_links_count_total";

/// Counter name for aborted crawls
pub const LINKS_ERROR_COUNTER: &str = "crawler_links_error_count_total";

/// Histogram name for crawl durations (seconds)
pub const CRAWL_DURATION_HISTOGRAM: &str = "crawler_delta_time_to_process_links";

/// Receives instrumentation events from the crawl engine
pub trait CrawlObserver: Send + Sync {
    /// A new address was dispatched for fetching
    fn link_discovered(&self);

    /// A crawl was aborted by a fetch failure
    fn crawl_failed(&self);

    /// A crawl call returned, successfully or not
    fn crawl_finished(&self, elapsed: Duration);
}

/// Observer that ignores every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl CrawlObserver for NoopObserver {
    fn link_discovered(&self) {}

    fn crawl_failed(&self) {}

    fn crawl_finished(&self, _elapsed: Duration) {}
}

/// Observer forwarding events to the `metrics` facade
///
/// Events are recorded against whatever recorder the embedding process has
/// installed; without one they are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsObserver;

impl MetricsObserver {
    /// Registers descriptions for the emitted metrics with the current recorder
    pub fn describe() {
        metrics::describe_counter!(LINKS_COUNTER, "Count of links returned");
        metrics::describe_counter!(LINKS_ERROR_COUNTER, "Count of links returned in error");
        metrics::describe_histogram!(
            CRAWL_DURATION_HISTOGRAM,
            metrics::Unit::Seconds,
            "Delta time to process links"
        );
    }
}

impl CrawlObserver for MetricsObserver {
    fn link_discovered(&self) {
        metrics::counter!(LINKS_COUNTER).increment(1);
    }

    fn crawl_failed(&self) {
        metrics::counter!(LINKS_ERROR_COUNTER).increment(1);
    }

    fn crawl_finished(&self, elapsed: Duration) {
        metrics::histogram!(CRAWL_DURATION_HISTOGRAM).record(elapsed.as_secs_f64());
    }
}

/// Observer that forwards every event to each inner observer in order
#[derive(Clone, Default)]
pub struct FanoutObserver {
    observers: Vec<Arc<dyn CrawlObserver>>,
}

impl FanoutObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an observer to the end of the list
    pub fn with(mut self, observer: Arc<dyn CrawlObserver>) -> Self {
        self.observers.push(observer);
        self
    }
}

impl CrawlObserver for FanoutObserver {
    fn link_discovered(&self) {
        self.observers.iter().for_each(|o| o.link_discovered());
    }

    fn crawl_failed(&self) {
        self.observers.iter().for_each(|o| o.crawl_failed());
    }

    fn crawl_finished(&self, elapsed: Duration) {
        self.observers
            .iter()
            .for_each(|o| o.crawl_finished(elapsed));
    }
}
