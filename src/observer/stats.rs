//! In-process crawl statistics
//!
//! Accumulates engine events in atomic counters so a front-end can report
//! what a session did without an external metrics backend.

use crate::observer::CrawlObserver;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Snapshot of the counters held by a [`StatsObserver`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlStatistics {
    /// Crawl calls that returned
    pub crawls: u64,

    /// Crawl calls aborted by a fetch failure
    pub failed_crawls: u64,

    /// Addresses dispatched for fetching
    pub links_discovered: u64,

    /// Summed wall-clock time of all crawl calls
    pub total_duration: Duration,
}

impl CrawlStatistics {
    /// Mean duration of one crawl call
    pub fn average_duration(&self) -> Duration {
        if self.crawls == 0 {
            return Duration::ZERO;
        }
        self.total_duration / self.crawls as u32
    }
}

/// Observer that counts engine events
#[derive(Debug, Default)]
pub struct StatsObserver {
    crawls: AtomicU64,
    failed_crawls: AtomicU64,
    links_discovered: AtomicU64,
    total_micros: AtomicU64,
}

impl StatsObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the current counter values
    pub fn snapshot(&self) -> CrawlStatistics {
        CrawlStatistics {
            crawls: self.crawls.load(Ordering::Relaxed),
            failed_crawls: self.failed_crawls.load(Ordering::Relaxed),
            links_discovered: self.links_discovered.load(Ordering::Relaxed),
            total_duration: Duration::from_micros(self.total_micros.load(Ordering::Relaxed)),
        }
    }
}

impl CrawlObserver for StatsObserver {
    fn link_discovered(&self) {
        self.links_discovered.fetch_add(1, Ordering::Relaxed);
    }

    fn crawl_failed(&self) {
        self.failed_crawls.fetch_add(1, Ordering::Relaxed);
    }

    fn crawl_finished(&self, elapsed: Duration) {
        self.crawls.fetch_add(1, Ordering::Relaxed);
        let micros = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX);
        self.total_micros.fetch_add(micros, Ordering::Relaxed);
    }
}
