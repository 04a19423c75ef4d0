//! Frontier tracking for a single crawl invocation
//!
//! Records every address that has been handed to the dispatcher. Once marked,
//! an address is never dispatched again within the same crawl, which keeps
//! cyclic link graphs from turning into fetch storms.

use dashmap::DashSet;

/// Concurrency-safe set of dispatched addresses
#[derive(Debug, Default)]
pub struct FrontierTracker {
    seen: DashSet<String>,
}

impl FrontierTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically marks `address` as dispatched
    ///
    /// Returns `true` when the address was not seen before and the caller
    /// must dispatch it, `false` when it has to be skipped.
    pub fn try_mark(&self, address: &str) -> bool {
        if self.seen.contains(address) {
            return false;
        }
        self.seen.insert(address.to_string())
    }

    /// Number of addresses marked so far
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
