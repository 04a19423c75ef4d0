//! Storage traits and error types
//!
//! This module defines the trait interface for crawl result stores and
//! associated error types.

use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Storage lock poisoned")]
    LockPoisoned,

    #[error("Storage task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Memoization store for crawl results keyed by `(uri, depth)`
///
/// Implementations must be safe to share between concurrent crawls.
pub trait CrawlStore: Send + Sync {
    /// Looks up the link set recorded for `uri` crawled with `depth`
    ///
    /// # Returns
    ///
    /// The stored links in discovery order; an empty vector when nothing
    /// has been recorded.
    fn find(&self, uri: &str, depth: u32) -> StorageResult<Vec<String>>;

    /// Records the link set for `uri` crawled with `depth`
    ///
    /// Replaces any result previously stored under the same key.
    fn insert(&self, uri: &str, depth: u32, links: &[String]) -> StorageResult<()>;
}
