//! Storage module for memoizing crawl results
//!
//! This module handles persistence of finished crawls, including:
//! - SQLite database initialization and schema management
//! - Lookup and insertion of link sets keyed by `(uri, depth)`
//! - Counters for the statistics view

mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqliteStore;
pub use traits::{CrawlStore, StorageError, StorageResult};

use std::path::Path;

/// Opens the configured store, or an in-memory one when `ephemeral` is set
///
/// # Arguments
///
/// * `path` - Path to the SQLite database file
/// * `ephemeral` - Ignore `path` and keep results in memory only
///
/// # Returns
///
/// * `Ok(SqliteStore)` - Successfully initialized storage
/// * `Err(StorageError)` - Failed to initialize storage
pub fn open_store(path: &Path, ephemeral: bool) -> StorageResult<SqliteStore> {
    if ephemeral {
        tracing::debug!("Using in-memory crawl store");
        SqliteStore::new_in_memory()
    } else {
        tracing::debug!("Opening crawl store at {}", path.display());
        SqliteStore::new(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_ephemeral_ignores_path() {
        let store = open_store(Path::new("/nonexistent/dir/crawl.db"), true).unwrap();
        assert_eq!(store.count_results().unwrap(), 0);
    }

    #[test]
    fn test_open_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crawl.db");
        let store = open_store(&path, false).unwrap();
        store.insert("https://example.com", 1, &[]).unwrap();
        assert!(path.exists());
    }
}
