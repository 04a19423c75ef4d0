//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the CrawlStore trait.

use crate::storage::schema::initialize_schema;
use crate::storage::traits::{CrawlStore, StorageError, StorageResult};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// SQLite crawl store
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Opens (or creates) a store backed by a database file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteStore)` - Successfully opened/created database
    /// * `Err(StorageError)` - Failed to open database
    pub fn new(path: &Path) -> StorageResult<Self> {
        let conn = Connection::open(path)?;

        // Configure SQLite for better performance
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Creates a store that lives only as long as this value
    pub fn new_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> StorageResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StorageError::LockPoisoned)
    }

    /// Counts memoized crawl results
    pub fn count_results(&self) -> StorageResult<u64> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM crawl_results", [], |row| {
            row.get(0)
        })?;
        Ok(count as u64)
    }

    /// Counts links across all memoized results
    pub fn count_links(&self) -> StorageResult<u64> {
        let conn = self.lock()?;
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM result_links", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

impl CrawlStore for SqliteStore {
    fn find(&self, uri: &str, depth: u32) -> StorageResult<Vec<String>> {
        let conn = self.lock()?;

        let result_id: Option<i64> = conn
            .query_row(
                "SELECT id FROM crawl_results WHERE uri = ?1 AND depth = ?2",
                params![uri, depth],
                |row| row.get(0),
            )
            .optional()?;

        let Some(result_id) = result_id else {
            return Ok(Vec::new());
        };

        let mut stmt =
            conn.prepare("SELECT url FROM result_links WHERE result_id = ?1 ORDER BY position")?;
        let links = stmt
            .query_map(params![result_id], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;

        Ok(links)
    }

    fn insert(&self, uri: &str, depth: u32, links: &[String]) -> StorageResult<()> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        // Replacing the row cascades to its links
        tx.execute(
            "DELETE FROM crawl_results WHERE uri = ?1 AND depth = ?2",
            params![uri, depth],
        )?;

        let now = Utc::now().to_rfc3339();
        tx.execute(
            "INSERT INTO crawl_results (uri, depth, crawled_at) VALUES (?1, ?2, ?3)",
            params![uri, depth, now],
        )?;
        let result_id = tx.last_insert_rowid();

        {
            let mut stmt = tx.prepare(
                "INSERT INTO result_links (result_id, position, url) VALUES (?1, ?2, ?3)",
            )?;
            for (position, link) in links.iter().enumerate() {
                stmt.execute(params![result_id, position as i64, link])?;
            }
        }

        tx.commit()?;
        Ok(())
    }
}
