//! Database schema definitions
//!
//! This module contains all SQL schema definitions for the crawl store.

use rusqlite::Connection;

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
-- One row per memoized crawl
CREATE TABLE IF NOT EXISTS crawl_results (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    uri TEXT NOT NULL,
    depth INTEGER NOT NULL,
    crawled_at TEXT NOT NULL,
    UNIQUE(uri, depth)
);

CREATE INDEX IF NOT EXISTS idx_crawl_results_uri ON crawl_results(uri);

-- Links of a crawl result in discovery order
CREATE TABLE IF NOT EXISTS result_links (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    result_id INTEGER NOT NULL REFERENCES crawl_results(id) ON DELETE CASCADE,
    position INTEGER NOT NULL,
    url TEXT NOT NULL,
    UNIQUE(result_id, position)
);

CREATE INDEX IF NOT EXISTS idx_result_links_result ON result_links(result_id);
"#;

/// Initializes the database schema
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Returns
///
/// * `Ok(())` - Schema created (or already present)
/// * `Err(rusqlite::Error)` - Failed to execute the schema
pub fn initialize_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_SQL)
}
