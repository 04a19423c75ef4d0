//! Page-Crawler: a bounded, concurrent link harvester
//!
//! This crate fetches a web page, extracts its outbound links and follows the
//! newly discovered ones concurrently until a work budget is spent, memoizing
//! the resulting link set per `(uri, depth)` in a crawl store.

pub mod config;
pub mod crawler;
pub mod observer;
pub mod output;
pub mod storage;

use thiserror::Error;

/// Main error type for Page-Crawler operations
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid crawl request: {0}")]
    Request(#[from] RequestError),

    #[error(transparent)]
    Fetch(#[from] crawler::FetchError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors raised while validating a caller's crawl request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("URI param cannot be empty")]
    EmptyUri,

    #[error("depth param cannot be empty")]
    EmptyDepth,
}

/// Result type alias for Page-Crawler operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlEngine, CrawlRequest};
pub use observer::{CrawlObserver, NoopObserver};
pub use storage::{CrawlStore, SqliteStore};
