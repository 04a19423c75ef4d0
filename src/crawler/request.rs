//! Caller-facing crawl request validation

use crate::RequestError;

/// A validated `(uri, depth)` pair ready for the crawl engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlRequest {
    uri: String,
    depth: u32,
}

impl CrawlRequest {
    /// Validates the caller's input
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlRequest)` - Non-empty URI and a depth of at least one
    /// * `Err(RequestError::EmptyUri)` - URI is empty or blank
    /// * `Err(RequestError::EmptyDepth)` - Depth is zero
    pub fn new(uri: impl Into<String>, depth: u32) -> Result<Self, RequestError> {
        let uri = uri.into().trim().to_string();
        if uri.is_empty() {
            return Err(RequestError::EmptyUri);
        }
        if depth == 0 {
            return Err(RequestError::EmptyDepth);
        }
        Ok(Self { uri, depth })
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }
}
