//! Output module for reporting crawl results
//!
//! This module handles:
//! - Printing harvested links and session statistics to stdout
//! - Generating markdown summaries of a crawl

mod markdown;
pub mod stats;

pub use markdown::{format_markdown_summary, generate_markdown_summary};
pub use stats::{format_statistics, print_statistics, print_store_statistics};

use crate::observer::stats::CrawlStatistics;

/// Message shown when a crawl harvested nothing
pub const NO_RESULTS_MESSAGE: &str = "The process did not return any valid results";

/// Everything needed to write a report about one crawl
#[derive(Debug, Clone)]
pub struct CrawlSummary {
    /// Root address the crawl started from
    pub uri: String,

    /// Requested depth budget
    pub depth: u32,

    /// Links harvested, in discovery order
    pub links: Vec<String>,

    /// When the report was produced (RFC 3339)
    pub generated_at: String,

    /// Observer counters for the session
    pub statistics: CrawlStatistics,
}

impl CrawlSummary {
    /// Creates a summary stamped with the current time
    pub fn new(
        uri: impl Into<String>,
        depth: u32,
        links: Vec<String>,
        statistics: CrawlStatistics,
    ) -> Self {
        Self {
            uri: uri.into(),
            depth,
            links,
            generated_at: chrono::Utc::now().to_rfc3339(),
            statistics,
        }
    }

    /// Number of distinct hosts among the harvested links
    pub fn unique_hosts(&self) -> usize {
        let mut hosts: Vec<String> = self
            .links
            .iter()
            .filter_map(|link| url::Url::parse(link).ok())
            .filter_map(|url| url.host_str().map(str::to_string))
            .collect();
        hosts.sort();
        hosts.dedup();
        hosts.len()
    }
}

/// Formats links one per line, or the no-results message
pub fn format_links(links: &[String]) -> String {
    if links.is_empty() {
        return NO_RESULTS_MESSAGE.to_string();
    }
    links.join("\n")
}

/// Prints harvested links to stdout
pub fn print_links(links: &[String]) {
    println!("{}", format_links(links));
}
