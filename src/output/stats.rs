//! Statistics printing
//!
//! Renders observer counters and store counts for the command line.

use crate::observer::stats::CrawlStatistics;
use crate::storage::{SqliteStore, StorageResult};

/// Formats session statistics as an indented block
pub fn format_statistics(stats: &CrawlStatistics) -> String {
    let mut out = String::new();
    out.push_str("=== Crawl Statistics ===\n\n");
    out.push_str(&format!("  Crawls: {}\n", stats.crawls));
    out.push_str(&format!("  Failed crawls: {}\n", stats.failed_crawls));
    out.push_str(&format!("  Links discovered: {}\n", stats.links_discovered));
    out.push_str(&format!(
        "  Total time: {:.3}s\n",
        stats.total_duration.as_secs_f64()
    ));
    out.push_str(&format!(
        "  Average time per crawl: {:.3}s\n",
        stats.average_duration().as_secs_f64()
    ));
    out
}

/// Prints session statistics to stdout
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &CrawlStatistics) {
    print!("{}", format_statistics(stats));
}

/// Prints how much the store holds
///
/// # Arguments
///
/// * `store` - The store to query
///
/// # Returns
///
/// * `Ok(())` - Counts printed
/// * `Err(StorageError)` - Failed to query the store
pub fn print_store_statistics(store: &SqliteStore) -> StorageResult<()> {
    let results = store.count_results()?;
    let links = store.count_links()?;

    println!("=== Store Statistics ===\n");
    println!("  Memoized crawls: {}", results);
    println!("  Stored links: {}", links);
    if results > 0 {
        println!(
            "  Average links per crawl: {:.1}",
            links as f64 / results as f64
        );
    }

    Ok(())
}
