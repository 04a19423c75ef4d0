//! Markdown summary generation
//!
//! This module generates a human-readable markdown report of a crawl,
//! listing the harvested links grouped by host along with session counters.

use crate::output::CrawlSummary;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes a markdown summary to `output_path`
///
/// # Arguments
///
/// * `summary` - The crawl summary data
/// * `output_path` - Path where the markdown file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote markdown summary
/// * `Err(io::Error)` - Failed to write summary
pub fn generate_markdown_summary(summary: &CrawlSummary, output_path: &Path) -> std::io::Result<()> {
    let markdown = format_markdown_summary(summary);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a crawl summary as markdown
pub fn format_markdown_summary(summary: &CrawlSummary) -> String {
    let mut md = String::new();

    md.push_str("# Page-Crawler Summary\n\n");

    md.push_str("## Request\n\n");
    md.push_str(&format!("- **URI**: {}\n", summary.uri));
    md.push_str(&format!("- **Depth**: {}\n", summary.depth));
    md.push_str(&format!("- **Generated**: {}\n\n", summary.generated_at));

    let stats = &summary.statistics;
    md.push_str("## Statistics\n\n");
    md.push_str(&format!("- **Links Harvested**: {}\n", summary.links.len()));
    md.push_str(&format!("- **Unique Hosts**: {}\n", summary.unique_hosts()));
    md.push_str(&format!(
        "- **Links Discovered**: {}\n",
        stats.links_discovered
    ));
    md.push_str(&format!("- **Crawls**: {}\n", stats.crawls));
    md.push_str(&format!("- **Failed Crawls**: {}\n", stats.failed_crawls));
    md.push_str(&format!(
        "- **Duration**: {:.3} seconds\n\n",
        stats.total_duration.as_secs_f64()
    ));

    md.push_str("## Links\n\n");
    if summary.links.is_empty() {
        md.push_str("No links were harvested.\n");
        return md;
    }

    // Grouped by host; links whose host cannot be read go under "other"
    let mut by_host: BTreeMap<String, Vec<&str>> = BTreeMap::new();
    for link in &summary.links {
        let host = url::Url::parse(link)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .unwrap_or_else(|| "other".to_string());
        by_host.entry(host).or_default().push(link);
    }

    md.push_str("| Host | Links |\n");
    md.push_str("|------|-------|\n");
    for (host, links) in &by_host {
        md.push_str(&format!("| {} | {} |\n", host, links.len()));
    }
    md.push('\n');

    for (host, links) in &by_host {
        md.push_str(&format!("### {}\n\n", host));
        for link in links {
            md.push_str(&format!("- {}\n", link));
        }
        md.push('\n');
    }

    md
}
