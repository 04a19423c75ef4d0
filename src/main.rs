//! Page-Crawler main entry point
//!
//! This is the command-line interface for the Page-Crawler link harvester.

use clap::Parser;
use page_crawler::config::{load_config, Config};
use page_crawler::crawler::{build_engine, CrawlRequest};
use page_crawler::observer::{FanoutObserver, MetricsObserver, StatsObserver};
use page_crawler::output::{
    generate_markdown_summary, print_links, print_statistics, print_store_statistics, CrawlSummary,
};
use page_crawler::storage::open_store;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Page-Crawler: a bounded, concurrent link harvester
///
/// Page-Crawler fetches a page, follows the absolute links it finds
/// concurrently until the depth budget is spent, and prints every link it
/// harvested. Results are memoized per (URI, depth) in a SQLite store.
#[derive(Parser, Debug)]
#[command(name = "page-crawler")]
#[command(version = "1.0.0")]
#[command(about = "A bounded, concurrent link harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Root address to crawl
    #[arg(long, required_unless_present_any = ["dry_run", "stats"])]
    uri: Option<String>,

    /// Work budget: number of fetch completions to consume
    #[arg(long, required_unless_present_any = ["dry_run", "stats"])]
    depth: Option<u32>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show the request without crawling
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Show store statistics and exit
    #[arg(long, conflicts_with = "dry_run")]
    stats: bool,

    /// Keep results in memory instead of the configured database
    #[arg(long)]
    ephemeral: bool,

    /// Write a markdown summary of the crawl to this path
    #[arg(long, value_name = "PATH")]
    summary: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = match load_config(&cli.config) {
        Ok(cfg) => {
            tracing::info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if cli.dry_run {
        handle_dry_run(&config, &cli)?;
    } else if cli.stats {
        handle_stats(&config, cli.ephemeral)?;
    } else {
        handle_crawl(&config, &cli).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("page_crawler=info,warn"),
            1 => EnvFilter::new("page_crawler=debug,info"),
            2 => EnvFilter::new("page_crawler=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Validates the request from the command line
fn parse_request(cli: &Cli) -> Result<CrawlRequest, page_crawler::RequestError> {
    CrawlRequest::new(cli.uri.clone().unwrap_or_default(), cli.depth.unwrap_or(0))
}

/// Handles the --dry-run mode: shows resolved configuration and request
fn handle_dry_run(config: &Config, cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Page-Crawler Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Request timeout: {}s", config.crawler.request_timeout);
    println!("  Connect timeout: {}s", config.crawler.connect_timeout);

    println!("\nUser Agent:");
    println!("  Header: {}", config.user_agent.header_value());

    println!("\nStorage:");
    if cli.ephemeral {
        println!("  Database: in-memory");
    } else {
        println!("  Database: {}", config.storage.database_path);
    }

    println!("\n✓ Configuration is valid");

    if cli.uri.is_some() || cli.depth.is_some() {
        let request = parse_request(cli)?;
        println!(
            "✓ Would crawl {} with depth {}",
            request.uri(),
            request.depth()
        );
    }

    Ok(())
}

/// Handles the --stats mode: shows how much the store holds
fn handle_stats(config: &Config, ephemeral: bool) -> Result<(), Box<dyn std::error::Error>> {
    let path = Path::new(&config.storage.database_path);
    if !ephemeral {
        println!("Database: {}\n", path.display());
    }

    let store = open_store(path, ephemeral)?;
    print_store_statistics(&store)?;

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config, cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let request = match parse_request(cli) {
        Ok(request) => request,
        Err(e) => {
            tracing::error!("Invalid request: {}", e);
            return Err(e.into());
        }
    };

    let store = Arc::new(open_store(
        Path::new(&config.storage.database_path),
        cli.ephemeral,
    )?);

    MetricsObserver::describe();
    let stats = Arc::new(StatsObserver::new());
    let observer = FanoutObserver::new()
        .with(stats.clone())
        .with(Arc::new(MetricsObserver));

    let engine = build_engine(config, store, Arc::new(observer))?;

    tracing::info!(
        "Starting crawl of {} with depth {}",
        request.uri(),
        request.depth()
    );

    let links = match engine.crawl_request(&request).await {
        Ok(links) => links,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    print_links(&links);

    let snapshot = stats.snapshot();
    if !cli.quiet {
        println!();
        print_statistics(&snapshot);
    }

    if let Some(path) = &cli.summary {
        let summary = CrawlSummary::new(request.uri(), request.depth(), links, snapshot);
        generate_markdown_summary(&summary, path)?;
        println!("\n✓ Summary written to: {}", path.display());
    }

    Ok(())
}
