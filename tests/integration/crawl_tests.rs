//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and run the full
//! stack (HTTP fetcher, SQLite store, stats observer) end-to-end.

use page_crawler::config::{load_config, Config, CrawlerConfig, StorageConfig, UserAgentConfig};
use page_crawler::crawler::{build_engine, CrawlEngine, CrawlRequest};
use page_crawler::observer::StatsObserver;
use page_crawler::output::{format_links, NO_RESULTS_MESSAGE};
use page_crawler::storage::{CrawlStore, SqliteStore};
use page_crawler::CrawlError;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the given database
fn create_test_config(db_path: &str) -> Config {
    Config {
        crawler: CrawlerConfig {
            request_timeout: 5,
            connect_timeout: 2,
        },
        user_agent: UserAgentConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0.0".to_string(),
            contact_url: "https://example.com/contact".to_string(),
            contact_email: "test@example.com".to_string(),
        },
        storage: StorageConfig {
            database_path: db_path.to_string(),
        },
    }
}

/// Builds an HTML page linking to each of `links`
fn page(links: &[String]) -> String {
    let anchors: String = links
        .iter()
        .map(|link| format!("<a href=\"{}\">{}</a>\n", link, link))
        .collect();
    format!(
        "<html><head><title>Test</title></head><body>\n{}</body></html>",
        anchors
    )
}

/// Serves `body` as HTML at `route`
async fn mount_page(server: &MockServer, route: &str, links: &[String]) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(page(links), "text/html"))
        .mount(server)
        .await;
}

struct Harness {
    engine: CrawlEngine,
    store: Arc<SqliteStore>,
    stats: Arc<StatsObserver>,
}

fn harness() -> Harness {
    let store = Arc::new(SqliteStore::new_in_memory().unwrap());
    let stats = Arc::new(StatsObserver::new());
    let engine = build_engine(
        &create_test_config("unused.db"),
        store.clone(),
        stats.clone(),
    )
    .unwrap();

    Harness {
        engine,
        store,
        stats,
    }
}

#[tokio::test]
async fn test_crawl_returns_root_links() {
    let server = MockServer::start().await;
    let base = server.uri();
    let a = format!("{}/a", base);
    let b = format!("{}/b", base);

    mount_page(&server, "/", &[a.clone(), b.clone()]).await;
    mount_page(&server, "/a", &[]).await;
    mount_page(&server, "/b", &[]).await;

    let h = harness();
    let root = format!("{}/", base);
    let links = h.engine.crawl(&root, 1).await.unwrap();

    assert_eq!(links, vec![a.clone(), b.clone()]);
    assert_eq!(h.store.find(&root, 1).unwrap(), vec![a, b]);

    let stats = h.stats.snapshot();
    assert_eq!(stats.crawls, 1);
    assert_eq!(stats.failed_crawls, 0);
    assert_eq!(stats.links_discovered, 2);
}

#[tokio::test]
async fn test_second_crawl_is_served_from_store() {
    let server = MockServer::start().await;
    let base = server.uri();
    let a = format!("{}/a", base);

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(page(&[a.clone()]), "text/html"))
        .expect(1)
        .mount(&server)
        .await;
    mount_page(&server, "/a", &[]).await;

    let h = harness();
    let root = format!("{}/", base);
    let first = h.engine.crawl(&root, 1).await.unwrap();
    let second = h.engine.crawl(&root, 1).await.unwrap();

    assert_eq!(first, vec![a]);
    assert_eq!(first, second);
    assert_eq!(h.stats.snapshot().crawls, 2);
    assert_eq!(h.store.count_results().unwrap(), 1);
}

#[tokio::test]
async fn test_unreachable_root_fails_without_storing() {
    let h = harness();

    let result = h.engine.crawl("http://127.0.0.1:1/", 2).await;

    assert!(matches!(result, Err(CrawlError::Fetch(_))));
    assert_eq!(h.store.count_results().unwrap(), 0);

    let stats = h.stats.snapshot();
    assert_eq!(stats.failed_crawls, 1);
    assert_eq!(stats.crawls, 1);
}

#[tokio::test]
async fn test_depth_budget_follows_chain() {
    let server = MockServer::start().await;
    let base = server.uri();
    let a = format!("{}/a", base);
    let b = format!("{}/b", base);
    let c = format!("{}/c", base);

    mount_page(&server, "/", &[a.clone()]).await;
    mount_page(&server, "/a", &[b.clone()]).await;
    mount_page(&server, "/b", &[c.clone()]).await;
    mount_page(&server, "/c", &[]).await;

    let h = harness();
    let root = format!("{}/", base);

    assert_eq!(h.engine.crawl(&root, 1).await.unwrap(), vec![a.clone()]);
    assert_eq!(
        h.engine.crawl(&root, 2).await.unwrap(),
        vec![a.clone(), b.clone()]
    );
    assert_eq!(h.engine.crawl(&root, 10).await.unwrap(), vec![a, b, c]);
}

#[tokio::test]
async fn test_cyclic_site_terminates() {
    let server = MockServer::start().await;
    let base = server.uri();
    let root = format!("{}/", base);
    let a = format!("{}/a", base);

    mount_page(&server, "/", &[a.clone()]).await;
    mount_page(&server, "/a", &[root.clone(), a.clone()]).await;

    let h = harness();
    let links = tokio::time::timeout(Duration::from_secs(5), h.engine.crawl(&root, 10))
        .await
        .expect("crawl of a cyclic site should terminate")
        .unwrap();

    assert_eq!(links, vec![a]);
}

#[tokio::test]
async fn test_error_status_page_is_still_parsed() {
    let server = MockServer::start().await;
    let base = server.uri();
    let a = format!("{}/a", base);

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_raw(page(&[a.clone()]), "text/html"))
        .mount(&server)
        .await;
    mount_page(&server, "/a", &[]).await;

    let h = harness();
    let links = h
        .engine
        .crawl(&format!("{}/missing", base), 1)
        .await
        .unwrap();

    assert_eq!(links, vec![a]);
}

#[tokio::test]
async fn test_non_html_root_yields_no_results() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/report.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            b"%PDF-1.4 https://example.com".to_vec(),
            "application/pdf",
        ))
        .mount(&server)
        .await;

    let h = harness();
    let root = format!("{}/report.pdf", server.uri());
    let links = h.engine.crawl(&root, 3).await.unwrap();

    assert!(links.is_empty());
    assert_eq!(format_links(&links), NO_RESULTS_MESSAGE);
    assert_eq!(h.stats.snapshot().links_discovered, 0);
}

#[tokio::test]
async fn test_relative_links_are_ignored() {
    let server = MockServer::start().await;
    let base = server.uri();
    let absolute = format!("{}/abs", base);

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            format!(
                r#"<html><body>
                <a href="/relative">Relative</a>
                <a href="mailto:someone@example.com">Mail</a>
                <a href="{}">Absolute</a>
                </body></html>"#,
                absolute
            ),
            "text/html",
        ))
        .mount(&server)
        .await;
    mount_page(&server, "/abs", &[]).await;

    let h = harness();
    let links = h.engine.crawl(&format!("{}/", base), 1).await.unwrap();

    assert_eq!(links, vec![absolute]);
}

#[tokio::test]
async fn test_crawl_with_config_file_and_database() {
    let server = MockServer::start().await;
    let base = server.uri();
    let a = format!("{}/a", base);
    mount_page(&server, "/", &[a.clone()]).await;
    mount_page(&server, "/a", &[]).await;

    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("crawl.db");
    let config_path = dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        format!(
            r#"
[crawler]
request-timeout = 5
connect-timeout = 2

[user-agent]
crawler-name = "TestBot"
crawler-version = "1.0"
contact-url = "https://example.com/about"
contact-email = "admin@example.com"

[storage]
database-path = "{}"
"#,
            db_path.display()
        ),
    )
    .unwrap();

    let config = load_config(&config_path).unwrap();
    let root = format!("{}/", base);
    let request = CrawlRequest::new(root.as_str(), 1).unwrap();

    {
        let store = Arc::new(SqliteStore::new(db_path.as_path()).unwrap());
        let stats = Arc::new(StatsObserver::new());
        let engine = build_engine(&config, store, stats).unwrap();
        let links = engine.crawl_request(&request).await.unwrap();
        assert_eq!(links, vec![a.clone()]);
    }

    let reopened = SqliteStore::new(db_path.as_path()).unwrap();
    assert_eq!(reopened.find(&root, 1).unwrap(), vec![a]);
}
