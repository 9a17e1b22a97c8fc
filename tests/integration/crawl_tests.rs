//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full fetch, traverse and render cycle end-to-end.

use ripple_sitemap::config::{Config, CrawlerConfig, FetchConfig, OutputConfig, UserAgentConfig};
use ripple_sitemap::crawler::{crawl, traverse, HttpFetcher, PageFetcher};
use ripple_sitemap::output::render_sitemap;
use ripple_sitemap::SitemapError;
use std::collections::HashSet;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration for the given seed
fn create_test_config(seed_url: &str, max_depth: u32) -> Config {
    Config {
        crawler: CrawlerConfig {
            seed_url: seed_url.to_string(),
            max_depth,
        },
        user_agent: UserAgentConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0.0".to_string(),
            contact_url: None,
        },
        fetch: FetchConfig {
            timeout_secs: 5,
            connect_timeout_secs: 2,
            max_redirects: 5,
        },
        output: OutputConfig::default(),
    }
}

fn test_fetcher() -> HttpFetcher {
    let config = create_test_config("https://example.com/", 0);
    HttpFetcher::from_config(&config.user_agent, &config.fetch).expect("Failed to build fetcher")
}

fn html_page(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(format!("<html><body>{}</body></html>", body))
        .insert_header("content-type", "text/html")
}

async fn mount_page(server: &MockServer, page_path: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(html_page(body))
        .mount(server)
        .await;
}

/// Paths requested from the server, in order
async fn requested_paths(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|request| request.url.path().to_string())
        .collect()
}

#[tokio::test]
async fn test_full_crawl_single_domain() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        &format!(
            r#"<a href="/page1">Page 1</a>
               <a href="{}/page2">Page 2</a>
               <a href="https://elsewhere.invalid/page">Off-site</a>
               <a href="relative.html">Relative</a>"#,
            base_url
        ),
    )
    .await;
    mount_page(&mock_server, "/page1", r#"<a href="/page3">Page 3</a>"#).await;
    mount_page(&mock_server, "/page2", r#"<a href="/">Home</a>"#).await;
    mount_page(&mock_server, "/page3", "Content 3").await;

    let config = create_test_config(&format!("{}/", base_url), 2);
    let report = crawl(&config).await.expect("Crawl failed");

    let expected: HashSet<String> = ["/", "/page1", "/page2", "/page3"]
        .iter()
        .map(|p| format!("{}{}", base_url, p))
        .collect();
    assert_eq!(report.pages, expected);
    assert_eq!(report.fetched, 4);
    assert_eq!(report.failed, 0);

    // Every page requested exactly once
    let mut paths = requested_paths(&mock_server).await;
    paths.sort();
    assert_eq!(paths, vec!["/", "/page1", "/page2", "/page3"]);
}

#[tokio::test]
async fn test_depth_limit_stops_expansion() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", r#"<a href="/one">1</a>"#).await;
    mount_page(&mock_server, "/one", r#"<a href="/two">2</a>"#).await;
    mount_page(&mock_server, "/two", r#"<a href="/three">3</a>"#).await;

    let fetcher = test_fetcher();
    let pages = traverse(&fetcher, &format!("{}/", base_url), 1)
        .await
        .expect("Invalid seed");

    assert_eq!(pages.len(), 2);
    assert!(pages.contains(&format!("{}/one", base_url)));

    let paths = requested_paths(&mock_server).await;
    assert!(!paths.contains(&"/two".to_string()));
}

#[tokio::test]
async fn test_dead_link_is_a_dead_end() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<a href="/missing">Missing</a><a href="/alive">Alive</a>"#,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(
            ResponseTemplate::new(404).set_body_string(r#"<a href="/hidden">Hidden</a>"#),
        )
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/alive", "Alive").await;
    mount_page(&mock_server, "/hidden", "Hidden").await;

    let config = create_test_config(&format!("{}/", base_url), 3);
    let report = crawl(&config).await.expect("Crawl failed");

    assert!(report.pages.contains(&format!("{}/", base_url)));
    assert!(report.pages.contains(&format!("{}/missing", base_url)));
    assert!(report.pages.contains(&format!("{}/alive", base_url)));
    assert!(!report.pages.contains(&format!("{}/hidden", base_url)));
    assert_eq!(report.failed, 1);

    let paths = requested_paths(&mock_server).await;
    assert!(!paths.contains(&"/hidden".to_string()));
}

#[tokio::test]
async fn test_server_error_reported_as_fetch_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let fetcher = test_fetcher();
    let result = fetcher.fetch(&format!("{}/", mock_server.uri())).await;

    let error = result.expect_err("503 should fail the fetch");
    assert!(error.to_string().contains("503"));
}

#[tokio::test]
async fn test_redirect_sets_page_origin() {
    let old_host = MockServer::start().await;
    let new_host = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(301)
                .insert_header("location", format!("{}/landing", new_host.uri()).as_str()),
        )
        .mount(&old_host)
        .await;
    mount_page(&new_host, "/landing", r#"<a href="/local">Local</a>"#).await;

    let fetcher = test_fetcher();
    let page = fetcher
        .fetch(&format!("{}/", old_host.uri()))
        .await
        .expect("Redirected fetch failed");

    assert_eq!(page.final_url.as_str(), format!("{}/landing", new_host.uri()));
    assert_eq!(page.origin.to_string(), new_host.uri());
}

#[tokio::test]
async fn test_off_site_redirect_links_are_filtered_against_seed() {
    let seed_host = MockServer::start().await;
    let other_host = MockServer::start().await;
    let seed_base = seed_host.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(302)
                .insert_header("location", format!("{}/landing", other_host.uri()).as_str()),
        )
        .mount(&seed_host)
        .await;
    mount_page(
        &other_host,
        "/landing",
        &format!(
            r#"<a href="/local">Local</a><a href="{}/back">Back</a>"#,
            seed_base
        ),
    )
    .await;
    mount_page(&other_host, "/local", "Local").await;
    mount_page(&seed_host, "/back", "Back").await;

    let fetcher = test_fetcher();
    let pages = traverse(&fetcher, &format!("{}/", seed_base), 2)
        .await
        .expect("Invalid seed");

    let expected: HashSet<String> = [format!("{}/", seed_base), format!("{}/back", seed_base)]
        .into_iter()
        .collect();
    assert_eq!(pages, expected);

    // Root-relative links on the redirected page point at the other host
    let other_paths = requested_paths(&other_host).await;
    assert_eq!(other_paths, vec!["/landing"]);
}

#[tokio::test]
async fn test_invalid_seed_is_fatal() {
    let config = create_test_config("not-a-url", 2);
    let result = crawl(&config).await;

    assert!(matches!(result, Err(SitemapError::SeedParse { .. })));
}

#[tokio::test]
async fn test_crawl_renders_sitemap() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", r#"<a href="/about?lang=en&amp;v=2">About</a>"#).await;
    mount_page(&mock_server, "/about", "About").await;

    let config = create_test_config(&format!("{}/", base_url), 1);
    let report = crawl(&config).await.expect("Crawl failed");
    let xml = render_sitemap(&report.pages).expect("Render failed");

    assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
    assert!(xml.contains(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#));
    assert!(xml.contains(&format!("<loc>{}/</loc>", base_url)));
    assert!(xml.contains(&format!("<loc>{}/about?lang=en&amp;v=2</loc>", base_url)));
    assert_eq!(xml.matches("<url>").count(), 2);
}
