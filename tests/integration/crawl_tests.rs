//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use focused_crawler::config::Config;
use focused_crawler::crawler::{
    cancel_after, crawl_url, Coordinator, CrawlEvent, EventSender, FetchError, KeywordSet,
};
use focused_crawler::output::{CrawlReport, HtmlReport, MarkdownReport, ReportSink};
use focused_crawler::state::CrawlPhase;
use focused_crawler::url::Address;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// An HTML response with the given body
fn html_page(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(
        format!("<html><head><title>Test</title></head><body>{}</body></html>", body),
        "text/html",
    )
}

/// Mounts a GET mock for `route` that must be hit exactly `times` times
async fn mount_page(server: &MockServer, route: &str, body: &str, times: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(html_page(body))
        .expect(times)
        .mount(server)
        .await;
}

fn seed_of(server: &MockServer) -> Address {
    Address::parse(&format!("{}/", server.uri())).expect("mock server URI is a valid address")
}

fn page_of(server: &MockServer, route: &str) -> Address {
    Address::parse(&format!("{}{}", server.uri(), route)).expect("valid page address")
}

fn keywords() -> KeywordSet {
    KeywordSet::new(["education", "learning", "course"])
}

#[tokio::test]
async fn test_full_crawl_single_domain() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        r#"<a href="/page1">Page 1</a><a href="page2">Page 2</a>"#,
        1,
    )
    .await;
    mount_page(&mock_server, "/page1", "Our COURSE catalogue", 1).await;
    mount_page(&mock_server, "/page2", "Contact us", 1).await;

    let mut coordinator =
        Coordinator::from_config(&Config::default()).expect("Failed to create coordinator");
    let outcome = coordinator
        .run(seed_of(&mock_server), &keywords(), 10)
        .await
        .expect("Crawl failed");

    assert_eq!(outcome.results, vec![page_of(&mock_server, "/page1")]);
    assert_eq!(outcome.visited.len(), 3);
    assert_eq!(outcome.stats.stop_reason, CrawlPhase::ExhaustedFrontier);
}

#[tokio::test]
async fn test_seed_relevant_by_markup() {
    let mock_server = MockServer::start().await;

    // The keyword only appears inside an href
    mount_page(&mock_server, "/", r#"<a href="/course-list">Catalogue</a>"#, 1).await;
    mount_page(&mock_server, "/course-list", "Nothing here", 1).await;

    let mut coordinator = Coordinator::from_config(&Config::default()).unwrap();
    let outcome = coordinator
        .run(seed_of(&mock_server), &keywords(), 10)
        .await
        .unwrap();

    // Relevance scans raw markup, so the href counts
    assert_eq!(outcome.results, vec![seed_of(&mock_server)]);
}

#[tokio::test]
async fn test_http_errors_are_skipped() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        r#"<a href="/missing">Gone</a><a href="/broken">Broken</a><a href="/ok">Ok</a>"#,
        1,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/ok", "learning resources", 1).await;

    let (events, mut rx) = EventSender::channel();
    let mut coordinator = Coordinator::from_config(&Config::default())
        .unwrap()
        .with_events(events);
    let outcome = coordinator
        .run(seed_of(&mock_server), &keywords(), 10)
        .await
        .unwrap();

    assert_eq!(outcome.results, vec![page_of(&mock_server, "/ok")]);
    assert!(!outcome.visited.contains(&page_of(&mock_server, "/missing")));
    assert!(!outcome.visited.contains(&page_of(&mock_server, "/broken")));
    assert_eq!(outcome.stats.fetch_failures, 2);
    assert_eq!(outcome.stats.pages_processed, 2);

    let mut failures = Vec::new();
    while let Ok(event) = rx.try_recv() {
        if let CrawlEvent::FetchFailed { address, error } = event {
            failures.push((address, error));
        }
    }
    assert_eq!(
        failures,
        vec![
            (
                page_of(&mock_server, "/missing"),
                FetchError::Http { status_code: 404 }
            ),
            (
                page_of(&mock_server, "/broken"),
                FetchError::Http { status_code: 500 }
            ),
        ]
    );
}

#[tokio::test]
async fn test_non_html_is_skipped() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", r#"<a href="/brochure.pdf">Brochure</a>"#, 1).await;
    Mock::given(method("GET"))
        .and(path("/brochure.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("course", "application/pdf"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut coordinator = Coordinator::from_config(&Config::default()).unwrap();
    let outcome = coordinator
        .run(seed_of(&mock_server), &keywords(), 10)
        .await
        .unwrap();

    assert!(outcome.results.is_empty());
    assert_eq!(outcome.visited.len(), 1);
    assert_eq!(outcome.stats.fetch_failures, 1);
}

#[tokio::test]
async fn test_budget_limits_requests() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        r#"<a href="/a">A</a><a href="/b">B</a><a href="/c">C</a>"#,
        1,
    )
    .await;
    mount_page(&mock_server, "/a", "course a", 1).await;
    mount_page(&mock_server, "/b", "course b", 0).await;
    mount_page(&mock_server, "/c", "course c", 0).await;

    let mut coordinator = Coordinator::from_config(&Config::default()).unwrap();
    let outcome = coordinator
        .run(seed_of(&mock_server), &keywords(), 2)
        .await
        .unwrap();

    assert_eq!(outcome.visited.len(), 2);
    assert_eq!(outcome.results, vec![page_of(&mock_server, "/a")]);
    assert_eq!(outcome.stats.stop_reason, CrawlPhase::BudgetReached);
}

#[tokio::test]
async fn test_zero_budget_sends_no_requests() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/", "course", 0).await;

    let mut coordinator = Coordinator::from_config(&Config::default()).unwrap();
    let outcome = coordinator
        .run(seed_of(&mock_server), &keywords(), 0)
        .await
        .unwrap();

    assert!(outcome.results.is_empty());
    assert!(outcome.visited.is_empty());
}

#[tokio::test]
async fn test_duplicate_links_fetched_once() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        r#"<a href="/b">B</a><a href="/b#details">B again</a>"#,
        1,
    )
    .await;
    mount_page(&mock_server, "/b", "page b", 1).await;

    let mut coordinator = Coordinator::from_config(&Config::default()).unwrap();
    let outcome = coordinator
        .run(seed_of(&mock_server), &keywords(), 10)
        .await
        .unwrap();

    assert_eq!(outcome.visited.len(), 2);
    assert_eq!(outcome.stats.duplicates_skipped, 1);
}

#[tokio::test]
async fn test_cyclic_links_terminate() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", r#"<a href="/b">B</a>"#, 1).await;
    mount_page(&mock_server, "/b", r#"<a href="/">Home</a>"#, 1).await;

    let mut coordinator = Coordinator::from_config(&Config::default()).unwrap();
    let outcome = coordinator
        .run(seed_of(&mock_server), &keywords(), 10)
        .await
        .unwrap();

    assert_eq!(outcome.visited.len(), 2);
    assert_eq!(outcome.stats.stop_reason, CrawlPhase::ExhaustedFrontier);
}

#[tokio::test]
async fn test_deadline_returns_partial_results() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", r#"Education hub <a href="/slow">Slow</a>"#, 1).await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(html_page("course").set_delay(Duration::from_secs(10)))
        .mount(&mock_server)
        .await;

    let mut coordinator = Coordinator::from_config(&Config::default()).unwrap();
    cancel_after(coordinator.cancellation_token(), Duration::from_millis(300));

    let started = std::time::Instant::now();
    let outcome = coordinator
        .run(seed_of(&mock_server), &keywords(), 10)
        .await
        .unwrap();

    assert!(started.elapsed() < Duration::from_secs(5));
    assert_eq!(outcome.results, vec![seed_of(&mock_server)]);
    assert_eq!(outcome.visited.len(), 1);
    assert_eq!(outcome.stats.stop_reason, CrawlPhase::Cancelled);
}

#[tokio::test]
async fn test_concurrent_crawl_visits_every_page_once() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        r#"<a href="/a">A</a><a href="/b">B</a><a href="/c">C</a><a href="/a">A</a>"#,
        1,
    )
    .await;
    mount_page(&mock_server, "/a", r#"course <a href="/b">B</a>"#, 1).await;
    mount_page(&mock_server, "/b", r#"<a href="/c">C</a>"#, 1).await;
    mount_page(&mock_server, "/c", r#"learning <a href="/">Home</a>"#, 1).await;

    let mut config = Config::default();
    config.crawler.max_concurrent_fetches = 4;

    let mut coordinator = Coordinator::from_config(&config).unwrap();
    let outcome = coordinator
        .run(seed_of(&mock_server), &keywords(), 10)
        .await
        .unwrap();

    assert_eq!(outcome.visited.len(), 4);
    let mut results: Vec<String> = outcome.results.iter().map(|a| a.to_string()).collect();
    results.sort();
    assert_eq!(
        results,
        vec![
            page_of(&mock_server, "/a").to_string(),
            page_of(&mock_server, "/c").to_string()
        ]
    );
}

#[tokio::test]
async fn test_crawl_url_rejects_malformed_seed() {
    let result = crawl_url("not a url", &keywords(), 10, &Config::default()).await;
    assert!(matches!(
        result,
        Err(focused_crawler::CrawlError::InvalidInput(_))
    ));
}

#[tokio::test]
async fn test_crawl_and_write_reports() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", r#"Welcome <a href="/courses">Courses</a>"#, 1).await;
    mount_page(&mock_server, "/courses", "All courses", 1).await;

    let seed = format!("{}/", mock_server.uri());
    let keywords = keywords();
    let outcome = crawl_url(&seed, &keywords, 10, &Config::default())
        .await
        .expect("Crawl failed");

    let seed = seed_of(&mock_server);
    let report = CrawlReport::new(&outcome.results, &keywords, &seed).with_stats(&outcome.stats);

    let dir = tempfile::tempdir().unwrap();
    let html_path = dir.path().join("crawler-results.html");
    let md_path = dir.path().join("crawler-results.md");

    HtmlReport::new(&html_path).write(&report).unwrap();
    MarkdownReport::new(&md_path).write(&report).unwrap();

    let html = std::fs::read_to_string(&html_path).unwrap();
    let courses = page_of(&mock_server, "/courses").to_string();
    assert!(html.contains("<h1>Focused Crawler Results</h1>"));
    assert!(html.contains(&format!("<li><a href=\"{}\" target=\"_blank\">", courses)));
    assert!(html.contains("education, learning, course"));

    let markdown = std::fs::read_to_string(&md_path).unwrap();
    // The seed links to /courses, so its markup matches too
    assert_eq!(outcome.results.len(), 2);
    assert!(markdown.contains(&format!("2. <{}>", courses)));
    assert!(markdown.contains("## Crawl Statistics"));
}
