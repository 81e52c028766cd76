//! Page fetcher behavior against a mock upstream.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use car_catalog_proxy::upstream::{
    FixedUserAgent, PageFetcher, PageRewriter, RewriteRule, UpstreamError, UserAgentProvider,
};

mod common;

use common::{page, start_upstream, TEST_USER_AGENT};

fn fetcher_for(base_url: &str) -> PageFetcher {
    let rewriter = PageRewriter::catalog_pages(base_url).unwrap();
    PageFetcher::with_user_agents(rewriter, Arc::new(FixedUserAgent::new(TEST_USER_AGENT))).unwrap()
}

#[tokio::test]
async fn test_sends_browser_headers() {
    let upstream = start_upstream(|_: &str| (200, page("Home", &[]))).await;
    let fetcher = fetcher_for(&upstream.base_url());

    fetcher
        .fetch_and_transform(&format!("{}/cars/", upstream.base_url()))
        .await
        .unwrap();

    let requests = upstream.requests();
    assert_eq!(requests.len(), 1);
    let head = requests[0].to_lowercase();
    assert!(head.starts_with("get /cars/ http/1.1"));
    assert!(head.contains(&format!("user-agent: {}", TEST_USER_AGENT)));
    assert!(head.contains("accept-language: en-us,en;q=0.9"));
    assert!(head.contains(
        "accept: text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8"
    ));
}

/// Hands out `ua-0`, `ua-1`, ... and counts how often it was asked.
#[derive(Default)]
struct CountingUserAgent {
    calls: AtomicUsize,
}

impl UserAgentProvider for CountingUserAgent {
    fn user_agent(&self) -> String {
        format!("ua-{}", self.calls.fetch_add(1, Ordering::SeqCst))
    }
}

fn user_agent_line(head: &str) -> String {
    head.lines()
        .find(|line| line.to_lowercase().starts_with("user-agent:"))
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn test_user_agent_is_asked_per_request() {
    let upstream = start_upstream(|_: &str| (200, page("Home", &[]))).await;
    let provider = Arc::new(CountingUserAgent::default());
    let fetcher =
        PageFetcher::with_user_agents(PageRewriter::new(Vec::new()).unwrap(), provider.clone())
            .unwrap();
    let url = format!("{}/cars/", upstream.base_url());

    for _ in 0..3 {
        fetcher.fetch_and_transform(&url).await.unwrap();
    }

    assert_eq!(provider.calls.load(Ordering::SeqCst), 3);
    let agents: HashSet<_> = upstream
        .requests()
        .iter()
        .map(|head| user_agent_line(head).to_lowercase())
        .collect();
    let expected: HashSet<_> = (0..3).map(|n| format!("user-agent: ua-{n}")).collect();
    assert_eq!(agents, expected);
}

#[tokio::test]
async fn test_default_user_agent_looks_like_a_browser() {
    let upstream = start_upstream(|_: &str| (200, page("Home", &[]))).await;
    let rewriter = PageRewriter::new(Vec::new()).unwrap();
    let fetcher = PageFetcher::new(rewriter).unwrap();
    let url = format!("{}/cars/", upstream.base_url());

    for _ in 0..3 {
        fetcher.fetch_and_transform(&url).await.unwrap();
    }

    for head in upstream.requests() {
        let ua = user_agent_line(&head);
        assert!(ua.contains("Mozilla/5.0 ("), "unexpected UA line: {ua}");
    }
}

#[tokio::test]
async fn test_returns_rewritten_html() {
    let upstream = start_upstream(|_: &str| (200, page("BimmerCode", &["/cars/bmw/"]))).await;
    let fetcher = fetcher_for(&upstream.base_url());

    let html = fetcher
        .fetch_and_transform(&format!("{}/cars/", upstream.base_url()))
        .await
        .unwrap();

    assert!(html.contains("<!DOCTYPE html>"));
    assert!(html.contains(r#"<h1 class="display-4">BIMMER SERVICES</h1>"#));
    assert!(html.contains(r#"<a href="/cars/bmw/">/cars/bmw/</a>"#));
    assert!(!html.contains("cookies"));
}

#[tokio::test]
async fn test_non_200_is_status_error() {
    for code in [201u16, 204, 404, 500, 503] {
        let upstream = start_upstream(move |_: &str| (code, String::new())).await;
        let fetcher = fetcher_for(&upstream.base_url());

        let err = fetcher
            .fetch_and_transform(&format!("{}/cars/", upstream.base_url()))
            .await
            .unwrap_err();
        match err {
            UpstreamError::Status(status) => assert_eq!(status, code),
            other => panic!("expected status error for {code}, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_connection_failure_is_request_error() {
    // Bind then drop to get a port nobody listens on.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let fetcher = fetcher_for("https://bimmercode.app");
    let err = fetcher
        .fetch_and_transform(&format!("http://{addr}/cars/"))
        .await
        .unwrap_err();
    assert!(matches!(err, UpstreamError::Request(_)));
}

#[tokio::test]
async fn test_custom_rules() {
    let upstream = start_upstream(|_: &str| (200, "<ul><li class=\"ad\">buy</li><li>E90</li></ul>".to_string())).await;
    let rewriter = PageRewriter::new(vec![RewriteRule::remove("li.ad")]).unwrap();
    let fetcher =
        PageFetcher::with_user_agents(rewriter, Arc::new(FixedUserAgent::new("x"))).unwrap();

    let html = fetcher
        .fetch_and_transform(&format!("{}/", upstream.base_url()))
        .await
        .unwrap();
    assert!(html.contains("<ul><li>E90</li></ul>"));
    assert!(!html.contains("buy"));
}
