//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use car_catalog_proxy::config::AppConfig;
use car_catalog_proxy::upstream::{FixedUserAgent, PageFetcher, PageRewriter};
use car_catalog_proxy::HttpServer;

pub const TEST_USER_AGENT: &str = "catalog-proxy-tests/1.0";

/// A raw-TCP upstream that answers each request from a closure over the path.
pub struct MockUpstream {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockUpstream {
    /// `http://127.0.0.1:{port}`, usable as `upstream.base_url`.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Raw request heads received so far, in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    /// Request paths received so far, in arrival order.
    pub fn paths(&self) -> Vec<String> {
        self.requests()
            .iter()
            .filter_map(|head| head.split_whitespace().nth(1).map(str::to_string))
            .collect()
    }
}

/// Start a programmable upstream on an ephemeral port.
pub async fn start_upstream<F>(respond: F) -> MockUpstream
where
    F: Fn(&str) -> (u16, String) + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let respond = Arc::new(respond);

    let recorded = requests.clone();
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let respond = respond.clone();
                    let recorded = recorded.clone();
                    tokio::spawn(async move {
                        let head = read_head(&mut socket).await;
                        let path = head.split_whitespace().nth(1).unwrap_or("/").to_string();
                        recorded.lock().unwrap().push(head);

                        let (status, body) = respond(&path);
                        let response = format!(
                            "HTTP/1.1 {} Mock\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                        tokio::time::sleep(Duration::from_millis(10)).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    MockUpstream { addr, requests }
}

async fn read_head(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => {
                buf.extend_from_slice(&chunk[..n]);
                if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// Config pointing at `upstream`, with static files from `static_dir`.
pub fn config_for(upstream: &MockUpstream, static_dir: &str) -> AppConfig {
    let mut config = AppConfig::default();
    config.server.bind_address = "127.0.0.1:0".into();
    config.server.static_dir = static_dir.into();
    config.upstream.base_url = upstream.base_url();
    config
}

/// A server with a fixed user agent, talking to `upstream`.
pub fn server_for(upstream: &MockUpstream) -> HttpServer {
    let config = config_for(upstream, "does-not-exist");
    let rewriter = PageRewriter::catalog_pages(&config.upstream.base_url).unwrap();
    let fetcher =
        PageFetcher::with_user_agents(rewriter, Arc::new(FixedUserAgent::new(TEST_USER_AGENT)))
            .unwrap();
    HttpServer::with_fetcher(config, fetcher).unwrap()
}

/// Minimal catalog page linking to `links`.
pub fn page(title: &str, links: &[&str]) -> String {
    let anchors: String = links
        .iter()
        .map(|href| format!(r#"<a href="{href}">{href}</a>"#))
        .collect();
    format!(
        r#"<!DOCTYPE html><html><head><link rel="stylesheet" href="/css/site.css"></head><body><h1 class="display-4">{title}</h1><p class="lead">Supported?</p><div id="cookies-note">cookies</div><a href="/adapters/enet/">ENET</a>{anchors}<footer class="footer fixed-bottom">footer</footer></body></html>"#
    )
}
