//! Outbound page fetching.
//!
//! # Responsibilities
//! - Issue GET requests with a browser-like identity
//! - Reject anything but 200 OK
//! - Hand the body to the page rewriter

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use std::sync::Arc;
use std::time::Instant;

use crate::observability::metrics;
use crate::upstream::error::{UpstreamError, UpstreamResult};
use crate::upstream::identity::{RandomUserAgent, UserAgentProvider};
use crate::upstream::rewrite::PageRewriter;

const ACCEPT_LANGUAGE_VALUE: &str = "en-US,en;q=0.9";
const ACCEPT_VALUE: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";

/// Fetches upstream pages and returns them rewritten.
#[derive(Clone)]
pub struct PageFetcher {
    client: reqwest::Client,
    user_agents: Arc<dyn UserAgentProvider>,
    rewriter: Arc<PageRewriter>,
}

impl PageFetcher {
    /// Create a fetcher with randomized user agents.
    pub fn new(rewriter: PageRewriter) -> UpstreamResult<Self> {
        Self::with_user_agents(rewriter, Arc::new(RandomUserAgent::new()))
    }

    /// Create a fetcher with a caller-supplied user agent source.
    pub fn with_user_agents(
        rewriter: PageRewriter,
        user_agents: Arc<dyn UserAgentProvider>,
    ) -> UpstreamResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANGUAGE_VALUE));
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_VALUE));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            user_agents,
            rewriter: Arc::new(rewriter),
        })
    }

    /// Fetch `url` and apply the rewrite rules to the returned document.
    pub async fn fetch_and_transform(&self, url: &str) -> UpstreamResult<String> {
        let start_time = Instant::now();
        let result = self.fetch(url).await;

        match &result {
            Ok(_) => {
                tracing::debug!(url = %url, "Fetched upstream page");
                metrics::record_fetch("ok", start_time);
            }
            Err(e) => {
                tracing::error!(url = %url, error = %e, "Failed to fetch upstream page");
                metrics::record_fetch(e.kind(), start_time);
            }
        }

        result
    }

    async fn fetch(&self, url: &str) -> UpstreamResult<String> {
        let user_agent = self.user_agents.user_agent();

        let response = self
            .client
            .get(url)
            .header(USER_AGENT, user_agent)
            .send()
            .await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(UpstreamError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        self.rewriter.rewrite(&body)
    }
}

impl std::fmt::Debug for PageFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageFetcher")
            .field("rules", &self.rewriter.rules().len())
            .finish_non_exhaustive()
    }
}
