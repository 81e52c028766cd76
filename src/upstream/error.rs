//! Upstream error definitions.

use thiserror::Error;

/// Errors that can occur while fetching and rewriting an upstream page.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Connection, TLS or body read failure.
    #[error("Upstream request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Upstream answered with anything other than 200.
    #[error("Upstream returned status {0}")]
    Status(u16),

    /// The HTML rewriter rejected the document.
    #[error("HTML rewrite failed: {0}")]
    Rewrite(String),
}

impl UpstreamError {
    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            UpstreamError::Request(_) => "request",
            UpstreamError::Status(_) => "status",
            UpstreamError::Rewrite(_) => "rewrite",
        }
    }
}

/// Result type for upstream operations.
pub type UpstreamResult<T> = Result<T, UpstreamError>;
