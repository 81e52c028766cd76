//! Upstream page fetch-and-transform subsystem.
//!
//! # Data Flow
//! ```text
//! upstream URL
//!     → identity.rs (pick a browser user agent)
//!     → fetcher.rs (GET with browser-like headers, 200 only)
//!     → rewrite.rs (ordered selector rules over the HTML)
//!     → rewritten HTML string
//! ```
//!
//! # Design Decisions
//! - No retries, no caching, no outbound timeout
//! - Rewrite rules are data, so each one can be tested on its own
//! - Any failure along the way is a single `UpstreamError`

pub mod error;
pub mod fetcher;
pub mod identity;
pub mod rewrite;

pub use error::UpstreamError;
pub use fetcher::PageFetcher;
pub use identity::{FixedUserAgent, RandomUserAgent, UserAgentProvider};
pub use rewrite::{PageRewriter, RewriteRule, RuleAction};
