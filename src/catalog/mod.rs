//! Catalog subsystem.
//!
//! # Data Flow
//! ```text
//! Rewritten brand/model page
//!     → harvest.rs (anchor hrefs under the page's own path)
//!     → registry.rs (set union into brand or generation entries)
//!     → read back by child routes to decide 404 vs fetch
//! ```
//!
//! # Design Decisions
//! - Starts empty, only grows, never persisted
//! - Merge is a set union: repeatable and order-independent
//! - Per-key merges are atomic (dashmap shard locks)

pub mod harvest;
pub mod registry;

pub use harvest::child_slugs;
pub use registry::Catalog;
