//! Catalog routing subsystem.
//!
//! # Data Flow
//! ```text
//! GET /cars[/{brand}[/{model}[/{generation}]]]
//!     → handlers.rs (catalog gate: 404 before any fetch)
//!     → urls.rs (upstream URL for the page)
//!     → upstream::PageFetcher (fetch + rewrite)
//!     → catalog::harvest (brand and model pages only)
//!     → HTML back to the client
//! ```
//!
//! # Design Decisions
//! - Only the brand route lowercases its parameter
//! - The generation route checks the brand and the generation set, not the model list
//! - Error bodies are short plain-text messages in Portuguese

pub mod error;
pub mod handlers;
pub mod router;
pub mod urls;

pub use error::{Page, RouteError};
pub use router::catalog_routes;
pub use urls::CatalogUrls;
