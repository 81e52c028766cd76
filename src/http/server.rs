//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with the catalog routes
//! - Serve static files for everything else
//! - Wire up middleware (tracing, request ID, optional timeout)
//! - Serve on a listener until shutdown is signalled

use axum::extract::Request;
use axum::{Router, ServiceExt};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::Layer;
use tower_http::{
    normalize_path::NormalizePathLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::catalog::Catalog;
use crate::config::AppConfig;
use crate::http::request::{request_span, MakeRequestUuidV4};
use crate::routing::{catalog_routes, CatalogUrls};
use crate::upstream::{PageFetcher, PageRewriter, UpstreamError};

/// Errors raised while assembling or running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Invalid upstream base URL: {0}")]
    BaseUrl(#[from] url::ParseError),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error("Server IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Application state injected into handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub fetcher: PageFetcher,
    pub urls: Arc<CatalogUrls>,
}

/// HTTP server for the catalog proxy.
pub struct HttpServer {
    router: Router,
    config: AppConfig,
    catalog: Arc<Catalog>,
}

impl HttpServer {
    /// Create a server that fetches from the configured upstream.
    pub fn new(config: AppConfig) -> Result<Self, ServerError> {
        let rewriter = PageRewriter::catalog_pages(&config.upstream.base_url)?;
        let fetcher = PageFetcher::new(rewriter)?;
        Self::with_fetcher(config, fetcher)
    }

    /// Create a server around an already built fetcher.
    pub fn with_fetcher(config: AppConfig, fetcher: PageFetcher) -> Result<Self, ServerError> {
        let catalog = Arc::new(Catalog::new());
        let state = AppState {
            catalog: catalog.clone(),
            fetcher,
            urls: Arc::new(CatalogUrls::parse(&config.upstream.base_url)?),
        };

        let router = Self::build_router(&config, state);
        Ok(Self {
            router,
            config,
            catalog,
        })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &AppConfig, state: AppState) -> Router {
        let router = catalog_routes()
            .fallback_service(ServeDir::new(&config.server.static_dir))
            .with_state(state);

        let router = match config.server.request_timeout_secs {
            0 => router,
            secs => router.layer(TimeoutLayer::new(Duration::from_secs(secs))),
        };

        router
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http().make_span_with(request_span))
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
    }

    /// The router without trailing-slash normalization, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// The catalog shared with the handlers.
    pub fn catalog(&self) -> Arc<Catalog> {
        self.catalog.clone()
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), ServerError> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.base_url,
            static_dir = %self.config.server.static_dir,
            "HTTP server starting"
        );

        // `/cars/bmw/` routes like `/cars/bmw`.
        let app = NormalizePathLayer::trim_trailing_slash().layer(self.router);

        axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
