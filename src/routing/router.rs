//! Catalog route table.

use axum::routing::get;
use axum::Router;

use crate::http::server::AppState;
use crate::routing::handlers;

/// The four catalog routes, from the brand list down to a single generation.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/cars", get(handlers::cars_index))
        .route("/cars/{brand}", get(handlers::brand_page))
        .route("/cars/{brand}/{model}", get(handlers::model_page))
        .route(
            "/cars/{brand}/{model}/{generation}",
            get(handlers::generation_page),
        )
}
