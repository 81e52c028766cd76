//! Catalog route handlers.
//!
//! Each handler builds the upstream URL for its page, fetches it through the
//! rewriter and returns the result. Brand and model pages additionally feed
//! the links they contain back into the catalog.

use axum::extract::{Path, State};
use axum::response::Html;

use crate::catalog::child_slugs;
use crate::http::server::AppState;
use crate::routing::error::{Page, RouteError};

type PageResult = Result<Html<String>, RouteError>;

/// `.` and `..` would be collapsed when the upstream URL is built.
fn is_dot_segment(segment: &str) -> bool {
    matches!(segment, "." | "..")
}

async fn fetch(state: &AppState, page: Page, url: String) -> Result<String, RouteError> {
    state
        .fetcher
        .fetch_and_transform(&url)
        .await
        .map_err(|source| RouteError::Upstream { page, source })
}

/// `GET /cars`: the brand list.
pub async fn cars_index(State(state): State<AppState>) -> PageResult {
    let html = fetch(&state, Page::Index, state.urls.index()).await?;
    Ok(Html(html))
}

/// `GET /cars/{brand}`: fetches the brand page and records its models.
pub async fn brand_page(State(state): State<AppState>, Path(brand): Path<String>) -> PageResult {
    let brand = brand.to_lowercase();
    if is_dot_segment(&brand) {
        return Err(RouteError::BrandNotSupported);
    }
    let html = fetch(&state, Page::Brand, state.urls.brand(&brand)).await?;

    let models = child_slugs(&html, &format!("/cars/{brand}/"));
    let found = models.len();
    let added = state.catalog.merge_models(&brand, models);
    tracing::info!(brand = %brand, found, new_children = added, "Harvested models");

    Ok(Html(html))
}

/// `GET /cars/{brand}/{model}`: requires a known brand; records generations.
pub async fn model_page(
    State(state): State<AppState>,
    Path((brand, model)): Path<(String, String)>,
) -> PageResult {
    if !state.catalog.has_brand(&brand) {
        tracing::debug!(brand = %brand, model = %model, "Brand not in catalog");
        return Err(RouteError::BrandNotSupported);
    }
    if is_dot_segment(&model) {
        tracing::debug!(brand = %brand, model = %model, "Dot segment in model");
        return Err(RouteError::GenerationNotSupported);
    }

    let html = fetch(&state, Page::Model, state.urls.model(&brand, &model)).await?;

    let generations = child_slugs(&html, &format!("/cars/{brand}/{model}/"));
    let found = generations.len();
    let added = state.catalog.merge_generations(&brand, &model, generations);
    tracing::info!(
        brand = %brand,
        model = %model,
        found,
        new_children = added,
        "Harvested generations"
    );

    Ok(Html(html))
}

/// `GET /cars/{brand}/{model}/{generation}`: requires a known brand and a
/// generation harvested from the model page.
pub async fn generation_page(
    State(state): State<AppState>,
    Path((brand, model, generation)): Path<(String, String, String)>,
) -> PageResult {
    if !state.catalog.has_brand(&brand) {
        tracing::debug!(brand = %brand, "Brand not in catalog");
        return Err(RouteError::BrandNotSupported);
    }

    // Only the generation set is checked, not the brand's model list.
    if !state.catalog.has_generation(&brand, &model, &generation) {
        tracing::debug!(
            brand = %brand,
            model = %model,
            generation = %generation,
            "Generation not in catalog"
        );
        return Err(RouteError::GenerationNotSupported);
    }

    let html = fetch(
        &state,
        Page::Generation,
        state.urls.generation(&brand, &model, &generation),
    )
    .await?;
    Ok(Html(html))
}
