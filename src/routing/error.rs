//! Route error definitions.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::upstream::UpstreamError;

/// The catalog page a request was for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Index,
    Brand,
    Model,
    Generation,
}

impl Page {
    /// Client-facing message when the upstream page could not be loaded.
    pub fn failure_message(self) -> &'static str {
        match self {
            Page::Index => "Erro ao carregar a página principal.",
            Page::Brand => "Erro ao carregar a página da marca.",
            Page::Model => "Erro ao carregar a página do modelo.",
            Page::Generation => "Erro ao carregar a página da geração.",
        }
    }
}

/// Errors returned by the catalog routes.
#[derive(Debug, Error)]
pub enum RouteError {
    /// The brand page has never been fetched.
    #[error("Marca não suportada.")]
    BrandNotSupported,

    /// The generation was not listed on its model page.
    #[error("Geração ou sub-modelo não suportado.")]
    GenerationNotSupported,

    /// Fetching or rewriting the upstream page failed.
    #[error("{}", .page.failure_message())]
    Upstream {
        page: Page,
        #[source]
        source: UpstreamError,
    },
}

impl RouteError {
    pub fn status(&self) -> StatusCode {
        match self {
            RouteError::BrandNotSupported | RouteError::GenerationNotSupported => {
                StatusCode::NOT_FOUND
            }
            RouteError::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RouteError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}
