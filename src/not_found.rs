//! The page to display when a route does not exist.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::html::error_view;

/// Renders the 404 page.
pub struct NotFoundError;

impl IntoResponse for NotFoundError {
    fn into_response(self) -> Response {
        let page = error_view(
            "Page introuvable",
            "404",
            "Cette page n'existe pas.",
            "Retournez au tableau de bord pour consulter vos finances.",
        );

        (StatusCode::NOT_FOUND, page).into_response()
    }
}

/// Fallback handler for unknown routes.
pub async fn get_404_not_found() -> Response {
    NotFoundError.into_response()
}
