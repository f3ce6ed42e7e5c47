use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde_json::json;
use spacetraveling_cms::CmsError;

use crate::render;

/// Site error type; maps to the JSON or HTML response each route expects.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    #[error("invalid preview token")]
    InvalidToken,

    #[error("not found: {0}")]
    NotFound(String),

    #[error("content API error: {0}")]
    Cms(#[from] CmsError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for SiteError {
    fn into_response(self) -> Response {
        match self {
            SiteError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "message": "Invalid token" })),
            )
                .into_response(),
            SiteError::NotFound(what) => {
                tracing::debug!(%what, "not found");
                (
                    StatusCode::NOT_FOUND,
                    Html(render::not_found_page().into_string()),
                )
                    .into_response()
            }
            SiteError::Cms(err) => internal(&err),
            SiteError::Io(err) => internal(&err),
            SiteError::Internal(msg) => internal(&msg),
        }
    }
}

fn internal(err: &dyn std::fmt::Display) -> Response {
    tracing::error!(error = %err, "request failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "message": "An internal error occurred" })),
    )
        .into_response()
}

/// Convenience type alias for route handlers.
pub type SiteResult<T> = Result<T, SiteError>;
