use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use spacetraveling_core::{link_resolver, PreviewData};

use crate::error::{SiteError, SiteResult};
use crate::state::AppState;

/// Preview mode routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/preview", get(enter_preview))
        .route("/api/exit-preview", get(exit_preview))
}

#[derive(Debug, Deserialize)]
pub struct PreviewParams {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(rename = "documentId", default)]
    pub document_id: Option<String>,
}

/// Resolve an editor's preview link, enable preview mode and redirect to the
/// previewed page.
async fn enter_preview(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(params): Query<PreviewParams>,
) -> SiteResult<Response> {
    let token = params.token.unwrap_or_default();
    let resolved = state
        .client()
        .preview_resolver(token.clone(), params.document_id.clone())
        .resolve(link_resolver, "/")
        .await?;

    let Some(location) = resolved.filter(|url| !url.is_empty()) else {
        tracing::warn!(document_id = ?params.document_id, "rejected preview request");
        return Err(SiteError::InvalidToken);
    };

    tracing::info!(document_id = ?params.document_id, %location, "entering preview mode");
    let jar = state.session().enable(jar, &PreviewData::new(token))?;
    Ok((jar, (StatusCode::FOUND, [(header::LOCATION, location)])).into_response())
}

/// Leave preview mode and go home.
async fn exit_preview(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    (state.session().disable(jar), Redirect::temporary("/"))
}
