use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::error::SiteResult;
use crate::state::AppState;

/// Health check routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/ping", get(ping))
}

/// Full health check: verifies the content API answers with a master ref.
async fn health_check(State(state): State<AppState>) -> SiteResult<Json<Value>> {
    state.client().ping().await?;

    Ok(Json(json!({
        "status": "ok",
        "cms": "reachable",
        "cachedPages": state.pages().len().await,
    })))
}

/// Lightweight ping, no content API check.
async fn ping() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
