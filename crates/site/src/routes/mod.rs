pub mod health;
pub mod post;
pub mod preview;

use axum::Router;

use crate::error::SiteError;
use crate::state::AppState;

/// Assemble the full router with all route groups.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(health::routes())
        .merge(preview::routes())
        .merge(post::routes())
        .fallback(not_found)
        .with_state(state)
}

async fn not_found() -> SiteError {
    SiteError::NotFound("route".to_string())
}
