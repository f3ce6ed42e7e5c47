use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::header,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use axum_extra::extract::cookie::CookieJar;

use crate::error::{SiteError, SiteResult};
use crate::generate;
use crate::pages;
use crate::render;
use crate::state::AppState;

pub const PUBLIC_CACHE: &str = "public, max-age=60";
pub const PREVIEW_CACHE: &str = "private, no-store";

/// Header naming where a post page came from: `prerendered`, `cache`,
/// `rendered` or `preview`.
pub const PAGE_SOURCE_HEADER: &str = "x-page-source";

/// Post and home page routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/post/{uid}", get(post_page))
}

fn page(html: impl Into<String>, cache_control: &'static str, source: &'static str) -> Response {
    (
        [
            (header::CACHE_CONTROL, cache_control),
            (header::HeaderName::from_static(PAGE_SOURCE_HEADER), source),
        ],
        Html(html.into()),
    )
        .into_response()
}

async fn home(State(state): State<AppState>, jar: CookieJar) -> SiteResult<Response> {
    let preview = state.session().read(&jar);
    let client = match &preview {
        Some(data) => state.client().with_preview_ref(data.preview_ref.clone()),
        None => state.client().clone(),
    };
    let posts = generate::latest_posts(&client).await?;
    let html = render::home::render(&posts, preview.is_some()).into_string();
    let cache_control = if preview.is_some() { PREVIEW_CACHE } else { PUBLIC_CACHE };
    Ok(page(html, cache_control, "rendered"))
}

/// Serve a post page.
///
/// Preview sessions always render fresh from their ref. Published pages come
/// from the build output, then the on-demand cache, then a fresh render that
/// is cached for later requests.
async fn post_page(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(uid): Path<String>,
) -> SiteResult<Response> {
    if !pages::is_valid_uid(&uid) {
        return Err(SiteError::NotFound(format!("post {uid}")));
    }

    if let Some(preview) = state.session().read(&jar) {
        let client = state.client().with_preview_ref(preview.preview_ref);
        let html = generate::render_post(&client, &uid)
            .await?
            .ok_or_else(|| SiteError::NotFound(format!("post {uid}")))?;
        return Ok(page(html, PREVIEW_CACHE, "preview"));
    }

    if let Some(html) = pages::read_prerendered(&state.config().out_dir, &uid).await? {
        return Ok(page(html, PUBLIC_CACHE, "prerendered"));
    }

    if let Some(html) = state.pages().get(&uid).await {
        return Ok(page(&*html, PUBLIC_CACHE, "cache"));
    }

    tracing::info!(%uid, "rendering post on demand");
    let html = generate::render_post(state.client(), &uid)
        .await?
        .ok_or_else(|| SiteError::NotFound(format!("post {uid}")))?;
    let html: Arc<str> = state.pages().insert(uid, html).await;
    Ok(page(&*html, PUBLIC_CACHE, "rendered"))
}
