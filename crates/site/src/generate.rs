//! Static generation of post pages.
//!
//! The same data functions back both the `build` command, which writes every
//! known post to disk, and the server, which renders posts missing from the
//! build on first request.

use std::path::{Path, PathBuf};

use serde::Serialize;
use spacetraveling_cms::{Client, CmsResult};
use spacetraveling_core::document::validate::validate_routable;
use spacetraveling_core::{
    estimate_read_time, PostDocument, RawDocument, POST_DOCUMENT_TYPE,
};
use spacetraveling_query::{Direction, Ordering, Predicate, QueryOptions};
use tokio::task::JoinSet;

use crate::error::SiteError;
use crate::pages;
use crate::render;

const PUBLICATION_DATE: &str = "document.first_publication_date";

/// Link to a neighbouring post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostLink {
    pub uid: String,
    pub title: String,
}

impl PostLink {
    fn from_document(doc: &RawDocument) -> Option<Self> {
        let uid = doc.uid.as_deref().filter(|uid| !uid.is_empty())?;
        let title = doc
            .data
            .get("title")
            .and_then(|t| t.as_str())
            .unwrap_or_default();
        Some(Self {
            uid: uid.to_string(),
            title: title.to_string(),
        })
    }
}

/// Everything the post page needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostPageProps {
    pub post: PostDocument,
    /// Estimated minutes to read the post.
    pub read_time: u32,
    /// The chronologically previous post, or empty.
    pub prev_post: Vec<PostLink>,
    /// The chronologically next post, or empty.
    pub next_post: Vec<PostLink>,
}

fn is_post() -> Predicate {
    Predicate::at("document.type", POST_DOCUMENT_TYPE)
}

/// UIDs of the posts to pre-render.
pub async fn static_paths(client: &Client, page_size: u32) -> CmsResult<Vec<String>> {
    let options = QueryOptions::new().page_size(page_size);
    let page = client.query(&[is_post()], &options).await?;
    let uids = page
        .results
        .into_iter()
        .filter_map(|doc| match doc.uid {
            Some(uid) if pages::is_valid_uid(&uid) => Some(uid),
            other => {
                tracing::warn!(id = %doc.id, uid = ?other, "skipping post without a usable uid");
                None
            }
        })
        .collect();
    Ok(uids)
}

/// Page data for the post `uid`, or `None` if there is no such post.
pub async fn static_props(client: &Client, uid: &str) -> CmsResult<Option<PostPageProps>> {
    let Some(raw) = client.get_by_uid(POST_DOCUMENT_TYPE, uid).await? else {
        return Ok(None);
    };
    let post: PostDocument = raw.into_typed()?;
    validate_routable(&post, POST_DOCUMENT_TYPE)?;

    let (prev_post, next_post) = tokio::try_join!(
        neighbour(client, &post.id, Direction::Desc),
        neighbour(client, &post.id, Direction::Asc),
    )?;

    Ok(Some(PostPageProps {
        read_time: estimate_read_time(&post.data.content),
        post,
        prev_post,
        next_post,
    }))
}

/// The post right after `id` when posts are sorted by publication date in
/// `direction`: descending yields the previous post, ascending the next.
async fn neighbour(client: &Client, id: &str, direction: Direction) -> CmsResult<Vec<PostLink>> {
    let options = QueryOptions::new()
        .page_size(1)
        .after(id)
        .order_by(Ordering {
            field: PUBLICATION_DATE.to_string(),
            direction,
        });
    let page = client.query(&[is_post()], &options).await?;
    Ok(page.results.iter().filter_map(PostLink::from_document).collect())
}

/// Latest posts for the home page, newest first.
pub async fn latest_posts(client: &Client) -> CmsResult<Vec<PostDocument>> {
    let options = QueryOptions::new().order_by(Ordering::desc(PUBLICATION_DATE));
    let page = client.query(&[is_post()], &options).await?;
    let posts = page
        .results
        .into_iter()
        .filter_map(|raw| {
            let id = raw.id.clone();
            raw.into_typed()
                .map_err(|e| tracing::warn!(%id, error = %e, "skipping undecodable post"))
                .ok()
        })
        .collect();
    Ok(posts)
}

/// Render the post page for `uid`, or `None` if there is no such post.
pub async fn render_post(client: &Client, uid: &str) -> CmsResult<Option<String>> {
    let props = static_props(client, uid).await?;
    Ok(props.map(|props| render::post::render(&props, client.is_preview()).into_string()))
}

/// Outcome of a `build` run.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// UIDs written to disk.
    pub written: Vec<String>,
    /// UIDs that failed, with the reason.
    pub failed: Vec<(String, String)>,
}

/// Pre-render the first `page_size` posts into `out_dir`, along with the
/// fallback shell and the not-found page. A failing post is recorded in the
/// report; only failures to list posts or write the shared pages abort.
///
/// The server only reads the post pages back. `post/_fallback.html` and
/// `404.html` are for a static host serving `out_dir` directly; the server
/// renders both inline.
pub async fn build_site(
    client: &Client,
    out_dir: &Path,
    page_size: u32,
) -> Result<BuildReport, SiteError> {
    tokio::fs::create_dir_all(out_dir.join("post")).await?;
    let uids = static_paths(client, page_size).await?;
    tracing::info!(posts = uids.len(), out_dir = %out_dir.display(), "pre-rendering posts");

    let mut tasks = JoinSet::new();
    for uid in uids {
        let client = client.clone();
        let out_dir = out_dir.to_path_buf();
        tasks.spawn(async move {
            let result = build_post(&client, &out_dir, &uid).await;
            (uid, result)
        });
    }

    let mut report = BuildReport::default();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((uid, Ok(path))) => {
                tracing::debug!(%uid, path = %path.display(), "wrote post page");
                report.written.push(uid);
            }
            Ok((uid, Err(e))) => {
                tracing::error!(%uid, error = %e, "failed to pre-render post");
                report.failed.push((uid, e.to_string()));
            }
            Err(e) => {
                tracing::error!(error = %e, "pre-render task aborted");
                report.failed.push((String::from("<unknown>"), e.to_string()));
            }
        }
    }
    report.written.sort();

    write_page(
        &pages::fallback_page_path(out_dir),
        render::post::fallback().into_string(),
    )
    .await?;
    write_page(
        &pages::not_found_page_path(out_dir),
        render::not_found_page().into_string(),
    )
    .await?;

    tracing::info!(
        written = report.written.len(),
        failed = report.failed.len(),
        "build finished"
    );
    Ok(report)
}

async fn build_post(client: &Client, out_dir: &Path, uid: &str) -> Result<PathBuf, SiteError> {
    let html = render_post(client, uid)
        .await?
        .ok_or_else(|| SiteError::NotFound(format!("post {uid}")))?;
    let path = pages::post_page_path(out_dir, uid);
    write_page(&path, html).await?;
    Ok(path)
}

async fn write_page(path: &Path, html: String) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, html).await
}
