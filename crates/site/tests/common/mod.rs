#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use reqwest::header::SET_COOKIE;
use serde_json::json;
use spacetraveling_cms::{Client, ContentApi, MemoryContentApi};
use spacetraveling_core::RawDocument;
use spacetraveling_site::{build_router, AppConfig, AppState};

pub const PREVIEW_SECRET: &str = "integration-secret";

pub fn post(id: &str, uid: &str, published: &str, title: &str, words: usize) -> RawDocument {
    document(id, uid, "post", published, title, words)
}

pub fn document(
    id: &str,
    uid: &str,
    doc_type: &str,
    published: &str,
    title: &str,
    words: usize,
) -> RawDocument {
    let text = vec!["palavra"; words].join(" ");
    serde_json::from_value(json!({
        "id": id,
        "uid": uid,
        "type": doc_type,
        "first_publication_date": published,
        "data": {
            "title": title,
            "author": "Joseph Oliveira",
            "banner": { "url": "https://images.prismic.io/spacetraveling/banner.png" },
            "content": [{
                "heading": "Hello",
                "body": [{ "type": "paragraph", "text": text, "spans": [] }]
            }]
        }
    }))
    .unwrap()
}

/// Three published posts, oldest first.
pub fn published_posts() -> Vec<RawDocument> {
    vec![
        post("A", "first", "2021-01-01T10:00:00+0000", "First post", 10),
        post("B", "second", "2021-02-01T10:00:00+0000", "Second post", 199),
        post("C", "third", "2021-03-01T10:00:00+0000", "Third post", 400),
    ]
}

pub fn config(out_dir: &Path) -> AppConfig {
    let out_dir = out_dir.display().to_string();
    AppConfig::from_lookup(|key| match key {
        "PRISMIC_API_ENDPOINT" => Some("http://localhost/api/v2".to_string()),
        "PREVIEW_SECRET" => Some(PREVIEW_SECRET.to_string()),
        "OUT_DIR" => Some(out_dir.clone()),
        _ => None,
    })
    .unwrap()
}

pub struct TestSite {
    pub base: String,
    pub state: AppState,
}

impl TestSite {
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }
}

/// Start the real router on an ephemeral port.
pub async fn spawn_site(api: impl ContentApi + 'static, out_dir: &Path) -> TestSite {
    let state = AppState::new(Client::new(Arc::new(api)), config(out_dir));
    let app = build_router(state.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    TestSite {
        base: format!("http://{addr}"),
        state,
    }
}

pub async fn spawn_published_site(out_dir: &Path) -> TestSite {
    spawn_site(MemoryContentApi::new(published_posts()), out_dir).await
}

/// HTTP client that reports redirects instead of following them.
pub fn http() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}

/// Raw `Set-Cookie` header values.
pub fn set_cookies(response: &reqwest::Response) -> Vec<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(str::to_string)
        .collect()
}

/// `name=value` of the cookie called `name`, if it was set.
pub fn cookie_pair(set_cookies: &[String], name: &str) -> Option<String> {
    set_cookies
        .iter()
        .filter_map(|c| c.split(';').next())
        .find(|pair| pair.starts_with(&format!("{name}=")))
        .map(str::to_string)
}

/// A `Cookie` request header replaying every cookie that was set.
pub fn cookie_header(set_cookies: &[String]) -> String {
    set_cookies
        .iter()
        .filter_map(|c| c.split(';').next())
        .collect::<Vec<_>>()
        .join("; ")
}
