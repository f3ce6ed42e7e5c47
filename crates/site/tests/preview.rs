mod common;

use reqwest::header::{CACHE_CONTROL, COOKIE, LOCATION};
use reqwest::StatusCode;
use serde_json::{json, Value};
use spacetraveling_cms::{HttpContentApi, MemoryContentApi};
use spacetraveling_core::PreviewData;
use spacetraveling_site::session::{PreviewSession, BYPASS_COOKIE, PREVIEW_DATA_COOKIE};

use common::{cookie_header, cookie_pair, document, http, post, set_cookies, spawn_site, TestSite};

async fn site(out_dir: &std::path::Path) -> TestSite {
    let api = MemoryContentApi::new(vec![post(
        "P1",
        "published-post",
        "2021-01-01T10:00:00+0000",
        "Published title",
        50,
    )]);
    api.add_preview(
        "valid-ref",
        vec![
            document("D1", "draft-post", "posts", "2021-02-01T10:00:00+0000", "Draft", 10),
            post("P1", "published-post", "2021-01-01T10:00:00+0000", "Edited title", 50),
        ],
    )
    .await;
    spawn_site(api, out_dir).await
}

#[tokio::test]
async fn valid_token_redirects_and_sets_preview_cookie() {
    let dir = tempfile::tempdir().unwrap();
    let site = site(dir.path()).await;

    let response = http()
        .get(site.url("/api/preview?token=valid-ref&documentId=D1"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()[LOCATION], "/post/draft-post");

    let cookies = set_cookies(&response);
    let data_cookie = cookies
        .iter()
        .find(|c| c.starts_with(PREVIEW_DATA_COOKIE))
        .unwrap();
    assert!(data_cookie.contains("HttpOnly"));
    assert!(data_cookie.contains("SameSite=Lax"));
    assert!(data_cookie.contains("Path=/"));
    assert!(cookie_pair(&cookies, BYPASS_COOKIE).is_some());

    let token = cookie_pair(&cookies, PREVIEW_DATA_COOKIE).unwrap();
    let token = token.trim_start_matches(&format!("{PREVIEW_DATA_COOKIE}="));
    let session = PreviewSession::new(common::PREVIEW_SECRET, 3600, false);
    assert_eq!(session.verify(token), Some(PreviewData::new("valid-ref")));
}

#[tokio::test]
async fn post_documents_resolve_to_home() {
    let dir = tempfile::tempdir().unwrap();
    let site = site(dir.path()).await;

    let response = http()
        .get(site.url("/api/preview?token=valid-ref&documentId=P1"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()[LOCATION], "/");
}

#[tokio::test]
async fn missing_document_id_redirects_home() {
    let dir = tempfile::tempdir().unwrap();
    let site = site(dir.path()).await;

    let response = http()
        .get(site.url("/api/preview?token=valid-ref"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()[LOCATION], "/");
    assert!(!set_cookies(&response).is_empty());
}

#[tokio::test]
async fn missing_or_empty_token_is_401() {
    let dir = tempfile::tempdir().unwrap();
    let site = site(dir.path()).await;

    for path in ["/api/preview?documentId=D1", "/api/preview?token=&documentId=D1"] {
        let response = http().get(site.url(path)).send().await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(set_cookies(&response).is_empty());
        let body: Value = response.json().await.unwrap();
        assert_eq!(body, json!({ "message": "Invalid token" }));
    }
}

#[tokio::test]
async fn rejected_ref_is_a_server_error() {
    let dir = tempfile::tempdir().unwrap();
    let site = site(dir.path()).await;

    let response = http()
        .get(site.url("/api/preview?token=expired-ref&documentId=D1"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn unknown_token_without_document_id_sets_no_cookie() {
    let dir = tempfile::tempdir().unwrap();
    let site = site(dir.path()).await;

    for path in [
        "/api/preview?token=garbage-not-a-ref",
        "/api/preview?token=garbage-not-a-ref&documentId=",
    ] {
        let response = http().get(site.url(path)).send().await.unwrap();
        assert_ne!(response.status(), StatusCode::FOUND);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.headers().get(LOCATION).is_none());
        assert!(set_cookies(&response).is_empty());
    }
}

#[tokio::test]
async fn unreachable_cms_is_a_server_error() {
    let dir = tempfile::tempdir().unwrap();
    let api = HttpContentApi::new("http://127.0.0.1:9/api/v2", None).unwrap();
    let site = spawn_site(api, dir.path()).await;

    let response = http()
        .get(site.url("/api/preview?token=valid-ref&documentId=D1"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn preview_session_renders_drafts_uncached() {
    let dir = tempfile::tempdir().unwrap();
    let site = site(dir.path()).await;
    let client = http();

    let response = client
        .get(site.url("/api/preview?token=valid-ref&documentId=D1"))
        .send()
        .await
        .unwrap();
    let cookies = cookie_header(&set_cookies(&response));

    let response = client
        .get(site.url("/post/published-post"))
        .header(COOKIE, &cookies)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[CACHE_CONTROL], "private, no-store");
    assert_eq!(response.headers()["x-page-source"], "preview");
    let body = response.text().await.unwrap();
    assert!(body.contains("Edited title"));
    assert!(body.contains(r#"href="/api/exit-preview""#));
    assert_eq!(site.state.pages().len().await, 0);

    let body = client
        .get(site.url("/post/published-post"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("Published title"));
    assert!(!body.contains("Edited title"));
}

#[tokio::test]
async fn tampered_cookie_is_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let site = site(dir.path()).await;

    let forged = PreviewSession::new("someone-else", 3600, false)
        .sign(&PreviewData::new("valid-ref"))
        .unwrap();
    let response = http()
        .get(site.url("/post/published-post"))
        .header(
            COOKIE,
            format!("{BYPASS_COOKIE}=x; {PREVIEW_DATA_COOKIE}={forged}"),
        )
        .send()
        .await
        .unwrap();
    assert_eq!(response.headers()["x-page-source"], "rendered");
    assert!(response.text().await.unwrap().contains("Published title"));
}

#[tokio::test]
async fn exit_preview_clears_cookies() {
    let dir = tempfile::tempdir().unwrap();
    let site = site(dir.path()).await;

    let response = http()
        .get(site.url("/api/exit-preview"))
        .header(COOKIE, format!("{BYPASS_COOKIE}=x; {PREVIEW_DATA_COOKIE}=y"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.headers()[LOCATION], "/");

    let cookies = set_cookies(&response);
    for name in [BYPASS_COOKIE, PREVIEW_DATA_COOKIE] {
        let removal = cookies.iter().find(|c| c.starts_with(name)).unwrap();
        assert!(removal.contains("Max-Age=0"));
    }
}
