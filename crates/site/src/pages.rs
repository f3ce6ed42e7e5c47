use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::RwLock;

/// Published post pages rendered on demand, keyed by UID.
#[derive(Debug, Default)]
pub struct PageCache {
    pages: RwLock<HashMap<String, Arc<str>>>,
}

impl PageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, uid: &str) -> Option<Arc<str>> {
        self.pages.read().await.get(uid).cloned()
    }

    pub async fn insert(&self, uid: impl Into<String>, html: impl Into<Arc<str>>) -> Arc<str> {
        let html = html.into();
        self.pages.write().await.insert(uid.into(), Arc::clone(&html));
        html
    }

    pub async fn len(&self) -> usize {
        self.pages.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.pages.read().await.is_empty()
    }
}

/// Whether `uid` is safe to use as a single path segment on disk.
pub fn is_valid_uid(uid: &str) -> bool {
    !uid.is_empty() && uid.chars().all(|c| c.is_alphanumeric() || c == '-' || c == '_')
}

/// Location of the pre-rendered page for `uid` under `out_dir`.
pub fn post_page_path(out_dir: &Path, uid: &str) -> PathBuf {
    out_dir.join("post").join(uid).join("index.html")
}

pub fn fallback_page_path(out_dir: &Path) -> PathBuf {
    out_dir.join("post").join("_fallback.html")
}

pub fn not_found_page_path(out_dir: &Path) -> PathBuf {
    out_dir.join("404.html")
}

/// Read a pre-rendered post page, if the build produced one.
pub async fn read_prerendered(out_dir: &Path, uid: &str) -> std::io::Result<Option<String>> {
    match tokio::fs::read_to_string(post_page_path(out_dir, uid)).await {
        Ok(html) => Ok(Some(html)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}
