use std::sync::Arc;

use spacetraveling_cms::Client;

use crate::config::AppConfig;
use crate::pages::PageCache;
use crate::session::PreviewSession;

/// Shared application state, passed to all handlers via Axum's `State` extractor.
/// Wrapped in `Arc` so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<InnerState>,
}

struct InnerState {
    client: Client,
    config: AppConfig,
    session: PreviewSession,
    pages: PageCache,
}

impl AppState {
    pub fn new(client: Client, config: AppConfig) -> Self {
        let session = PreviewSession::new(
            &config.preview_secret,
            config.preview_max_age_secs,
            config.preview_cookie_secure,
        );
        Self {
            inner: Arc::new(InnerState {
                client,
                config,
                session,
                pages: PageCache::new(),
            }),
        }
    }

    /// Client reading published content.
    pub fn client(&self) -> &Client {
        &self.inner.client
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn session(&self) -> &PreviewSession {
        &self.inner.session
    }

    pub fn pages(&self) -> &PageCache {
        &self.inner.pages
    }
}
