use std::sync::Arc;

use async_trait::async_trait;
use spacetraveling_core::RawDocument;
use spacetraveling_query::{Predicate, QueryOptions};

use crate::error::CmsResult;
use crate::preview::PreviewResolver;
use crate::response::SearchResponse;

/// A document search against one content ref.
#[derive(Debug, Clone, Copy)]
pub struct SearchRequest<'a> {
    pub reference: &'a str,
    pub predicates: &'a [Predicate],
    pub options: &'a QueryOptions,
}

/// Backend that serves content API requests.
#[async_trait]
pub trait ContentApi: Send + Sync {
    /// The ref of the currently published content.
    async fn master_ref(&self) -> CmsResult<String>;

    /// Run a document search.
    async fn search(&self, request: SearchRequest<'_>) -> CmsResult<SearchResponse>;
}

/// Content API client, optionally bound to a preview ref.
///
/// Unbound clients read published content through the master ref. A client
/// bound with [`Client::with_preview_ref`] reads the editor's draft release
/// instead.
#[derive(Clone)]
pub struct Client {
    api: Arc<dyn ContentApi>,
    preview_ref: Option<String>,
}

impl Client {
    pub fn new(api: Arc<dyn ContentApi>) -> Self {
        Self {
            api,
            preview_ref: None,
        }
    }

    /// A copy of this client that reads content at `preview_ref`.
    pub fn with_preview_ref(&self, preview_ref: impl Into<String>) -> Self {
        Self {
            api: Arc::clone(&self.api),
            preview_ref: Some(preview_ref.into()),
        }
    }

    pub fn preview_ref(&self) -> Option<&str> {
        self.preview_ref.as_deref()
    }

    pub fn is_preview(&self) -> bool {
        self.preview_ref.is_some()
    }

    /// The ref queries will run against.
    pub async fn reference(&self) -> CmsResult<String> {
        match &self.preview_ref {
            Some(r) => Ok(r.clone()),
            None => self.api.master_ref().await,
        }
    }

    pub async fn query(
        &self,
        predicates: &[Predicate],
        options: &QueryOptions,
    ) -> CmsResult<SearchResponse> {
        let reference = self.reference().await?;
        tracing::debug!(
            reference = %reference,
            predicates = predicates.len(),
            page_size = ?options.page_size,
            after = ?options.after,
            "querying content API"
        );
        self.api
            .search(SearchRequest {
                reference: &reference,
                predicates,
                options,
            })
            .await
    }

    /// First document matching `predicates`, if any.
    pub async fn query_first(&self, predicates: &[Predicate]) -> CmsResult<Option<RawDocument>> {
        let options = QueryOptions::new().page_size(1);
        let page = self.query(predicates, &options).await?;
        Ok(page.results.into_iter().next())
    }

    pub async fn get_by_uid(&self, doc_type: &str, uid: &str) -> CmsResult<Option<RawDocument>> {
        self.query_first(&[Predicate::at(format!("my.{doc_type}.uid"), uid)])
            .await
    }

    pub async fn get_by_id(&self, id: &str) -> CmsResult<Option<RawDocument>> {
        self.query_first(&[Predicate::at("document.id", id)]).await
    }

    /// Resolver for an editor's preview link.
    pub fn preview_resolver(
        &self,
        token: impl Into<String>,
        document_id: Option<String>,
    ) -> PreviewResolver {
        PreviewResolver::new(self.clone(), token.into(), document_id)
    }

    pub async fn ping(&self) -> CmsResult<()> {
        self.api.master_ref().await.map(|_| ())
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("preview_ref", &self.preview_ref)
            .finish_non_exhaustive()
    }
}
