use std::collections::HashMap;

use async_trait::async_trait;
use spacetraveling_core::RawDocument;
use spacetraveling_query::path::{compare_values, parse_path, resolve_value};
use spacetraveling_query::{eval_all, Direction};
use tokio::sync::RwLock;

use crate::api::{ContentApi, SearchRequest};
use crate::error::{CmsError, CmsResult};
use crate::response::SearchResponse;

/// Ref under which [`MemoryContentApi`] serves published documents.
pub const MEMORY_MASTER_REF: &str = "master";

/// In-process content source with the same query semantics as the HTTP API.
///
/// Published documents live under [`MEMORY_MASTER_REF`]. Each preview ref
/// overlays its drafts on top of the published set, replacing documents that
/// share an id.
#[derive(Debug, Default)]
pub struct MemoryContentApi {
    published: RwLock<Vec<RawDocument>>,
    previews: RwLock<HashMap<String, Vec<RawDocument>>>,
}

impl MemoryContentApi {
    pub fn new(published: Vec<RawDocument>) -> Self {
        Self {
            published: RwLock::new(published),
            previews: RwLock::new(HashMap::new()),
        }
    }

    pub async fn publish(&self, doc: RawDocument) {
        let mut published = self.published.write().await;
        published.retain(|d| d.id != doc.id);
        published.push(doc);
    }

    /// Register a preview ref that shows `drafts` over published content.
    pub async fn add_preview(&self, preview_ref: impl Into<String>, drafts: Vec<RawDocument>) {
        self.previews.write().await.insert(preview_ref.into(), drafts);
    }

    async fn documents_at(&self, reference: &str) -> CmsResult<Vec<RawDocument>> {
        let published = self.published.read().await.clone();
        if reference == MEMORY_MASTER_REF {
            return Ok(published);
        }
        let previews = self.previews.read().await;
        let drafts = previews.get(reference).ok_or_else(|| CmsError::Api {
            status: 404,
            message: format!("Ref not found: {reference}"),
        })?;
        let mut docs: Vec<RawDocument> = published
            .into_iter()
            .filter(|doc| !drafts.iter().any(|draft| draft.id == doc.id))
            .collect();
        docs.extend(drafts.iter().cloned());
        Ok(docs)
    }
}

#[async_trait]
impl ContentApi for MemoryContentApi {
    async fn master_ref(&self) -> CmsResult<String> {
        Ok(MEMORY_MASTER_REF.to_string())
    }

    async fn search(&self, request: SearchRequest<'_>) -> CmsResult<SearchResponse> {
        let mut matched = Vec::new();
        for doc in self.documents_at(request.reference).await? {
            if eval_all(request.predicates, &doc)? {
                matched.push(doc);
            }
        }

        let options = request.options;
        let mut keys = Vec::with_capacity(options.orderings.len());
        for ordering in &options.orderings {
            keys.push((parse_path(&ordering.field)?, ordering.direction));
        }
        matched.sort_by(|a, b| {
            keys.iter()
                .map(|(path, direction)| {
                    let ord = compare_values(&resolve_value(a, path), &resolve_value(b, path));
                    match direction {
                        Direction::Asc => ord,
                        Direction::Desc => ord.reverse(),
                    }
                })
                .find(|ord| ord.is_ne())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        if let Some(after) = &options.after {
            if let Some(pos) = matched.iter().position(|doc| &doc.id == after) {
                matched.drain(..=pos);
            }
        }

        let page_size = options.effective_page_size();
        let page = options.effective_page();
        let total = matched.len() as u32;
        let total_pages = total.div_ceil(page_size);
        let start = ((page - 1) * page_size) as usize;
        let results: Vec<RawDocument> = matched
            .into_iter()
            .skip(start)
            .take(page_size as usize)
            .collect();

        Ok(SearchResponse {
            page,
            results_per_page: page_size,
            results_size: results.len() as u32,
            total_results_size: total,
            total_pages,
            next_page: (page < total_pages).then(|| format!("?page={}", page + 1)),
            prev_page: (page > 1).then(|| format!("?page={}", page - 1)),
            results,
        })
    }
}
