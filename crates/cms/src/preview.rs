use spacetraveling_core::RawDocument;
use spacetraveling_query::QueryOptions;

use crate::api::Client;
use crate::error::CmsResult;

/// Resolves an editor's preview link to the page that shows the previewed
/// document.
#[derive(Debug, Clone)]
pub struct PreviewResolver {
    client: Client,
    token: String,
    document_id: Option<String>,
}

impl PreviewResolver {
    pub(crate) fn new(client: Client, token: String, document_id: Option<String>) -> Self {
        Self {
            client,
            token,
            document_id,
        }
    }

    /// Resolve the redirect target.
    ///
    /// - `None` when no preview token was supplied.
    /// - `default_url` when there is no document id, or the document is not
    ///   visible under the preview ref.
    /// - otherwise whatever `link_resolver` maps the document to.
    ///
    /// The token is always checked against the content API, even without a
    /// document id. Content API failures, including a rejected ref, are
    /// returned as errors.
    pub async fn resolve<F>(&self, link_resolver: F, default_url: &str) -> CmsResult<Option<String>>
    where
        F: Fn(&RawDocument) -> String,
    {
        if self.token.is_empty() {
            return Ok(None);
        }
        let preview = self.client.with_preview_ref(self.token.as_str());
        let Some(document_id) = self.document_id.as_deref().filter(|id| !id.is_empty()) else {
            preview
                .query(&[], &QueryOptions::new().page_size(1))
                .await?;
            return Ok(Some(default_url.to_string()));
        };

        let url = match preview.get_by_id(document_id).await? {
            Some(doc) => link_resolver(&doc),
            None => {
                tracing::debug!(document_id, "previewed document not found, using default url");
                default_url.to_string()
            }
        };
        Ok(Some(url))
    }
}
