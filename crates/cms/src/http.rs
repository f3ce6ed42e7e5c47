use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use spacetraveling_query::to_query_string;

use crate::api::{ContentApi, SearchRequest};
use crate::error::{CmsError, CmsResult};
use crate::response::{ApiRoot, SearchResponse};

/// Content API reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpContentApi {
    http: reqwest::Client,
    endpoint: Url,
    search_url: Url,
    access_token: Option<String>,
}

/// Error body returned by the content API.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl HttpContentApi {
    /// Build a client for `endpoint` (e.g. `https://repo.cdn.prismic.io/api/v2`).
    pub fn new(endpoint: &str, access_token: Option<String>) -> CmsResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("spacetraveling/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Self::with_http_client(http, endpoint, access_token)
    }

    pub fn with_http_client(
        http: reqwest::Client,
        endpoint: &str,
        access_token: Option<String>,
    ) -> CmsResult<Self> {
        let trimmed = endpoint.trim_end_matches('/');
        let endpoint = Url::parse(trimmed)
            .map_err(|e| CmsError::InvalidEndpoint(format!("{trimmed}: {e}")))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(CmsError::InvalidEndpoint(format!(
                "{trimmed}: unsupported scheme {}",
                endpoint.scheme()
            )));
        }
        let search_url = Url::parse(&format!("{trimmed}/documents/search"))
            .map_err(|e| CmsError::InvalidEndpoint(format!("{trimmed}: {e}")))?;
        Ok(Self {
            http,
            endpoint,
            search_url,
            access_token: access_token.filter(|t| !t.is_empty()),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &Url,
        params: &[(&str, String)],
    ) -> CmsResult<T> {
        let mut request = self.http.get(url.clone()).query(params);
        if let Some(token) = &self.access_token {
            request = request.query(&[("access_token", token)]);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(api_error(status, &body));
        }
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl ContentApi for HttpContentApi {
    async fn master_ref(&self) -> CmsResult<String> {
        let root: ApiRoot = self.get_json(&self.endpoint, &[]).await?;
        root.master_ref()
            .map(str::to_string)
            .ok_or(CmsError::NoMasterRef)
    }

    async fn search(&self, request: SearchRequest<'_>) -> CmsResult<SearchResponse> {
        let mut params = vec![
            ("ref", request.reference.to_string()),
            ("q", to_query_string(request.predicates)),
        ];
        params.extend(request.options.to_params());

        let page: SearchResponse = self.get_json(&self.search_url, &params).await?;
        tracing::debug!(
            results = page.results.len(),
            total = page.total_results_size,
            "content API search returned"
        );
        Ok(page)
    }
}

fn api_error(status: StatusCode, body: &str) -> CmsError {
    let message = serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|b| b.message.or(b.error))
        .unwrap_or_else(|| body.trim().to_string());
    tracing::warn!(status = status.as_u16(), %message, "content API request rejected");
    CmsError::Api {
        status: status.as_u16(),
        message,
    }
}
