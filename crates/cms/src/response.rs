use serde::{Deserialize, Serialize};
use spacetraveling_core::RawDocument;

/// Root of the content API (`GET {endpoint}`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiRoot {
    pub refs: Vec<ApiRef>,
}

/// A content release. The master ref is the published content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiRef {
    pub id: String,
    #[serde(rename = "ref")]
    pub reference: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(rename = "isMasterRef", default)]
    pub is_master_ref: bool,
}

impl ApiRoot {
    pub fn master_ref(&self) -> Option<&str> {
        self.refs
            .iter()
            .find(|r| r.is_master_ref)
            .map(|r| r.reference.as_str())
    }
}

/// One page of `GET {endpoint}/documents/search`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub page: u32,
    pub results_per_page: u32,
    #[serde(default)]
    pub results_size: u32,
    pub total_results_size: u32,
    pub total_pages: u32,
    #[serde(default)]
    pub next_page: Option<String>,
    #[serde(default)]
    pub prev_page: Option<String>,
    pub results: Vec<RawDocument>,
}
