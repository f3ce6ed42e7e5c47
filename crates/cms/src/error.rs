use spacetraveling_core::document::validate::ValidationError;
use spacetraveling_query::EvalError;

/// Errors raised while talking to the content API.
#[derive(Debug, thiserror::Error)]
pub enum CmsError {
    #[error("invalid content API endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("content API request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("content API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("failed to decode content API response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("content API exposes no master ref")]
    NoMasterRef,

    #[error("invalid query: {0}")]
    Query(#[from] EvalError),

    #[error("invalid document: {0}")]
    Validation(#[from] ValidationError),
}

pub type CmsResult<T> = Result<T, CmsError>;
