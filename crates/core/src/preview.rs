//! Preview-mode session payload.

use serde::{Deserialize, Serialize};

/// Data attached to a browser session while an editor previews drafts.
///
/// `ref` is the content API ref the editor's preview token stands for; every
/// fetch made for that session uses it instead of the master ref.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewData {
    #[serde(rename = "ref")]
    pub preview_ref: String,
}

impl PreviewData {
    pub fn new(preview_ref: impl Into<String>) -> Self {
        Self {
            preview_ref: preview_ref.into(),
        }
    }
}
