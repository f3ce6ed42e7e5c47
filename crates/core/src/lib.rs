//! Core domain types for the spacetraveling blog.
//!
//! Holds the CMS document model, the rules that turn documents into site
//! paths, and the read-time estimate shown on every post.

pub mod document;
pub mod link;
pub mod preview;
pub mod read_time;

pub use document::model::{
    Banner, ContentSection, Document, PostData, PostDocument, RawDocument, POST_DOCUMENT_TYPE,
};
pub use link::{link_resolver, LinkTarget};
pub use preview::PreviewData;
pub use read_time::estimate_read_time;
