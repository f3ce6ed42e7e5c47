//! Client for the headless content API the blog is published from.
//!
//! [`Client`] is the entry point. It wraps a [`ContentApi`] backend, either
//! [`HttpContentApi`] for the hosted service or [`MemoryContentApi`] for an
//! in-process document set, and can be bound to an editor's preview ref.

pub mod api;
pub mod error;
pub mod http;
pub mod memory;
pub mod preview;
pub mod response;

pub use api::{Client, ContentApi, SearchRequest};
pub use error::{CmsError, CmsResult};
pub use http::HttpContentApi;
pub use memory::{MemoryContentApi, MEMORY_MASTER_REF};
pub use preview::PreviewResolver;
pub use response::{ApiRef, ApiRoot, SearchResponse};
