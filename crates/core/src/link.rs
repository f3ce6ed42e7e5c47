//! Document → site path mapping.

use crate::document::model::Document;

/// Document type the resolver links to post pages.
///
/// Posts are stored as `post` (see [`crate::POST_DOCUMENT_TYPE`]), so real
/// post documents do not match this and resolve to `/`. Kept as-is until the
/// content model and the resolver are reconciled.
pub const LINKED_POST_TYPE: &str = "posts";

/// Anything with a document type and an optional uid.
pub trait LinkTarget {
    fn link_type(&self) -> &str;
    fn link_uid(&self) -> Option<&str>;
}

impl<D> LinkTarget for Document<D> {
    fn link_type(&self) -> &str {
        &self.doc_type
    }

    fn link_uid(&self) -> Option<&str> {
        self.uid.as_deref()
    }
}

/// Resolve a document to a site-relative path.
///
/// `posts` documents map to `/post/{uid}`; everything else, including a
/// `posts` document with no uid, maps to `/`.
pub fn link_resolver<T: LinkTarget + ?Sized>(doc: &T) -> String {
    match (doc.link_type(), doc.link_uid()) {
        (LINKED_POST_TYPE, Some(uid)) if !uid.is_empty() => format!("/post/{uid}"),
        _ => "/".to_string(),
    }
}
