//! Checks applied to documents before they are rendered as pages.

use thiserror::Error;

use super::model::Document;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("document id cannot be empty")]
    EmptyId,
    #[error("document type cannot be empty")]
    EmptyType,
    #[error("document {id} has no uid")]
    MissingUid { id: String },
    #[error("document {id} has an empty uid")]
    EmptyUid { id: String },
    #[error("expected a `{expected}` document, got `{found}`")]
    TypeMismatch { expected: String, found: String },
}

/// Validate that a document has the minimum required fields.
pub fn validate_document_fields<D>(doc: &Document<D>) -> Result<(), ValidationError> {
    if doc.id.is_empty() {
        return Err(ValidationError::EmptyId);
    }
    if doc.doc_type.is_empty() {
        return Err(ValidationError::EmptyType);
    }
    Ok(())
}

/// Validate a document that is addressed by uid, such as a post page.
pub fn validate_routable<D>(doc: &Document<D>, expected_type: &str) -> Result<(), ValidationError> {
    validate_document_fields(doc)?;
    if doc.doc_type != expected_type {
        return Err(ValidationError::TypeMismatch {
            expected: expected_type.to_string(),
            found: doc.doc_type.clone(),
        });
    }
    match doc.uid.as_deref() {
        None => Err(ValidationError::MissingUid { id: doc.id.clone() }),
        Some("") => Err(ValidationError::EmptyUid { id: doc.id.clone() }),
        Some(_) => Ok(()),
    }
}
