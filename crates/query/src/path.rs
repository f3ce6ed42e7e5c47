// Field paths as used by predicates and orderings.
//
// `document.<field>` addresses document metadata; `my.<type>.<field>` addresses
// a custom-type field and is unset on documents of any other type.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde_json::Value;
use spacetraveling_core::document::date::{format_publication_date, parse_publication_date};
use spacetraveling_core::RawDocument;

use crate::eval::EvalError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldPath<'a> {
    /// The whole document, for full-text search.
    Document,
    Meta(MetaField),
    Custom {
        doc_type: &'a str,
        field: Vec<&'a str>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaField {
    Id,
    Type,
    Tags,
    Lang,
    FirstPublicationDate,
    LastPublicationDate,
}

/// Parse a dotted field path.
pub fn parse_path(path: &str) -> Result<FieldPath<'_>, EvalError> {
    if path == "document" {
        return Ok(FieldPath::Document);
    }
    if let Some(field) = path.strip_prefix("document.") {
        let meta = match field {
            "id" => MetaField::Id,
            "type" => MetaField::Type,
            "tags" => MetaField::Tags,
            "lang" => MetaField::Lang,
            "first_publication_date" => MetaField::FirstPublicationDate,
            "last_publication_date" => MetaField::LastPublicationDate,
            _ => return Err(EvalError::UnknownPath(path.to_string())),
        };
        return Ok(FieldPath::Meta(meta));
    }
    if let Some(rest) = path.strip_prefix("my.") {
        let mut parts = rest.split('.');
        let doc_type = parts.next().filter(|s| !s.is_empty());
        let field: Vec<&str> = parts.collect();
        if let Some(doc_type) = doc_type {
            if !field.is_empty() && field.iter().all(|s| !s.is_empty()) {
                return Ok(FieldPath::Custom { doc_type, field });
            }
        }
    }
    Err(EvalError::UnknownPath(path.to_string()))
}

/// Read the value at `path`, or `Null` when unset.
pub fn resolve_value(doc: &RawDocument, path: &FieldPath<'_>) -> Value {
    match path {
        FieldPath::Document => serde_json::to_value(doc).unwrap_or(Value::Null),
        FieldPath::Meta(meta) => match meta {
            MetaField::Id => Value::String(doc.id.clone()),
            MetaField::Type => Value::String(doc.doc_type.clone()),
            MetaField::Tags => Value::Array(doc.tags.iter().cloned().map(Value::String).collect()),
            MetaField::Lang => doc.lang.clone().map(Value::String).unwrap_or(Value::Null),
            MetaField::FirstPublicationDate => date_value(doc.first_publication_date.as_ref()),
            MetaField::LastPublicationDate => date_value(doc.last_publication_date.as_ref()),
        },
        FieldPath::Custom { doc_type, field } => {
            if doc.doc_type != *doc_type {
                return Value::Null;
            }
            if field.as_slice() == ["uid"] {
                return doc.uid.clone().map(Value::String).unwrap_or(Value::Null);
            }
            let mut current = doc.data.get(field[0]);
            for key in &field[1..] {
                current = current.and_then(|v| v.get(key));
            }
            current.cloned().unwrap_or(Value::Null)
        }
    }
}

/// Read a date at `path`. Custom fields must hold a timestamp string.
pub fn resolve_date(
    doc: &RawDocument,
    path: &FieldPath<'_>,
) -> Result<Option<DateTime<Utc>>, EvalError> {
    match path {
        FieldPath::Meta(MetaField::FirstPublicationDate) => Ok(doc.first_publication_date),
        FieldPath::Meta(MetaField::LastPublicationDate) => Ok(doc.last_publication_date),
        _ => match resolve_value(doc, path) {
            Value::Null => Ok(None),
            Value::String(raw) => parse_publication_date(&raw)
                .map(Some)
                .map_err(|e| EvalError::TypeError(e.to_string())),
            other => Err(EvalError::TypeError(format!("expected a date, got {other}"))),
        },
    }
}

/// Total order over field values used for sorting. Unset values sort first.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => Ordering::Less,
        (_, Value::Null) => Ordering::Greater,
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => a.to_string().cmp(&b.to_string()),
    }
}

fn date_value(date: Option<&DateTime<Utc>>) -> Value {
    date.map(|d| Value::String(format_publication_date(d)))
        .unwrap_or(Value::Null)
}
