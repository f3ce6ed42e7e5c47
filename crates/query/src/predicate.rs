//! Content API predicates.
//!
//! Each predicate renders as `[name(path, value)]`; a query is a list of
//! predicates wrapped in one more pair of brackets (see [`to_query_string`]).

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A literal compared against a document field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PredicateValue {
    Text(String),
    Number(f64),
    Bool(bool),
}

impl From<&str> for PredicateValue {
    fn from(value: &str) -> Self {
        PredicateValue::Text(value.to_string())
    }
}

impl From<String> for PredicateValue {
    fn from(value: String) -> Self {
        PredicateValue::Text(value)
    }
}

impl From<i64> for PredicateValue {
    fn from(value: i64) -> Self {
        PredicateValue::Number(value as f64)
    }
}

impl From<f64> for PredicateValue {
    fn from(value: f64) -> Self {
        PredicateValue::Number(value)
    }
}

impl From<bool> for PredicateValue {
    fn from(value: bool) -> Self {
        PredicateValue::Bool(value)
    }
}

impl fmt::Display for PredicateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredicateValue::Text(s) => write_quoted(f, s),
            PredicateValue::Number(n) => write!(f, "{n}"),
            PredicateValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Predicate {
    /// Field equals the value (or, for list fields, contains it).
    At(String, PredicateValue),
    /// Negation of `At`.
    Not(String, PredicateValue),
    /// Field equals any of the values.
    Any(String, Vec<PredicateValue>),
    /// Document id or uid is one of the values.
    In(String, Vec<String>),
    /// Case-insensitive text search.
    Fulltext(String, String),
    /// Field is set.
    Has(String),
    /// Field is not set.
    Missing(String),
    DateAfter(String, DateTime<Utc>),
    DateBefore(String, DateTime<Utc>),
}

impl Predicate {
    pub fn at(path: impl Into<String>, value: impl Into<PredicateValue>) -> Self {
        Predicate::At(path.into(), value.into())
    }

    pub fn not(path: impl Into<String>, value: impl Into<PredicateValue>) -> Self {
        Predicate::Not(path.into(), value.into())
    }

    pub fn any<V: Into<PredicateValue>>(
        path: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        Predicate::Any(path.into(), values.into_iter().map(Into::into).collect())
    }

    pub fn in_list<S: Into<String>>(
        path: impl Into<String>,
        values: impl IntoIterator<Item = S>,
    ) -> Self {
        Predicate::In(path.into(), values.into_iter().map(Into::into).collect())
    }

    pub fn fulltext(path: impl Into<String>, text: impl Into<String>) -> Self {
        Predicate::Fulltext(path.into(), text.into())
    }

    pub fn has(path: impl Into<String>) -> Self {
        Predicate::Has(path.into())
    }

    pub fn missing(path: impl Into<String>) -> Self {
        Predicate::Missing(path.into())
    }

    pub fn date_after(path: impl Into<String>, date: DateTime<Utc>) -> Self {
        Predicate::DateAfter(path.into(), date)
    }

    pub fn date_before(path: impl Into<String>, date: DateTime<Utc>) -> Self {
        Predicate::DateBefore(path.into(), date)
    }

    /// The field path this predicate reads.
    pub fn path(&self) -> &str {
        match self {
            Predicate::At(p, _)
            | Predicate::Not(p, _)
            | Predicate::Any(p, _)
            | Predicate::In(p, _)
            | Predicate::Fulltext(p, _)
            | Predicate::Has(p)
            | Predicate::Missing(p)
            | Predicate::DateAfter(p, _)
            | Predicate::DateBefore(p, _) => p,
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::At(path, value) => write!(f, "[at({path}, {value})]"),
            Predicate::Not(path, value) => write!(f, "[not({path}, {value})]"),
            Predicate::Any(path, values) => {
                write!(f, "[any({path}, [")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{value}")?;
                }
                f.write_str("])]")
            }
            Predicate::In(path, values) => {
                write!(f, "[in({path}, [")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write_quoted(f, value)?;
                }
                f.write_str("])]")
            }
            Predicate::Fulltext(path, text) => {
                write!(f, "[fulltext({path}, ")?;
                write_quoted(f, text)?;
                f.write_str(")]")
            }
            Predicate::Has(path) => write!(f, "[has({path})]"),
            Predicate::Missing(path) => write!(f, "[missing({path})]"),
            Predicate::DateAfter(path, date) => {
                write!(f, "[date.after({path}, {})]", date.timestamp_millis())
            }
            Predicate::DateBefore(path, date) => {
                write!(f, "[date.before({path}, {})]", date.timestamp_millis())
            }
        }
    }
}

/// Render the `q` parameter for a list of predicates.
pub fn to_query_string(predicates: &[Predicate]) -> String {
    let mut out = String::from("[");
    for predicate in predicates {
        out.push_str(&predicate.to_string());
    }
    out.push(']');
    out
}

fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_str("\"")?;
    for c in s.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            _ => write!(f, "{c}")?,
        }
    }
    f.write_str("\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn at_document_type() {
        let p = Predicate::at("document.type", "post");
        assert_eq!(p.to_string(), "[at(document.type, \"post\")]");
    }

    #[test]
    fn query_string_wraps_all_predicates() {
        let q = to_query_string(&[
            Predicate::at("document.type", "post"),
            Predicate::at("my.post.uid", "hello"),
        ]);
        assert_eq!(
            q,
            "[[at(document.type, \"post\")][at(my.post.uid, \"hello\")]]"
        );
    }

    #[test]
    fn empty_query_string() {
        assert_eq!(to_query_string(&[]), "[]");
    }

    #[test]
    fn list_predicates() {
        assert_eq!(
            Predicate::any("document.tags", ["rust", "web"]).to_string(),
            "[any(document.tags, [\"rust\", \"web\"])]"
        );
        assert_eq!(
            Predicate::in_list("document.id", ["A", "B"]).to_string(),
            "[in(document.id, [\"A\", \"B\"])]"
        );
    }

    #[test]
    fn scalar_values_are_not_quoted() {
        assert_eq!(
            Predicate::at("my.post.featured", true).to_string(),
            "[at(my.post.featured, true)]"
        );
        assert_eq!(
            Predicate::not("my.post.rating", 3_i64).to_string(),
            "[not(my.post.rating, 3)]"
        );
    }

    #[test]
    fn date_predicates_use_epoch_millis() {
        let date = Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(
            Predicate::date_after("document.first_publication_date", date).to_string(),
            "[date.after(document.first_publication_date, 1609459200000)]"
        );
    }

    #[test]
    fn quotes_are_escaped() {
        assert_eq!(
            Predicate::fulltext("document", "say \"hi\"").to_string(),
            "[fulltext(document, \"say \\\"hi\\\"\")]"
        );
    }

    #[test]
    fn path_accessor() {
        assert_eq!(Predicate::missing("my.post.banner").path(), "my.post.banner");
    }
}
