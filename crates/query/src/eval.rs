// In-memory predicate evaluator, used by the in-process content source.

use serde_json::Value;
use spacetraveling_core::RawDocument;

use crate::path::{parse_path, resolve_date, resolve_value};
use crate::predicate::{Predicate, PredicateValue};

#[derive(Debug, thiserror::Error)]
pub enum EvalError {
    #[error("unknown field path: {0}")]
    UnknownPath(String),
    #[error("type error: {0}")]
    TypeError(String),
}

/// True when `doc` satisfies every predicate.
pub fn eval_all(predicates: &[Predicate], doc: &RawDocument) -> Result<bool, EvalError> {
    for predicate in predicates {
        if !eval_predicate(predicate, doc)? {
            return Ok(false);
        }
    }
    Ok(true)
}

pub fn eval_predicate(predicate: &Predicate, doc: &RawDocument) -> Result<bool, EvalError> {
    let path = parse_path(predicate.path())?;
    match predicate {
        Predicate::At(_, expected) => Ok(matches(expected, &resolve_value(doc, &path))),
        Predicate::Not(_, expected) => Ok(!matches(expected, &resolve_value(doc, &path))),
        Predicate::Any(_, candidates) => {
            let value = resolve_value(doc, &path);
            Ok(candidates.iter().any(|c| matches(c, &value)))
        }
        Predicate::In(_, ids) => match resolve_value(doc, &path) {
            Value::String(s) => Ok(ids.contains(&s)),
            Value::Null => Ok(false),
            other => Err(EvalError::TypeError(format!(
                "in() expects a text field, got {other}"
            ))),
        },
        Predicate::Fulltext(_, needle) => {
            let needle = needle.to_lowercase();
            Ok(contains_text(&resolve_value(doc, &path), &needle))
        }
        Predicate::Has(_) => Ok(!resolve_value(doc, &path).is_null()),
        Predicate::Missing(_) => Ok(resolve_value(doc, &path).is_null()),
        Predicate::DateAfter(_, bound) => Ok(resolve_date(doc, &path)?.is_some_and(|d| d > *bound)),
        Predicate::DateBefore(_, bound) => {
            Ok(resolve_date(doc, &path)?.is_some_and(|d| d < *bound))
        }
    }
}

/// Scalar equality; list fields match when any element does.
fn matches(expected: &PredicateValue, actual: &Value) -> bool {
    match actual {
        Value::Array(items) => items.iter().any(|item| matches(expected, item)),
        _ => match expected {
            PredicateValue::Text(s) => actual.as_str() == Some(s.as_str()),
            PredicateValue::Number(n) => actual.as_f64() == Some(*n),
            PredicateValue::Bool(b) => actual.as_bool() == Some(*b),
        },
    }
}

fn contains_text(value: &Value, needle: &str) -> bool {
    match value {
        Value::String(s) => s.to_lowercase().contains(needle),
        Value::Array(items) => items.iter().any(|v| contains_text(v, needle)),
        Value::Object(map) => map.values().any(|v| contains_text(v, needle)),
        _ => false,
    }
}
