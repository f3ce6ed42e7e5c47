//! Query language for the content API: predicates, orderings and paging
//! options, plus an evaluator that applies them to documents in memory.

pub mod eval;
pub mod options;
pub mod path;
pub mod predicate;

pub use eval::{eval_all, eval_predicate, EvalError};
pub use options::{Direction, Ordering, QueryOptions};
pub use predicate::{to_query_string, Predicate, PredicateValue};
