//! Pure compliance evaluation: given a policy, an API call block and a
//! described resource, decides whether each `compliant` check passes.
//! Contains no I/O — callers (`dispatcher`, `scheduler`) own fetching
//! the resource and storing the result.

pub mod check;
pub mod condition;
pub mod error;

pub use check::evaluate_api_call;
pub use error::{EvaluatorError, Result};
