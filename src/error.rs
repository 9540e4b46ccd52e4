//! Error types for pg_select.

use thiserror::Error;

/// Errors raised when resolving the final bind-value list.
///
/// Rendering itself never fails for a well-formed tree; the only runtime
/// error is a mismatch between the query's free parameters and the
/// external values supplied for them.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BindError {
    #[error("query has {expected} free parameter(s) but only {supplied} external value(s) were supplied")]
    NotEnoughValues { expected: usize, supplied: usize },

    #[error("query has {expected} free parameter(s) but {supplied} external value(s) were supplied")]
    TooManyValues { expected: usize, supplied: usize },
}
