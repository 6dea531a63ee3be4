//! Query errors

use thiserror::Error;

/// Result type for query construction
pub type QueryResult<T> = Result<T, QueryError>;

/// Errors raised while building a filter model
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// A structured parameter is present but malformed
    #[error("Invalid value for query parameter '{name}': {reason}")]
    InvalidParam { name: String, reason: String },

    /// No natural-language rule matched
    #[error("Unable to parse natural language query")]
    Unparseable { query: String },
}

impl QueryError {
    pub(crate) fn invalid_param(name: &str, reason: impl Into<String>) -> Self {
        QueryError::InvalidParam {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}
