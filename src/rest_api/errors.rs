//! # REST API Errors
//!
//! Error types for the strings REST API.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::query::QueryError;
use crate::store::StoreError;

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;

/// REST API errors
#[derive(Debug, Clone, Error)]
pub enum RestError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Body is not a JSON object
    #[error("Invalid request body")]
    InvalidBody,

    /// Required body field absent
    #[error("Missing '{0}' field")]
    MissingField(&'static str),

    /// Body field present with the wrong JSON type
    #[error("Invalid data type for '{0}' (must be string)")]
    InvalidFieldType(&'static str),

    /// Required query parameter absent
    #[error("Missing '{0}' parameter")]
    MissingParam(&'static str),

    /// Structured filter parameter malformed
    #[error("Invalid query parameter values or types")]
    InvalidQueryParam(String),

    /// Natural-language query matched no rule
    #[error("Unable to parse natural language query")]
    UnparseableQuery,

    /// Value already stored
    #[error("String already exists in the system")]
    Conflict,

    /// Value not stored
    #[error("String does not exist in the system")]
    NotFound,

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Store or I/O failure
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RestError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            RestError::InvalidBody => StatusCode::BAD_REQUEST,
            RestError::MissingField(_) => StatusCode::BAD_REQUEST,
            RestError::MissingParam(_) => StatusCode::BAD_REQUEST,
            RestError::InvalidQueryParam(_) => StatusCode::BAD_REQUEST,
            RestError::UnparseableQuery => StatusCode::BAD_REQUEST,

            // 422 Unprocessable Entity
            RestError::InvalidFieldType(_) => StatusCode::UNPROCESSABLE_ENTITY,

            // 409 Conflict
            RestError::Conflict => StatusCode::CONFLICT,

            // 404 Not Found
            RestError::NotFound => StatusCode::NOT_FOUND,

            // 500 Internal Server Error
            RestError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for RestError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate { .. } => RestError::Conflict,
            other => RestError::Internal(other.to_string()),
        }
    }
}

impl From<QueryError> for RestError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::InvalidParam { .. } => RestError::InvalidQueryParam(err.to_string()),
            QueryError::Unparseable { .. } => RestError::UnparseableQuery,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl From<RestError> for ErrorResponse {
    fn from(err: RestError) -> Self {
        Self {
            code: err.status_code().as_u16(),
            error: err.to_string(),
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        match &self {
            RestError::Internal(detail) => {
                tracing::error!(error = %detail, "request failed");
            }
            RestError::InvalidQueryParam(detail) => {
                tracing::debug!(detail = %detail, "rejected query parameter");
            }
            _ => {}
        }
        let status = self.status_code();
        let body = Json(ErrorResponse::from(self));
        (status, body).into_response()
    }
}
