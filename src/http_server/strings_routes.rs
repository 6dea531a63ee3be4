//! Strings HTTP Routes
//!
//! - POST   /strings                                 analyze and store
//! - GET    /strings                                 structured filter
//! - GET    /strings/filter-by-natural-language      free-text filter
//! - GET    /strings/*value                          exact lookup
//! - DELETE /strings/*value                          remove
//!
//! `*value` takes the rest of the path, so stored values may contain `/`.
//! The natural-language route is static and wins over the wildcard.

use std::collections::HashMap;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::rest_api::{RestResult, StringsHandler};

/// Create the strings router
pub fn strings_routes(handler: StringsHandler) -> Router {
    Router::new()
        .route("/strings", get(list_handler).post(create_handler))
        .route(
            "/strings/filter-by-natural-language",
            get(natural_language_handler),
        )
        .route("/strings/*value", get(get_handler).delete(delete_handler))
        .with_state(handler)
}

// ==================
// Handlers
// ==================

async fn create_handler(
    State(handler): State<StringsHandler>,
    body: Bytes,
) -> RestResult<impl IntoResponse> {
    let record = handler.create(&body)?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn get_handler(
    State(handler): State<StringsHandler>,
    Path(value): Path<String>,
) -> RestResult<impl IntoResponse> {
    Ok(Json(handler.get(&value)?))
}

async fn list_handler(
    State(handler): State<StringsHandler>,
    Query(params): Query<HashMap<String, String>>,
) -> RestResult<impl IntoResponse> {
    Ok(Json(handler.list(&params)?))
}

async fn natural_language_handler(
    State(handler): State<StringsHandler>,
    Query(params): Query<HashMap<String, String>>,
) -> RestResult<impl IntoResponse> {
    Ok(Json(handler.filter_natural(&params)?))
}

async fn delete_handler(
    State(handler): State<StringsHandler>,
    Path(value): Path<String>,
) -> RestResult<StatusCode> {
    handler.delete(&value)?;
    Ok(StatusCode::NO_CONTENT)
}
