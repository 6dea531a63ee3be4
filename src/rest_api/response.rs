//! # Response Formatting
//!
//! Response bodies for the strings API. Records serialize directly.

use serde::Serialize;

use crate::query::{FilterModel, InterpretedQuery};
use crate::record::StringRecord;

/// Structured filter results
#[derive(Debug, Clone, Serialize)]
pub struct ListResponse {
    pub data: Vec<StringRecord>,
    pub count: usize,
    pub filters_applied: FilterModel,
}

impl ListResponse {
    pub fn new(data: Vec<StringRecord>, filters_applied: FilterModel) -> Self {
        let count = data.len();
        Self {
            data,
            count,
            filters_applied,
        }
    }
}

/// Natural-language filter results
#[derive(Debug, Clone, Serialize)]
pub struct NaturalLanguageResponse {
    pub data: Vec<StringRecord>,
    pub count: usize,
    pub interpreted_query: InterpretedQuery,
}

impl NaturalLanguageResponse {
    pub fn new(data: Vec<StringRecord>, interpreted_query: InterpretedQuery) -> Self {
        let count = data.len();
        Self {
            data,
            count,
            interpreted_query,
        }
    }
}

/// Liveness check body
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
