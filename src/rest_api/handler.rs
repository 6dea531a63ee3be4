//! # REST API Handler
//!
//! Transport-independent request handling for the strings API. The axum
//! routes in `http_server` only extract inputs and render outputs; every
//! status decision is made here through [`RestError`].

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::analysis::content_identity;
use crate::observability::Event;
use crate::query::{evaluate_store, interpret, FilterModel};
use crate::record::StringRecord;
use crate::store::{RecordStore, StoreError};

use super::errors::{RestError, RestResult};
use super::response::{ListResponse, NaturalLanguageResponse};

/// Body field carrying the string to store
pub const VALUE_FIELD: &str = "value";

/// Query parameter carrying free text
pub const QUERY_PARAM: &str = "query";

/// Handles strings API requests against an injected store
#[derive(Clone)]
pub struct StringsHandler {
    store: Arc<dyn RecordStore>,
}

impl StringsHandler {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// The backing store
    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    /// Analyze and store a new string from a raw JSON body.
    pub fn create(&self, body: &[u8]) -> RestResult<StringRecord> {
        let value = extract_value(body)?;
        let record = StringRecord::new(value);

        match self.store.insert(record.clone()) {
            Ok(()) => {
                tracing::info!(
                    event = Event::RecordCreated.as_str(),
                    id = record.id(),
                    length = record.properties().length,
                    "record created"
                );
                Ok(record)
            }
            Err(StoreError::Duplicate { .. }) => {
                tracing::info!(
                    event = Event::RecordRejectedDuplicate.as_str(),
                    id = record.id(),
                    "duplicate value rejected"
                );
                Err(RestError::Conflict)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Exact lookup by value
    pub fn get(&self, value: &str) -> RestResult<StringRecord> {
        self.store.get_by_value(value)?.ok_or(RestError::NotFound)
    }

    /// Filter by structured query parameters
    pub fn list(&self, params: &HashMap<String, String>) -> RestResult<ListResponse> {
        let filter = FilterModel::from_params(params)?;
        let data = evaluate_store(self.store.as_ref(), &filter)?;
        Ok(ListResponse::new(data, filter))
    }

    /// Filter by a free-text query
    pub fn filter_natural(
        &self,
        params: &HashMap<String, String>,
    ) -> RestResult<NaturalLanguageResponse> {
        let query = params
            .get(QUERY_PARAM)
            .filter(|q| !q.is_empty())
            .ok_or(RestError::MissingParam(QUERY_PARAM))?;

        let interpreted = match interpret(query) {
            Ok(interpreted) => interpreted,
            Err(e) => {
                tracing::info!(
                    event = Event::QueryUnparseable.as_str(),
                    query = %query,
                    "natural language query not understood"
                );
                return Err(e.into());
            }
        };

        tracing::debug!(
            event = Event::QueryTranslated.as_str(),
            query = %query,
            filters = ?interpreted.parsed_filters,
            "natural language query translated"
        );

        let data = evaluate_store(self.store.as_ref(), &interpreted.parsed_filters)?;
        Ok(NaturalLanguageResponse::new(data, interpreted))
    }

    /// Remove a stored value. Deleting an absent value is not found, every time.
    pub fn delete(&self, value: &str) -> RestResult<()> {
        match self.store.delete_by_value(value)? {
            0 => Err(RestError::NotFound),
            _ => {
                tracing::info!(
                    event = Event::RecordDeleted.as_str(),
                    id = %content_identity(value),
                    "record deleted"
                );
                Ok(())
            }
        }
    }
}

/// Pulls the string `value` out of a JSON object body.
fn extract_value(body: &[u8]) -> RestResult<String> {
    let parsed: Value = serde_json::from_slice(body).map_err(|_| RestError::InvalidBody)?;
    let object = match parsed {
        Value::Object(map) if !map.is_empty() => map,
        _ => return Err(RestError::InvalidBody),
    };

    match object.get(VALUE_FIELD) {
        None => Err(RestError::MissingField(VALUE_FIELD)),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(RestError::InvalidFieldType(VALUE_FIELD)),
    }
}
