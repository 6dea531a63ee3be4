//! # strandb REST API Module
//!
//! Request handling for the `/strings` resource: body validation, filter
//! construction, store access and error-to-status mapping.

pub mod errors;
pub mod handler;
pub mod response;

pub use errors::{ErrorResponse, RestError, RestResult};
pub use handler::StringsHandler;
pub use response::{HealthResponse, ListResponse, NaturalLanguageResponse};
