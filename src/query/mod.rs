//! Filtering
//!
//! Two front ends feed one model:
//! - structured query parameters ([`FilterModel::from_params`])
//! - free-text queries ([`translate`])
//!
//! Evaluation is a linear scan over a store snapshot.

mod errors;
mod evaluator;
mod filter;
mod natural;
mod params;

pub use errors::{QueryError, QueryResult};
pub use evaluator::{evaluate, evaluate_store};
pub use filter::FilterModel;
pub use natural::{interpret, translate, InterpretedQuery};
pub use params::{
    PARAM_CONTAINS_CHARACTER, PARAM_IS_PALINDROME, PARAM_MAX_LENGTH, PARAM_MIN_LENGTH,
    PARAM_WORD_COUNT,
};
