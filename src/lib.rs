//! strandb - a content-addressed store of analyzed strings
//!
//! Each stored string is fingerprinted with SHA-256, decomposed into a fixed
//! set of derived properties, persisted in an append-only checksummed log,
//! and made queryable by structured parameters or free-text phrases.

pub mod analysis;
pub mod cli;
pub mod http_server;
pub mod observability;
pub mod query;
pub mod record;
pub mod rest_api;
pub mod storage;
pub mod store;
