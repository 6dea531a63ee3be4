//! # strandb HTTP Server Module
//!
//! Axum server exposing the strings API.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/strings` - Create and filter
//! - `/strings/filter-by-natural-language` - Free-text filter
//! - `/strings/*value` - Lookup and delete

pub mod config;
pub mod observability_routes;
pub mod server;
pub mod strings_routes;

pub use config::HttpServerConfig;
pub use server::HttpServer;
