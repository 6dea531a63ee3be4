//! CLI module for strandb
//!
//! Provides command-line interface for:
//! - init: Create the data directory and an empty record log
//! - serve: Boot the durable store and serve HTTP until Ctrl-C
//! - analyze: One-shot property analysis
//! - translate: One-shot natural-language query interpretation

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{analyze_value, init, run, run_command, serve, translate_query, Config};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_error, write_response};
