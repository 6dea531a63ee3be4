//! CLI argument definitions using clap
//!
//! Commands:
//! - strandb init --config <path>
//! - strandb serve --config <path>
//! - strandb analyze <VALUE>
//! - strandb translate <QUERY>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// strandb - a content-addressed store of analyzed strings
#[derive(Parser, Debug)]
#[command(name = "strandb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Initialize a new strandb data directory
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./strandb.json")]
        config: PathBuf,
    },

    /// Open the store and serve the HTTP API until Ctrl-C
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./strandb.json")]
        config: PathBuf,

        /// Override the configured HTTP port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print the derived properties of a string
    Analyze {
        /// String to analyze
        value: String,
    },

    /// Show how a natural-language query is interpreted
    Translate {
        /// Free-text query
        query: String,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_defaults() {
        let cli = Cli::try_parse_from(["strandb", "serve"]).unwrap();
        match cli.command {
            Command::Serve { config, port } => {
                assert_eq!(config, PathBuf::from("./strandb.json"));
                assert_eq!(port, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_translate_takes_positional_query() {
        let cli = Cli::try_parse_from(["strandb", "translate", "single word palindromes"]).unwrap();
        assert!(matches!(cli.command, Command::Translate { ref query } if query == "single word palindromes"));
    }
}
