//! CLI command implementations
//!
//! `serve` follows a fixed boot order: load config, install logging, open
//! the store (replaying and verifying the log), then accept HTTP traffic.
//! The store is closed only after the server has drained.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::analysis::analyze;
use crate::http_server::{HttpServer, HttpServerConfig};
use crate::observability::{init_logging, Event, LogFormat, LOG_LEVELS};
use crate::query::interpret;
use crate::storage::{log_path, LogWriter};
use crate::store::{FileRecordStore, RecordStore};

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{write_error, write_response};

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Data directory (required)
    pub data_dir: String,

    /// HTTP listener settings
    #[serde(default)]
    pub http: HttpServerConfig,

    /// Log level (optional, default "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log output format (optional, default "pretty")
    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        Self::from_json(&content)
    }

    /// Parse and validate configuration text
    pub fn from_json(content: &str) -> CliResult<Self> {
        let config: Config = serde_json::from_str(content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.data_dir.trim().is_empty() {
            return Err(CliError::config_error("data_dir must not be empty"));
        }

        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(CliError::config_error(format!(
                "Invalid log_level: '{}'. Expected one of: {}",
                self.log_level,
                LOG_LEVELS.join(", ")
            )));
        }

        if self.http.host.trim().is_empty() {
            return Err(CliError::config_error("http.host must not be empty"));
        }

        Ok(())
    }

    /// Get data directory as Path
    pub fn data_path(&self) -> &Path {
        Path::new(&self.data_dir)
    }
}

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { config } => init(&config),
        Command::Serve { config, port } => serve(&config, port),
        Command::Analyze { value } => analyze_value(&value),
        Command::Translate { query } => translate_query(&query),
    }
}

/// Initialize a new data directory
///
/// Creates `<data_dir>/data/strings.dat` empty. Does not start a server.
pub fn init(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;
    let data_dir = config.data_path();

    if is_initialized(data_dir) {
        return Err(CliError::already_initialized());
    }

    let writer = LogWriter::open(data_dir).map_err(|e| {
        CliError::io_error(format!(
            "Failed to create record log under {:?}: {}",
            data_dir, e
        ))
    })?;

    tracing::info!(
        event = Event::DataDirInitialized.as_str(),
        path = %writer.path().display(),
        "data directory initialized"
    );

    write_response(&json!({
        "initialized": true,
        "log_path": writer.path().display().to_string(),
    }))
}

/// Serve the HTTP API over the durable store until Ctrl-C
pub fn serve(config_path: &Path, port: Option<u16>) -> CliResult<()> {
    let mut config = Config::load(config_path)?;
    if let Some(port) = port {
        config.http.port = port;
    }

    let data_dir = config.data_path();
    if !is_initialized(data_dir) {
        return Err(CliError::not_initialized());
    }

    init_logging(&config.log_level, config.log_format)
        .map_err(|e| CliError::boot_failed(e.to_string()))?;

    tracing::info!(
        event = Event::ConfigLoaded.as_str(),
        config = %config_path.display(),
        data_dir = %config.data_dir,
        "configuration loaded"
    );

    let store: Arc<dyn RecordStore> = Arc::new(
        FileRecordStore::open(data_dir)
            .map_err(|e| CliError::boot_failed(format!("Failed to open record store: {}", e)))?,
    );

    let server = HttpServer::with_config(config.http.clone(), Arc::clone(&store));

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    let served = rt.block_on(server.start());

    // Close even if the server failed, so the log is synced.
    let closed = store.close();

    served.map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))?;
    closed.map_err(|e| CliError::io_error(format!("Failed to close record store: {}", e)))?;

    tracing::info!(event = Event::ShutdownComplete.as_str(), "shutdown complete");
    Ok(())
}

/// Print the property bundle of `value`
pub fn analyze_value(value: &str) -> CliResult<()> {
    write_response(&analyze(value))
}

/// Print how `query` is interpreted
pub fn translate_query(query: &str) -> CliResult<()> {
    match interpret(query) {
        Ok(interpreted) => write_response(&interpreted),
        Err(e) => {
            let err = CliError::query_error(e.to_string());
            write_error(err.code_str(), err.message())?;
            Err(err)
        }
    }
}

fn is_initialized(data_dir: &Path) -> bool {
    log_path(data_dir).exists()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, data_dir: &Path) -> std::path::PathBuf {
        let path = dir.path().join("strandb.json");
        let body = json!({ "data_dir": data_dir.display().to_string() });
        fs::write(&path, body.to_string()).unwrap();
        path
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::from_json(r#"{"data_dir": "/tmp/strandb"}"#).unwrap();
        assert_eq!(config.http.port, 54321);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_config_rejects_missing_data_dir() {
        let err = Config::from_json(r#"{"log_level": "info"}"#).unwrap_err();
        assert_eq!(err.code_str(), "STRANDB_CLI_CONFIG_ERROR");
    }

    #[test]
    fn test_config_rejects_empty_data_dir() {
        assert!(Config::from_json(r#"{"data_dir": "  "}"#).is_err());
    }

    #[test]
    fn test_config_rejects_unknown_log_level() {
        let err = Config::from_json(r#"{"data_dir": "d", "log_level": "loud"}"#).unwrap_err();
        assert!(err.message().contains("loud"));
    }

    #[test]
    fn test_config_full() {
        let config = Config::from_json(
            r#"{
                "data_dir": "d",
                "http": {"host": "127.0.0.1", "port": 8080, "cors_origins": ["http://x"]},
                "log_level": "debug",
                "log_format": "json"
            }"#,
        )
        .unwrap();
        assert_eq!(config.http.socket_addr(), "127.0.0.1:8080");
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_init_creates_log_once() {
        let temp_dir = TempDir::new().unwrap();
        let data_dir = temp_dir.path().join("db");
        let config_path = write_config(&temp_dir, &data_dir);

        init(&config_path).unwrap();
        assert!(log_path(&data_dir).exists());

        let err = init(&config_path).unwrap_err();
        assert_eq!(err.code_str(), "STRANDB_CLI_ALREADY_INITIALIZED");
    }

    #[test]
    fn test_serve_requires_init() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = write_config(&temp_dir, &temp_dir.path().join("never"));

        let err = serve(&config_path, Some(0)).unwrap_err();
        assert_eq!(err.code_str(), "STRANDB_CLI_NOT_INITIALIZED");
    }

    #[test]
    fn test_translate_unparseable_is_query_error() {
        let err = translate_query("banana bread").unwrap_err();
        assert_eq!(err.code_str(), "STRANDB_CLI_QUERY_ERROR");
        assert!(translate_query("palindromes").is_ok());
    }

    #[test]
    fn test_missing_config_file() {
        let err = Config::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert_eq!(err.code_str(), "STRANDB_CLI_CONFIG_ERROR");
    }
}
