//! Observability for strandb
//!
//! Logging goes through `tracing`. The CLI installs a `tracing-subscriber`
//! registry once at startup; library code only emits events, each tagged
//! with a typed [`Event`] name:
//!
//! ```ignore
//! use strandb::observability::Event;
//!
//! tracing::info!(event = Event::RecordCreated.as_str(), id = %id, "record created");
//! ```

mod events;

pub use events::Event;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Accepted log levels
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Pretty,
    /// One JSON object per line
    Json,
}

/// Logging setup failure. Never fatal to request handling.
#[derive(Debug, Error)]
#[error("Failed to initialize logging: {0}")]
pub struct ObservabilityError(String);

/// Installs the global subscriber.
///
/// `RUST_LOG` takes precedence over `level` when set. Output goes to
/// stderr so command results on stdout stay machine-readable.
pub fn init_logging(level: &str, format: LogFormat) -> Result<(), ObservabilityError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(level)));

    let registry = tracing_subscriber::registry().with(filter);
    let result = match format {
        LogFormat::Pretty => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
    };

    result.map_err(|e| ObservabilityError(e.to_string()))
}

fn default_directives(level: &str) -> String {
    format!("strandb={},tower_http={}", level, level)
}
