//! Observable events for strandb
//!
//! Every log line carries one of these as its `event` field so that log
//! consumers can match on stable names instead of message text.

use std::fmt;

/// Observable events in strandb
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Boot & Lifecycle
    /// Configuration loaded and validated
    ConfigLoaded,
    /// Data directory initialized
    DataDirInitialized,
    /// Record log replay begins
    StoreOpenBegin,
    /// Record log replayed, store ready
    StoreOpenComplete,
    /// Record log corruption detected (FATAL)
    StoreCorruption,
    /// Store closed
    StoreClosed,
    /// HTTP server bound and accepting
    ServerListening,
    /// Shutdown initiated
    ShutdownStart,
    /// Shutdown complete
    ShutdownComplete,

    // Writes
    /// Record analyzed and persisted
    RecordCreated,
    /// Insert rejected because the value exists
    RecordRejectedDuplicate,
    /// Record deleted
    RecordDeleted,

    // Queries
    /// Structured filter evaluated
    QueryExecuted,
    /// Natural-language query translated to filters
    QueryTranslated,
    /// Natural-language query produced no filters
    QueryUnparseable,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::DataDirInitialized => "DATA_DIR_INITIALIZED",
            Event::StoreOpenBegin => "STORE_OPEN_BEGIN",
            Event::StoreOpenComplete => "STORE_OPEN_COMPLETE",
            Event::StoreCorruption => "STORE_CORRUPTION",
            Event::StoreClosed => "STORE_CLOSED",
            Event::ServerListening => "SERVER_LISTENING",
            Event::ShutdownStart => "SHUTDOWN_START",
            Event::ShutdownComplete => "SHUTDOWN_COMPLETE",

            Event::RecordCreated => "RECORD_CREATED",
            Event::RecordRejectedDuplicate => "RECORD_REJECTED_DUPLICATE",
            Event::RecordDeleted => "RECORD_DELETED",

            Event::QueryExecuted => "QUERY_EXECUTED",
            Event::QueryTranslated => "QUERY_TRANSLATED",
            Event::QueryUnparseable => "QUERY_UNPARSEABLE",
        }
    }

    /// Returns true if this event indicates a fatal condition
    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::StoreCorruption)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
