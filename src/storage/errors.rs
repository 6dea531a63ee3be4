//! Storage error types
//!
//! Error codes:
//! - STRANDB_STORAGE_IO_ERROR (ERROR severity)
//! - STRANDB_STORAGE_WRITE_FAILED (ERROR severity)
//! - STRANDB_STORAGE_READ_FAILED (ERROR severity)
//! - STRANDB_STORAGE_CLOSED (ERROR severity)
//! - STRANDB_DATA_CORRUPTION (FATAL severity)

use std::fmt;
use std::io;

/// Severity levels for storage errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Operation fails, server continues
    Error,
    /// The log cannot be trusted; the store must not be served
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Storage-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageErrorCode {
    /// Disk I/O failure
    StorageIoError,
    /// Log append or fsync failed
    StorageWriteFailed,
    /// Log read failed
    StorageReadFailed,
    /// Operation on a closed log
    StorageClosed,
    /// Checksum, framing or content verification failure
    DataCorruption,
}

impl StorageErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            StorageErrorCode::StorageIoError => "STRANDB_STORAGE_IO_ERROR",
            StorageErrorCode::StorageWriteFailed => "STRANDB_STORAGE_WRITE_FAILED",
            StorageErrorCode::StorageReadFailed => "STRANDB_STORAGE_READ_FAILED",
            StorageErrorCode::StorageClosed => "STRANDB_STORAGE_CLOSED",
            StorageErrorCode::DataCorruption => "STRANDB_DATA_CORRUPTION",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        match self {
            StorageErrorCode::DataCorruption => Severity::Fatal,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for StorageErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Storage error with code, message and optional context
#[derive(Debug)]
pub struct StorageError {
    code: StorageErrorCode,
    message: String,
    details: Option<String>,
    source: Option<io::Error>,
}

impl StorageError {
    fn new(code: StorageErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
            source: None,
        }
    }

    /// Create a new storage I/O error
    pub fn io_error(message: impl Into<String>, source: io::Error) -> Self {
        Self {
            source: Some(source),
            ..Self::new(StorageErrorCode::StorageIoError, message)
        }
    }

    /// Create a new write failed error
    pub fn write_failed(message: impl Into<String>, source: io::Error) -> Self {
        Self {
            source: Some(source),
            ..Self::new(StorageErrorCode::StorageWriteFailed, message)
        }
    }

    /// Create a new read failed error
    pub fn read_failed(message: impl Into<String>, source: io::Error) -> Self {
        Self {
            source: Some(source),
            ..Self::new(StorageErrorCode::StorageReadFailed, message)
        }
    }

    /// The writer could not roll back a failed append and refuses further writes
    pub fn writer_disabled(offset: u64) -> Self {
        Self {
            details: Some(format!("byte_offset: {}", offset)),
            ..Self::new(
                StorageErrorCode::StorageWriteFailed,
                "Record log writer disabled after a failed append could not be rolled back",
            )
        }
    }

    /// The log has been closed
    pub fn closed() -> Self {
        Self::new(StorageErrorCode::StorageClosed, "Record log is closed")
    }

    /// Create a new data corruption error (FATAL)
    pub fn data_corruption(message: impl Into<String>) -> Self {
        Self::new(StorageErrorCode::DataCorruption, message)
    }

    /// Create a data corruption error with byte offset context
    pub fn corruption_at_offset(offset: u64, reason: impl Into<String>) -> Self {
        Self {
            details: Some(format!("byte_offset: {}", offset)),
            ..Self::new(StorageErrorCode::DataCorruption, reason)
        }
    }

    /// Create a data corruption error with record identity context
    pub fn corruption_for_record(id: &str, reason: impl Into<String>) -> Self {
        Self {
            details: Some(format!("record_id: {}", id)),
            ..Self::new(StorageErrorCode::DataCorruption, reason)
        }
    }

    pub fn code(&self) -> StorageErrorCode {
        self.code
    }

    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }

    /// Returns whether the store must stop serving
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.code.severity(),
            self.code.code(),
            self.message
        )?;
        if let Some(ref details) = self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            StorageErrorCode::StorageWriteFailed.code(),
            "STRANDB_STORAGE_WRITE_FAILED"
        );
        assert_eq!(
            StorageErrorCode::DataCorruption.code(),
            "STRANDB_DATA_CORRUPTION"
        );
        assert_eq!(StorageErrorCode::StorageClosed.code(), "STRANDB_STORAGE_CLOSED");
    }

    #[test]
    fn test_only_corruption_is_fatal() {
        assert!(StorageError::data_corruption("bad frame").is_fatal());
        assert!(!StorageError::closed().is_fatal());
        assert!(!StorageError::write_failed(
            "disk full",
            io::Error::new(io::ErrorKind::Other, "disk full"),
        )
        .is_fatal());
    }

    #[test]
    fn test_display_contains_context() {
        let err = StorageError::corruption_at_offset(1024, "checksum mismatch");
        let display = err.to_string();
        assert!(display.contains("STRANDB_DATA_CORRUPTION"));
        assert!(display.contains("FATAL"));
        assert!(display.contains("checksum mismatch"));
        assert!(display.contains("byte_offset: 1024"));
    }
}
