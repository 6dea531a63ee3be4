//! Record log for strandb
//!
//! The durable state of the store is a single append-only log file of
//! checksummed frames. A record is written once as a PUT frame; a delete
//! appends a TOMBSTONE frame. Replaying the log in file order reproduces the
//! live record set and its insertion order.
//!
//! # Design Principles
//!
//! - Append-only (no in-place updates)
//! - Checksum-verified on every read
//! - fsync before acknowledgment
//! - Halt on corruption: a damaged log is never partially served

mod checksum;
mod entry;
mod errors;
mod reader;
mod writer;

pub use checksum::compute_checksum;
pub use entry::LogEntry;
pub use errors::{Severity, StorageError, StorageErrorCode, StorageResult};
pub use reader::LogReader;
pub use writer::{log_path, LogWriter};

#[cfg(test)]
pub(crate) use writer::AppendFault;
