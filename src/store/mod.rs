//! Record store abstraction
//!
//! The query layer talks to storage only through [`RecordStore`]. Two
//! implementations exist:
//!
//! - [`FileRecordStore`]: durable, backed by the append-only record log
//! - [`MemoryRecordStore`]: volatile, for tests and one-shot tooling
//!
//! Both serialize writes behind an exclusive lock, so the uniqueness of
//! `value` (and therefore of identity) cannot race. A write either lands as
//! one whole record or not at all.

mod errors;
mod file;
mod index;
mod memory;

pub use errors::{StoreError, StoreResult};
pub use file::FileRecordStore;
pub use memory::MemoryRecordStore;

use crate::record::StringRecord;

/// Durable mapping from value to record with uniqueness on value.
pub trait RecordStore: Send + Sync {
    /// Inserts a new record.
    ///
    /// Fails with [`StoreError::Duplicate`] if a record with the same value
    /// exists. Never retried.
    fn insert(&self, record: StringRecord) -> StoreResult<()>;

    /// Exact-match lookup by value.
    fn get_by_value(&self, value: &str) -> StoreResult<Option<StringRecord>>;

    /// All live records in insertion order.
    fn get_all(&self) -> StoreResult<Vec<StringRecord>>;

    /// Removes the record with this value.
    ///
    /// Returns 1 if a record was removed and 0 if none existed.
    fn delete_by_value(&self, value: &str) -> StoreResult<usize>;

    /// Number of live records.
    fn len(&self) -> StoreResult<usize>;

    /// Returns true if the store holds no records.
    fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Flushes and closes the store. Later operations fail.
    fn close(&self) -> StoreResult<()>;
}
