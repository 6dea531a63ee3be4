//! Volatile record store

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::record::StringRecord;
use crate::storage::StorageError;

use super::errors::{StoreError, StoreResult};
use super::index::RecordIndex;
use super::RecordStore;

#[derive(Debug, Default)]
struct Inner {
    index: RecordIndex,
    closed: bool,
}

/// In-memory [`RecordStore`]; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    inner: RwLock<Inner>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Inner>> {
        let guard = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        if guard.closed {
            return Err(StorageError::closed().into());
        }
        Ok(guard)
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Inner>> {
        let guard = self.inner.write().map_err(|_| StoreError::LockPoisoned)?;
        if guard.closed {
            return Err(StorageError::closed().into());
        }
        Ok(guard)
    }
}

impl RecordStore for MemoryRecordStore {
    fn insert(&self, record: StringRecord) -> StoreResult<()> {
        let mut inner = self.write()?;
        inner.index.check_insert(&record)?;
        inner.index.insert(record);
        Ok(())
    }

    fn get_by_value(&self, value: &str) -> StoreResult<Option<StringRecord>> {
        Ok(self.read()?.index.get_by_value(value).cloned())
    }

    fn get_all(&self) -> StoreResult<Vec<StringRecord>> {
        Ok(self.read()?.index.records().cloned().collect())
    }

    fn delete_by_value(&self, value: &str) -> StoreResult<usize> {
        let removed = self.write()?.index.remove_by_value(value);
        Ok(usize::from(removed.is_some()))
    }

    fn len(&self) -> StoreResult<usize> {
        Ok(self.read()?.index.len())
    }

    fn close(&self) -> StoreResult<()> {
        let mut inner = self.inner.write().map_err(|_| StoreError::LockPoisoned)?;
        inner.closed = true;
        Ok(())
    }
}
