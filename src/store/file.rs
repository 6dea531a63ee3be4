//! Durable record store backed by the record log
//!
//! Opening the store replays the whole log into a [`RecordIndex`]. Every
//! replayed PUT is re-analyzed and must match what was stored; a mismatch is
//! treated as corruption and aborts the open.
//!
//! Writes hold the exclusive lock across "append + fsync + index update", so
//! readers see either the state before a write or the state after it.

use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::observability::Event;
use crate::record::StringRecord;
use crate::storage::{log_path, LogEntry, LogReader, LogWriter, StorageError, StorageResult};

use super::errors::{StoreError, StoreResult};
use super::index::RecordIndex;
use super::RecordStore;

struct Inner {
    index: RecordIndex,
    /// `None` once closed
    writer: Option<LogWriter>,
}

/// [`RecordStore`] persisted in `<data_dir>/data/strings.dat`.
pub struct FileRecordStore {
    path: PathBuf,
    inner: RwLock<Inner>,
}

impl FileRecordStore {
    /// Opens (or creates) the store under `data_dir` and replays the log.
    ///
    /// # Errors
    ///
    /// Any corruption in the log is FATAL and returned as
    /// `STRANDB_DATA_CORRUPTION`; the store is not opened.
    pub fn open(data_dir: &Path) -> StoreResult<Self> {
        let writer = LogWriter::open(data_dir)?;
        let path = writer.path().to_path_buf();

        tracing::debug!(
            event = Event::StoreOpenBegin.as_str(),
            path = %path.display(),
            "replaying record log"
        );

        let index = match replay(data_dir) {
            Ok(index) => index,
            Err(e) => {
                tracing::error!(
                    event = Event::StoreCorruption.as_str(),
                    path = %path.display(),
                    error = %e,
                    "record log failed verification"
                );
                return Err(e.into());
            }
        };

        tracing::info!(
            event = Event::StoreOpenComplete.as_str(),
            path = %path.display(),
            records = index.len(),
            "record store opened"
        );

        Ok(Self {
            path,
            inner: RwLock::new(Inner {
                index,
                writer: Some(writer),
            }),
        })
    }

    /// Path of the backing log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Inner>> {
        let guard = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        if guard.writer.is_none() {
            return Err(StorageError::closed().into());
        }
        Ok(guard)
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Inner>> {
        self.inner.write().map_err(|_| StoreError::LockPoisoned)
    }
}

/// Rebuilds the live record set from the log.
fn replay(data_dir: &Path) -> StorageResult<RecordIndex> {
    let mut reader = LogReader::open(&log_path(data_dir))?;
    let mut index = RecordIndex::new();

    while let Some(entry) = reader.read_next()? {
        match entry {
            LogEntry::Put(record) => {
                if !record.is_consistent() {
                    return Err(StorageError::corruption_for_record(
                        record.id(),
                        "Stored properties do not match the stored value",
                    ));
                }
                if index.check_insert(&record).is_err() {
                    return Err(StorageError::corruption_for_record(
                        record.id(),
                        "Record written twice without an intervening delete",
                    ));
                }
                index.insert(record);
            }
            LogEntry::Tombstone { id, value } => match index.remove_by_value(&value) {
                Some(removed) if removed.id() == id => {}
                _ => {
                    return Err(StorageError::corruption_for_record(
                        &id,
                        "Tombstone does not match a live record",
                    ))
                }
            },
        }
    }

    Ok(index)
}

impl RecordStore for FileRecordStore {
    fn insert(&self, record: StringRecord) -> StoreResult<()> {
        let mut guard = self.write()?;
        let inner = &mut *guard;
        let writer = inner.writer.as_mut().ok_or_else(StorageError::closed)?;

        inner.index.check_insert(&record)?;
        let entry = LogEntry::Put(record);
        writer.append(&entry)?;

        if let LogEntry::Put(record) = entry {
            inner.index.insert(record);
        }
        Ok(())
    }

    fn get_by_value(&self, value: &str) -> StoreResult<Option<StringRecord>> {
        Ok(self.read()?.index.get_by_value(value).cloned())
    }

    fn get_all(&self) -> StoreResult<Vec<StringRecord>> {
        Ok(self.read()?.index.records().cloned().collect())
    }

    fn delete_by_value(&self, value: &str) -> StoreResult<usize> {
        let mut guard = self.write()?;
        let inner = &mut *guard;
        let writer = inner.writer.as_mut().ok_or_else(StorageError::closed)?;

        let id = match inner.index.get_by_value(value) {
            Some(record) => record.id().to_string(),
            None => return Ok(0),
        };

        writer.append(&LogEntry::Tombstone {
            id,
            value: value.to_string(),
        })?;
        inner.index.remove_by_value(value);
        Ok(1)
    }

    fn len(&self) -> StoreResult<usize> {
        Ok(self.read()?.index.len())
    }

    fn close(&self) -> StoreResult<()> {
        let mut inner = self.write()?;
        if let Some(mut writer) = inner.writer.take() {
            writer.sync()?;
            tracing::info!(
                event = Event::StoreClosed.as_str(),
                path = %self.path.display(),
                "record store closed"
            );
        }
        Ok(())
    }
}
