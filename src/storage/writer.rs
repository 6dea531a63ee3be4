//! Append-only log writer with fsync enforcement
//!
//! An append is not acknowledged until the frame has been written and the
//! file fsynced. The log is never rewritten in place; the only truncation is
//! the rollback of a failed append back to the last acknowledged frame.
//!
//! If that rollback fails too, the writer is disabled and every later append
//! returns `STRANDB_STORAGE_WRITE_FAILED` without touching the file.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::entry::LogEntry;
use super::errors::{StorageError, StorageResult};

/// Subdirectory of the data directory holding the log
pub const DATA_SUBDIR: &str = "data";

/// Log file name
pub const LOG_FILE_NAME: &str = "strings.dat";

/// Returns `<data_dir>/data/strings.dat`.
pub fn log_path(data_dir: &Path) -> PathBuf {
    data_dir.join(DATA_SUBDIR).join(LOG_FILE_NAME)
}

/// Writer that appends frames to the record log.
pub struct LogWriter {
    log_path: PathBuf,
    file: File,
    /// End of the last acknowledged frame
    current_offset: u64,
    disabled: bool,
    #[cfg(test)]
    fault: Option<AppendFault>,
}

/// Failure injected into the next append.
#[cfg(test)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AppendFault {
    /// Half the frame reaches the file, then the write fails
    TornWrite,
    /// The whole frame reaches the file, then fsync fails
    SyncFailure,
    /// fsync fails and the rollback truncate fails as well
    RollbackFailure,
}

impl LogWriter {
    /// Opens or creates the log under `data_dir`.
    ///
    /// Creates `<data_dir>/data/strings.dat` and any missing parent
    /// directories.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::write_failed` if the file cannot be created or opened.
    pub fn open(data_dir: &Path) -> StorageResult<Self> {
        let data_subdir = data_dir.join(DATA_SUBDIR);
        let log_path = log_path(data_dir);

        if !data_subdir.exists() {
            fs::create_dir_all(&data_subdir).map_err(|e| {
                StorageError::write_failed(
                    format!("Failed to create data directory: {}", data_subdir.display()),
                    e,
                )
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&log_path)
            .map_err(|e| {
                StorageError::write_failed(
                    format!("Failed to open record log: {}", log_path.display()),
                    e,
                )
            })?;

        let current_offset = file
            .metadata()
            .map_err(|e| StorageError::io_error("Failed to read log metadata", e))?
            .len();

        Ok(Self {
            log_path,
            file,
            current_offset,
            disabled: false,
            #[cfg(test)]
            fault: None,
        })
    }

    /// Returns the path to the log file.
    pub fn path(&self) -> &Path {
        &self.log_path
    }

    /// Returns the offset where the next frame will be written.
    pub fn current_offset(&self) -> u64 {
        self.current_offset
    }

    /// Returns true once a failed append could not be rolled back.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Appends one entry and fsyncs.
    ///
    /// Returns the byte offset where the frame was written. On failure the
    /// file is truncated back to the previous frame boundary, so a partial or
    /// unsynced frame never survives to the next replay.
    ///
    /// # Errors
    ///
    /// Returns `STRANDB_STORAGE_WRITE_FAILED` if write or fsync fails, or if
    /// the writer is disabled.
    pub fn append(&mut self, entry: &LogEntry) -> StorageResult<u64> {
        if self.disabled {
            return Err(StorageError::writer_disabled(self.current_offset));
        }

        let frame = entry.serialize();
        let offset = self.current_offset;

        if let Err(e) = self.write_and_sync(&frame) {
            if let Err(rollback) = self.rollback() {
                self.disabled = true;
                tracing::error!(
                    path = %self.log_path.display(),
                    offset,
                    error = %rollback,
                    "failed to roll back partial append; writer disabled"
                );
            }
            return Err(StorageError::write_failed(
                format!("Failed to append entry: {}", entry.id()),
                e,
            ));
        }

        self.current_offset += frame.len() as u64;

        Ok(offset)
    }

    fn write_and_sync(&mut self, frame: &[u8]) -> io::Result<()> {
        #[cfg(test)]
        if let Some(fault) = self.fault {
            return self.write_with_fault(frame, fault);
        }

        self.file.write_all(frame)?;
        self.file.sync_all()
    }

    /// Drops everything past the last acknowledged frame.
    fn rollback(&mut self) -> io::Result<()> {
        #[cfg(test)]
        if self.fault.take() == Some(AppendFault::RollbackFailure) {
            return Err(io::Error::new(io::ErrorKind::Other, "injected truncate failure"));
        }

        self.file.set_len(self.current_offset)?;
        self.file.sync_all()
    }

    #[cfg(test)]
    pub(crate) fn inject_fault(&mut self, fault: AppendFault) {
        self.fault = Some(fault);
    }

    #[cfg(test)]
    fn write_with_fault(&mut self, frame: &[u8], fault: AppendFault) -> io::Result<()> {
        match fault {
            AppendFault::TornWrite => {
                self.file.write_all(&frame[..frame.len() / 2])?;
                Err(io::Error::new(io::ErrorKind::WriteZero, "injected torn write"))
            }
            AppendFault::SyncFailure | AppendFault::RollbackFailure => {
                self.file.write_all(frame)?;
                Err(io::Error::new(io::ErrorKind::Other, "injected fsync failure"))
            }
        }
    }

    /// Flushes file contents and metadata to disk.
    pub fn sync(&mut self) -> StorageResult<()> {
        self.file
            .sync_all()
            .map_err(|e| StorageError::write_failed("fsync failed", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::StringRecord;
    use crate::storage::LogReader;
    use tempfile::TempDir;

    #[test]
    fn test_writer_creates_directories() {
        let temp_dir = TempDir::new().unwrap();
        let data_path = temp_dir.path().join("data");
        assert!(!data_path.exists());

        let writer = LogWriter::open(temp_dir.path()).unwrap();

        assert!(data_path.join("strings.dat").exists());
        assert_eq!(writer.path(), log_path(temp_dir.path()));
    }

    #[test]
    fn test_append_and_read_back() {
        let temp_dir = TempDir::new().unwrap();
        let record = StringRecord::new("madam");

        {
            let mut writer = LogWriter::open(temp_dir.path()).unwrap();
            writer.append(&LogEntry::Put(record.clone())).unwrap();
        }

        let mut reader = LogReader::open_from_data_dir(temp_dir.path()).unwrap();
        let entry = reader.read_next().unwrap().unwrap();
        assert_eq!(entry, LogEntry::Put(record));
        assert!(reader.read_next().unwrap().is_none());
    }

    #[test]
    fn test_offset_tracking() {
        let temp_dir = TempDir::new().unwrap();
        let mut writer = LogWriter::open(temp_dir.path()).unwrap();
        assert_eq!(writer.current_offset(), 0);

        let first = writer
            .append(&LogEntry::Put(StringRecord::new("one")))
            .unwrap();
        let second = writer
            .append(&LogEntry::Put(StringRecord::new("two")))
            .unwrap();

        assert_eq!(first, 0);
        assert!(second > first);
        assert!(writer.current_offset() > second);
    }

    #[test]
    fn test_reopen_continues_at_end() {
        let temp_dir = TempDir::new().unwrap();

        let end = {
            let mut writer = LogWriter::open(temp_dir.path()).unwrap();
            writer
                .append(&LogEntry::Put(StringRecord::new("first")))
                .unwrap();
            writer.current_offset()
        };

        let mut writer = LogWriter::open(temp_dir.path()).unwrap();
        assert_eq!(writer.current_offset(), end);
        let offset = writer
            .append(&LogEntry::Tombstone {
                id: "x".to_string(),
                value: "first".to_string(),
            })
            .unwrap();
        assert_eq!(offset, end);
    }

    fn file_len(writer: &LogWriter) -> u64 {
        std::fs::metadata(writer.path()).unwrap().len()
    }

    #[test]
    fn test_failed_sync_rolls_back_frame() {
        let temp_dir = TempDir::new().unwrap();
        let mut writer = LogWriter::open(temp_dir.path()).unwrap();
        writer
            .append(&LogEntry::Put(StringRecord::new("kept")))
            .unwrap();
        let end = writer.current_offset();

        writer.inject_fault(AppendFault::SyncFailure);
        let err = writer
            .append(&LogEntry::Put(StringRecord::new("lost")))
            .unwrap_err();
        assert_eq!(err.code().code(), "STRANDB_STORAGE_WRITE_FAILED");
        assert_eq!(file_len(&writer), end);
        assert_eq!(writer.current_offset(), end);
        assert!(!writer.is_disabled());

        // Retrying the same entry leaves exactly one copy.
        writer
            .append(&LogEntry::Put(StringRecord::new("lost")))
            .unwrap();
        let entries = LogReader::open_from_data_dir(temp_dir.path())
            .unwrap()
            .read_all()
            .unwrap();
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_torn_write_rolls_back() {
        let temp_dir = TempDir::new().unwrap();
        let mut writer = LogWriter::open(temp_dir.path()).unwrap();

        writer.inject_fault(AppendFault::TornWrite);
        assert!(writer
            .append(&LogEntry::Put(StringRecord::new("torn")))
            .is_err());
        assert_eq!(file_len(&writer), 0);

        writer
            .append(&LogEntry::Put(StringRecord::new("whole")))
            .unwrap();
        let entries = LogReader::open_from_data_dir(temp_dir.path())
            .unwrap()
            .read_all()
            .unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_failed_rollback_disables_writer() {
        let temp_dir = TempDir::new().unwrap();
        let mut writer = LogWriter::open(temp_dir.path()).unwrap();

        writer.inject_fault(AppendFault::RollbackFailure);
        assert!(writer
            .append(&LogEntry::Put(StringRecord::new("stuck")))
            .is_err());
        assert!(writer.is_disabled());
        let len_after_failure = file_len(&writer);

        let err = writer
            .append(&LogEntry::Put(StringRecord::new("later")))
            .unwrap_err();
        assert_eq!(err.code().code(), "STRANDB_STORAGE_WRITE_FAILED");
        assert!(err.details().unwrap().contains("byte_offset: 0"));
        assert_eq!(file_len(&writer), len_after_failure);
    }
}
