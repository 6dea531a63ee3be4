//! Record store errors

use thiserror::Error;

use crate::storage::StorageError;

/// Result type for record store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Record store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// A record with the same value already exists
    #[error("String already exists in the system")]
    Duplicate { value: String },

    /// Identity already present under a different value
    #[error("Identity {id} is already bound to a different value")]
    IdentityConflict { id: String },

    /// Underlying log failure
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// A writer panicked while holding the store lock
    #[error("Record store lock poisoned")]
    LockPoisoned,
}

impl StoreError {
    /// Returns true for the duplicate-value conflict outcome
    pub fn is_duplicate(&self) -> bool {
        matches!(self, StoreError::Duplicate { .. })
    }
}
