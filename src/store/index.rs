//! In-memory record index shared by the store implementations
//!
//! Records are kept in insertion order, keyed by a monotonically increasing
//! sequence number, with lookup maps on value and identity. The value map
//! and the identity map always hold the same set of sequence numbers.

use std::collections::{BTreeMap, HashMap};

use crate::record::StringRecord;

use super::errors::{StoreError, StoreResult};

#[derive(Debug, Default)]
pub(crate) struct RecordIndex {
    next_seq: u64,
    records: BTreeMap<u64, StringRecord>,
    by_value: HashMap<String, u64>,
    by_id: HashMap<String, u64>,
}

impl RecordIndex {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Checks that `record` can be inserted without breaking uniqueness.
    pub(crate) fn check_insert(&self, record: &StringRecord) -> StoreResult<()> {
        if self.contains_value(record.value()) {
            return Err(StoreError::Duplicate {
                value: record.value().to_string(),
            });
        }
        if self.by_id.contains_key(record.id()) {
            return Err(StoreError::IdentityConflict {
                id: record.id().to_string(),
            });
        }
        Ok(())
    }

    /// Inserts a record that has passed `check_insert`.
    pub(crate) fn insert(&mut self, record: StringRecord) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.by_value.insert(record.value().to_string(), seq);
        self.by_id.insert(record.id().to_string(), seq);
        self.records.insert(seq, record);
    }

    pub(crate) fn get_by_value(&self, value: &str) -> Option<&StringRecord> {
        self.by_value
            .get(value)
            .and_then(|seq| self.records.get(seq))
    }

    pub(crate) fn contains_value(&self, value: &str) -> bool {
        self.by_value.contains_key(value)
    }

    pub(crate) fn remove_by_value(&mut self, value: &str) -> Option<StringRecord> {
        let seq = self.by_value.remove(value)?;
        let record = self.records.remove(&seq)?;
        self.by_id.remove(record.id());
        Some(record)
    }

    /// Records in insertion order
    pub(crate) fn records(&self) -> impl Iterator<Item = &StringRecord> {
        self.records.values()
    }

    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }
}
