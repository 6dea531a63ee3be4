//! The stored record type
//!
//! A `StringRecord` is immutable once built. Its identity and every derived
//! property come from `analyze(value)`; the only independent field is the
//! creation timestamp.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

use crate::analysis::{analyze, PropertyBundle};

/// An analyzed string as held by a record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StringRecord {
    id: String,
    value: String,
    properties: PropertyBundle,
    #[serde(serialize_with = "serialize_timestamp")]
    created_at: DateTime<Utc>,
}

impl StringRecord {
    /// Analyzes `value` and stamps the record with the current time.
    pub fn new(value: impl Into<String>) -> Self {
        let now = Utc::now();
        // Storage keeps microsecond precision; truncate up front so a
        // reloaded record compares equal to the one that was written.
        let created_at = DateTime::from_timestamp_micros(now.timestamp_micros()).unwrap_or(now);
        Self::with_timestamp(value, created_at)
    }

    /// Analyzes `value` with an explicit creation time.
    pub fn with_timestamp(value: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        let value = value.into();
        let properties = analyze(&value);
        Self {
            id: properties.sha256_hash.clone(),
            value,
            properties,
            created_at,
        }
    }

    /// Reassembles a record from decoded parts without re-analysis.
    ///
    /// Callers must verify the result with [`StringRecord::is_consistent`].
    pub(crate) fn from_parts(
        id: String,
        value: String,
        properties: PropertyBundle,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            value,
            properties,
            created_at,
        }
    }

    /// Content identity (SHA-256 of the value)
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn properties(&self) -> &PropertyBundle {
        &self.properties
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns true if identity and properties are exactly what
    /// `analyze(value)` derives.
    pub fn is_consistent(&self) -> bool {
        let expected = analyze(&self.value);
        self.id == expected.sha256_hash && self.properties == expected
    }
}

fn serialize_timestamp<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Micros, true))
}
