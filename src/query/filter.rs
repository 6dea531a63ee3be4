//! Canonical filter model
//!
//! Both the structured parameter path and the natural-language translator
//! produce a [`FilterModel`]. Every constraint is optional; a record matches
//! when all present constraints hold.

use serde::Serialize;

use crate::record::StringRecord;

/// Set of independent, optional constraints combined with AND.
///
/// Bounds are signed: the translator can legitimately derive
/// `max_length = -1` from "shorter than 0", which matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterModel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_palindrome: Option<bool>,

    /// Inclusive lower bound on length
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<i64>,

    /// Inclusive upper bound on length
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<i64>,

    /// Exact word count
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_count: Option<i64>,

    /// Case-sensitive containment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contains_character: Option<char>,
}

impl FilterModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no constraint is set
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Checks a record against every present constraint
    pub fn matches(&self, record: &StringRecord) -> bool {
        let props = record.properties();
        let length = signed(props.length);

        if let Some(expected) = self.is_palindrome {
            if props.is_palindrome != expected {
                return false;
            }
        }
        if let Some(min) = self.min_length {
            if length < min {
                return false;
            }
        }
        if let Some(max) = self.max_length {
            if length > max {
                return false;
            }
        }
        if let Some(count) = self.word_count {
            if signed(props.word_count) != count {
                return false;
            }
        }
        if let Some(c) = self.contains_character {
            if !record.value().contains(c) {
                return false;
            }
        }
        true
    }
}

fn signed(n: u64) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}
