//! Property derivation for stored strings
//!
//! `analyze` is total: every string, including the empty string, yields a
//! property bundle. Nothing here touches storage or the clock.

use std::collections::BTreeMap;

use serde::Serialize;
use sha2::{Digest, Sha256};

/// Occurrence count per character.
///
/// A `BTreeMap` keeps serialization deterministic; lookups never depend on it.
pub type CharacterFrequency = BTreeMap<char, u64>;

/// Derived properties of a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyBundle {
    /// Number of Unicode scalar values
    pub length: u64,
    /// Case-insensitive palindrome check
    pub is_palindrome: bool,
    /// Number of distinct characters (case-sensitive)
    pub unique_characters: u64,
    /// Number of whitespace-delimited tokens
    pub word_count: u64,
    /// Hex SHA-256 of the UTF-8 bytes; doubles as the record identity
    pub sha256_hash: String,
    /// Character -> occurrence count
    #[serde(rename = "character_frequency_map")]
    pub character_frequency: CharacterFrequency,
}

/// Computes the content identity of a string.
pub fn content_identity(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Derives the full property bundle for `value`.
pub fn analyze(value: &str) -> PropertyBundle {
    let character_frequency = character_frequency(value);
    let length = character_frequency.values().sum();

    PropertyBundle {
        length,
        is_palindrome: is_palindrome(value),
        unique_characters: character_frequency.len() as u64,
        word_count: value.split_whitespace().count() as u64,
        sha256_hash: content_identity(value),
        character_frequency,
    }
}

fn character_frequency(value: &str) -> CharacterFrequency {
    let mut frequency = CharacterFrequency::new();
    for c in value.chars() {
        *frequency.entry(c).or_insert(0) += 1;
    }
    frequency
}

fn is_palindrome(value: &str) -> bool {
    // Folding can change the scalar count ('İ' lowercases to two chars), so
    // compare the folded string against its own reverse.
    let folded: Vec<char> = value.to_lowercase().chars().collect();
    folded.iter().eq(folded.iter().rev())
}
