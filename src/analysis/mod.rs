//! String analysis engine for strandb
//!
//! Derives the fixed property set of a string and its content identity.
//!
//! # Character model
//!
//! All character-based properties (`length`, `unique_characters`,
//! `character_frequency`) are computed over Unicode scalar values, i.e. Rust
//! `char`s. A string of N scalar values always has `length == N` and a
//! frequency map whose counts sum to N, regardless of its UTF-8 byte length.
//!
//! The content identity is the lowercase hex SHA-256 digest of the UTF-8
//! encoding of the string.

mod analyzer;

pub use analyzer::{analyze, content_identity, CharacterFrequency, PropertyBundle};
