//! Structured query parameter parsing
//!
//! Builds a [`FilterModel`] from raw query-string pairs. Each recognized
//! parameter is parsed on its own; unrecognized keys are ignored. A
//! recognized key with a malformed value fails the whole request.

use std::collections::HashMap;

use super::errors::{QueryError, QueryResult};
use super::filter::FilterModel;

pub const PARAM_IS_PALINDROME: &str = "is_palindrome";
pub const PARAM_MIN_LENGTH: &str = "min_length";
pub const PARAM_MAX_LENGTH: &str = "max_length";
pub const PARAM_WORD_COUNT: &str = "word_count";
pub const PARAM_CONTAINS_CHARACTER: &str = "contains_character";

impl FilterModel {
    /// Parse structured query parameters.
    pub fn from_params(params: &HashMap<String, String>) -> QueryResult<Self> {
        let mut filter = FilterModel::new();

        for (key, value) in params {
            match key.as_str() {
                PARAM_IS_PALINDROME => {
                    filter.is_palindrome = Some(parse_bool(PARAM_IS_PALINDROME, value)?);
                }
                PARAM_MIN_LENGTH => {
                    filter.min_length = Some(parse_int(PARAM_MIN_LENGTH, value)?);
                }
                PARAM_MAX_LENGTH => {
                    filter.max_length = Some(parse_int(PARAM_MAX_LENGTH, value)?);
                }
                PARAM_WORD_COUNT => {
                    filter.word_count = Some(parse_int(PARAM_WORD_COUNT, value)?);
                }
                PARAM_CONTAINS_CHARACTER => {
                    filter.contains_character =
                        Some(parse_char(PARAM_CONTAINS_CHARACTER, value)?);
                }
                _ => {}
            }
        }

        Ok(filter)
    }
}

/// `true`/`false`, case-insensitive
fn parse_bool(name: &str, value: &str) -> QueryResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(QueryError::invalid_param(
            name,
            format!("expected true or false, got {:?}", value),
        )),
    }
}

fn parse_int(name: &str, value: &str) -> QueryResult<i64> {
    value
        .trim()
        .parse()
        .map_err(|_| QueryError::invalid_param(name, format!("expected an integer, got {:?}", value)))
}

/// Exactly one character
fn parse_char(name: &str, value: &str) -> QueryResult<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(QueryError::invalid_param(
            name,
            format!("expected a single character, got {:?}", value),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_no_params_is_empty_filter() {
        let filter = FilterModel::from_params(&HashMap::new()).unwrap();
        assert!(filter.is_empty());
    }

    #[test]
    fn test_full_params() {
        let filter = FilterModel::from_params(&params(&[
            ("is_palindrome", "TRUE"),
            ("min_length", "2"),
            ("max_length", "10"),
            ("word_count", "1"),
            ("contains_character", "é"),
        ]))
        .unwrap();

        assert_eq!(
            filter,
            FilterModel {
                is_palindrome: Some(true),
                min_length: Some(2),
                max_length: Some(10),
                word_count: Some(1),
                contains_character: Some('é'),
            }
        );
    }

    #[test]
    fn test_unknown_params_ignored() {
        let filter = FilterModel::from_params(&params(&[("limit", "abc")])).unwrap();
        assert!(filter.is_empty());
    }

    #[test]
    fn test_malformed_bool() {
        let err = FilterModel::from_params(&params(&[("is_palindrome", "yes")])).unwrap_err();
        assert!(matches!(err, QueryError::InvalidParam { ref name, .. } if name == "is_palindrome"));
    }

    #[test]
    fn test_malformed_int() {
        for key in ["min_length", "max_length", "word_count"] {
            let err = FilterModel::from_params(&params(&[(key, "five")])).unwrap_err();
            assert!(matches!(err, QueryError::InvalidParam { ref name, .. } if name == key));
        }
    }

    #[test]
    fn test_contains_character_must_be_single() {
        assert!(FilterModel::from_params(&params(&[("contains_character", "ab")])).is_err());
        assert!(FilterModel::from_params(&params(&[("contains_character", "")])).is_err());
    }

    #[test]
    fn test_one_bad_param_fails_whole_request() {
        let result = FilterModel::from_params(&params(&[
            ("min_length", "3"),
            ("max_length", "x"),
        ]));
        assert!(result.is_err());
    }
}
