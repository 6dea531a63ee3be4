//! Natural-language query translation
//!
//! A small fixed rule set over the lowercased query text. Each rule sets at
//! most one field of the resulting [`FilterModel`]; rules do not see each
//! other's results except that "first vowel" is applied last and replaces any
//! containment constraint found earlier.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use super::errors::{QueryError, QueryResult};
use super::filter::FilterModel;

/// What a natural-language query was understood as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterpretedQuery {
    pub original: String,
    pub parsed_filters: FilterModel,
}

struct Patterns {
    longer_than: Regex,
    shorter_than: Regex,
    contains: Regex,
    decimal_digit: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        longer_than: compile(r"longer than (\d+)"),
        shorter_than: compile(r"shorter than (\d+)"),
        contains: compile(r"contain(?:s|ing)? (?:the )?(?:letter |character )?([a-z])"),
        decimal_digit: compile(r"^\d$"),
    })
}

fn compile(pattern: &str) -> Regex {
    match Regex::new(pattern) {
        Ok(re) => re,
        Err(e) => unreachable!("static pattern {pattern:?} failed to compile: {e}"),
    }
}

/// Translates free text into a filter model.
///
/// # Errors
///
/// Returns [`QueryError::Unparseable`] when no rule fires. This is distinct
/// from a query that parses but matches nothing.
pub fn translate(query: &str) -> QueryResult<FilterModel> {
    let text = query.to_lowercase();
    let patterns = patterns();
    let mut filter = FilterModel::new();

    if text.contains("palindrom") {
        filter.is_palindrome = Some(true);
    }

    if text.contains("single word") {
        filter.word_count = Some(1);
    } else if text.contains("two word") || text.contains("2 word") {
        filter.word_count = Some(2);
    }

    if let Some(n) = capture_number(&patterns.longer_than, &text) {
        filter.min_length = Some(n.saturating_add(1));
    }

    if let Some(n) = capture_number(&patterns.shorter_than, &text) {
        filter.max_length = Some(n.saturating_sub(1));
    }

    if let Some(c) = patterns
        .contains
        .captures(&text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().chars().next())
    {
        filter.contains_character = Some(c);
    }

    if text.contains("first vowel") {
        filter.contains_character = Some('a');
    }

    if filter.is_empty() {
        return Err(QueryError::Unparseable {
            query: query.to_string(),
        });
    }

    Ok(filter)
}

/// Translates and pairs the result with the original text.
pub fn interpret(query: &str) -> QueryResult<InterpretedQuery> {
    Ok(InterpretedQuery {
        original: query.to_string(),
        parsed_filters: translate(query)?,
    })
}

/// `\d` matches any Unicode decimal digit, not only ASCII. Numbers too large
/// for i64 saturate rather than dropping the rule.
fn capture_number(re: &Regex, text: &str) -> Option<i64> {
    let digits = re.captures(text)?.get(1)?.as_str();
    let mut n: i64 = 0;
    for c in digits.chars() {
        let d = i64::from(decimal_digit_value(c)?);
        n = match n.checked_mul(10).and_then(|n| n.checked_add(d)) {
            Some(n) => n,
            None => return Some(i64::MAX),
        };
    }
    Some(n)
}

/// Value of a Unicode decimal digit.
///
/// Decimal digits are encoded in contiguous runs of whole 0..=9 blocks, so the
/// value is the distance from the start of the run, modulo ten.
fn decimal_digit_value(c: char) -> Option<u32> {
    if let Some(d) = c.to_digit(10) {
        return Some(d);
    }
    if !is_decimal_digit(c) {
        return None;
    }
    let mut start = c as u32;
    while let Some(prev) = start.checked_sub(1).and_then(char::from_u32) {
        if !is_decimal_digit(prev) {
            break;
        }
        start -= 1;
    }
    Some((c as u32 - start) % 10)
}

fn is_decimal_digit(c: char) -> bool {
    let mut buf = [0u8; 4];
    patterns().decimal_digit.is_match(c.encode_utf8(&mut buf))
}
