//! City-name normalization and validation.
//!
//! Every name passes through `normalize` and `validate` before it is
//! written to the history store; the three `NameError` variants let the
//! caller show a distinct message per failure kind.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Maximum city-name length in characters.
pub const MAX_NAME_CHARS: usize = 80;

// Letters (with combining marks), digits, spaces, comma, period,
// apostrophe and hyphen. A trailing ", XX" country code fits the class.
static NAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^[\p{L}\p{M}\p{N} ,.'-]+$").expect("city-name pattern is valid")
});

/// Validation errors for city names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("City name cannot be empty")]
    Empty,

    #[error("City name exceeds 80 characters")]
    TooLong,

    #[error("City name contains unsupported characters")]
    Invalid,
}

/// Normalize a raw city input: trim, collapse whitespace runs to a single
/// space, and uppercase a trailing two-letter country code (", nl" -> ", NL").
///
/// Deterministic and idempotent: `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    uppercase_country_suffix(&collapsed)
}

fn uppercase_country_suffix(name: &str) -> String {
    let bytes = name.as_bytes();
    let n = bytes.len();
    if n >= 4
        && bytes[n - 4] == b','
        && bytes[n - 3] == b' '
        && bytes[n - 2].is_ascii_alphabetic()
        && bytes[n - 1].is_ascii_alphabetic()
    {
        let mut out = name[..n - 2].to_string();
        out.push(bytes[n - 2].to_ascii_uppercase() as char);
        out.push(bytes[n - 1].to_ascii_uppercase() as char);
        out
    } else {
        name.to_string()
    }
}

/// Validate a (normalized) city name against the grammar.
pub fn validate(name: &str) -> Result<(), NameError> {
    if name.is_empty() {
        return Err(NameError::Empty);
    }
    if name.chars().count() > MAX_NAME_CHARS {
        return Err(NameError::TooLong);
    }
    if !NAME_PATTERN.is_match(name) {
        return Err(NameError::Invalid);
    }
    Ok(())
}
