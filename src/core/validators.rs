// src/core/validators.rs

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

/// Pattern every extension ID must match in full.
pub const ID_PATTERN: &str = r"^[A-Za-z0-9]+(?:[_\-.][A-Za-z0-9]+)*$";

lazy_static! {
    static ref ID_RE: Regex = Regex::new(ID_PATTERN).expect("ID_PATTERN is a valid regex");
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("You must specify a value")]
    Missing,
    #[error("Specified value is not a valid ID.\nA valid ID must match the regular expression: {pattern}")]
    InvalidId { pattern: &'static str },
    #[error("You must select an option")]
    NothingSelected,
    #[error("You may select one option only")]
    TooManySelected,
}

/// Fails if the value is absent or blank after trimming.
pub fn validate_non_empty(value: Option<&str>) -> Result<(), ValidationError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(()),
        _ => Err(ValidationError::Missing),
    }
}

/// Checks that a value is a usable extension identifier: alphanumeric at both
/// ends, with single `_`, `-` or `.` separators in between (`com.acme.panel`).
pub fn validate_identifier(value: Option<&str>) -> Result<(), ValidationError> {
    validate_non_empty(value)?;
    match value {
        Some(v) if ID_RE.is_match(v) => Ok(()),
        _ => Err(ValidationError::InvalidId {
            pattern: ID_PATTERN,
        }),
    }
}

/// Passes only when exactly one option was ticked.
pub fn validate_exactly_one_selected<T>(selections: &[T]) -> Result<(), ValidationError> {
    match selections.len() {
        0 => Err(ValidationError::NothingSelected),
        1 => Ok(()),
        _ => Err(ValidationError::TooManySelected),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty_rejects_missing_and_blank() {
        assert_eq!(validate_non_empty(None), Err(ValidationError::Missing));
        assert_eq!(validate_non_empty(Some("")), Err(ValidationError::Missing));
        assert_eq!(validate_non_empty(Some(" \t\n")), Err(ValidationError::Missing));
        assert!(validate_non_empty(Some(" My Panel ")).is_ok());
    }

    #[test]
    fn test_identifier_accepts_valid_ids() {
        for id in ["a", "abc", "abc-123", "my_panel", "com.acme.panel", "A1.b2-c3_d4"] {
            assert!(validate_identifier(Some(id)).is_ok(), "expected '{}' to pass", id);
        }
    }

    #[test]
    fn test_identifier_rejects_invalid_ids() {
        for id in ["-abc", "abc-", ".abc", "a--b", "a.-b", "my panel", "café", " abc", "abc/def"] {
            assert_eq!(
                validate_identifier(Some(id)),
                Err(ValidationError::InvalidId { pattern: ID_PATTERN }),
                "expected '{}' to fail",
                id
            );
        }
    }

    #[test]
    fn test_identifier_reports_missing_before_pattern() {
        assert_eq!(validate_identifier(Some("")), Err(ValidationError::Missing));
        assert_eq!(validate_identifier(None), Err(ValidationError::Missing));
    }

    #[test]
    fn test_identifier_message_includes_pattern() {
        let message = validate_identifier(Some("-abc")).unwrap_err().to_string();
        assert!(message.contains(ID_PATTERN));
    }

    #[test]
    fn test_exactly_one_selected() {
        let none: [&str; 0] = [];
        assert_eq!(
            validate_exactly_one_selected(&none),
            Err(ValidationError::NothingSelected)
        );
        assert_eq!(
            validate_exactly_one_selected(&["CC 2015", "CC 2017"]),
            Err(ValidationError::TooManySelected)
        );
        assert!(validate_exactly_one_selected(&["CC 2015"]).is_ok());

        assert_eq!(
            ValidationError::NothingSelected.to_string(),
            "You must select an option"
        );
        assert_eq!(
            ValidationError::TooManySelected.to_string(),
            "You may select one option only"
        );
    }
}
