//! Parameter validation errors

use thiserror::Error;

/// A request parameter failed a pre-flight guard
///
/// Raised before any network activity. The caller can always recover by
/// correcting the offending input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid '{param}': expected {expected}, got {got}")]
pub struct ValidationError {
    /// Name of the offending parameter
    pub param: &'static str,
    /// Human readable description of the accepted values
    pub expected: String,
    /// The rejected value as supplied by the caller
    pub got: String,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new(param: &'static str, expected: impl Into<String>, got: impl ToString) -> Self {
        Self {
            param,
            expected: expected.into(),
            got: got.to_string(),
        }
    }

    /// Create an error for a parameter restricted to a fixed set of values
    pub fn one_of<T: std::fmt::Display>(param: &'static str, accepted: &[T], got: impl ToString) -> Self {
        let accepted: Vec<String> = accepted.iter().map(|v| format!("'{}'", v)).collect();
        Self::new(param, format!("one of {}", accepted.join(", ")), got)
    }
}

/// Result type for parameter guards
pub type ValidationResult<T> = Result<T, ValidationError>;
