//! Domain error types
//!
//! This module defines the error hierarchy for tma-export.
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main tma-export error type
///
/// This is the primary error type used throughout the library.
#[derive(Debug, Error)]
pub enum TmaError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Validation errors (malformed grids, missing builder fields)
    #[error("Validation error: {0}")]
    Validation(String),

    /// The TMA data writer failed
    #[error("Write error: {0}")]
    Write(String),

    /// Workflow script could not be parsed or executed
    #[error("Script error: {0}")]
    Script(#[from] ScriptError),

    /// Shared state could not be accessed
    #[error("State error: {0}")]
    State(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Errors raised while lexing, parsing or executing workflow scripts
///
/// Offsets are byte offsets into the script source.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScriptError {
    /// Input ended in the middle of an expression
    #[error("unexpected end of script, expected {expected}")]
    UnexpectedEnd { expected: String },

    /// A character that cannot start any token
    #[error("unexpected character '{found}' at offset {offset}")]
    UnexpectedChar { found: char, offset: usize },

    /// A token other than the one the grammar requires
    #[error("expected {expected} at offset {offset}, found {found}")]
    UnexpectedToken {
        expected: String,
        found: String,
        offset: usize,
    },

    /// String literal was not closed
    #[error("unterminated string literal starting at offset {offset}")]
    UnterminatedString { offset: usize },

    /// Unknown or malformed escape sequence inside a string literal
    #[error("invalid escape sequence at offset {offset}")]
    InvalidEscape { offset: usize },

    /// Numeric literal could not be parsed
    #[error("invalid number '{literal}' at offset {offset}")]
    InvalidNumber { literal: String, offset: usize },

    /// Call arguments do not match the function signature
    #[error("invalid arguments for {function}: {reason}")]
    InvalidArguments { function: String, reason: String },
}

// Conversion from std::io::Error
impl From<std::io::Error> for TmaError {
    fn from(err: std::io::Error) -> Self {
        TmaError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for TmaError {
    fn from(err: serde_json::Error) -> Self {
        TmaError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for TmaError {
    fn from(err: toml::de::Error) -> Self {
        TmaError::Configuration(format!("TOML parse error: {err}"))
    }
}

impl From<toml::ser::Error> for TmaError {
    fn from(err: toml::ser::Error) -> Self {
        TmaError::Serialization(format!("TOML serialization error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tma_error_display() {
        let err = TmaError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_script_error_conversion() {
        let script_err = ScriptError::UnterminatedString { offset: 14 };
        let err: TmaError = script_err.into();
        assert!(matches!(err, TmaError::Script(_)));
        assert!(err.to_string().contains("offset 14"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: TmaError = io_err.into();
        assert!(matches!(err, TmaError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: TmaError = json_err.into();
        assert!(matches!(err, TmaError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: TmaError = toml_err.into();
        assert!(matches!(err, TmaError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_tma_error_implements_std_error() {
        let err = TmaError::Write("disk full".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
