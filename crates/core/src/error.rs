//! Error types for the key model
//!
//! This module defines all error types used throughout the crate.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use thiserror::Error;

/// Result type alias for key operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for key construction and the two codecs
///
/// Every fallible entry point (`build()`, `from_partial`, `from_wire_bytes`,
/// `from_url_safe`) surfaces exactly one of these variants; nothing is
/// silently coerced or defaulted.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Structural validation failed (empty kind or dataset, or promoting a
    /// leaf that has neither an id nor a name)
    #[error("invalid key: {0}")]
    Validation(String),

    /// Wire bytes do not form a well-formed key message
    #[error("malformed key message: {0}")]
    Parse(String),

    /// URL-safe text could not be decoded back into wire bytes
    #[error("url-safe decoding failed: {0}")]
    Decoding(String),

    /// Wire serialization failed while producing the URL-safe form
    ///
    /// The encoding scheme is fixed and total for well-formed keys, so this
    /// indicates an unexpected environment rather than bad caller input.
    #[error("url-safe encoding failed: {0}")]
    Encoding(String),
}

impl From<bincode::Error> for Error {
    fn from(e: bincode::Error) -> Self {
        Error::Parse(e.to_string())
    }
}

impl From<base64::DecodeError> for Error {
    fn from(e: base64::DecodeError) -> Self {
        Error::Decoding(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_validation() {
        let err = Error::Validation("kind must not be empty".to_string());
        let msg = err.to_string();
        assert!(msg.contains("invalid key"));
        assert!(msg.contains("kind must not be empty"));
    }

    #[test]
    fn test_error_display_parse() {
        let err = Error::Parse("unexpected end of input".to_string());
        let msg = err.to_string();
        assert!(msg.contains("malformed key message"));
        assert!(msg.contains("unexpected end of input"));
    }

    #[test]
    fn test_error_display_decoding() {
        let err = Error::Decoding("invalid byte 0x2e".to_string());
        assert!(err.to_string().contains("url-safe decoding failed"));
    }

    #[test]
    fn test_error_display_encoding() {
        let err = Error::Encoding("buffer too small".to_string());
        assert!(err.to_string().contains("url-safe encoding failed"));
    }

    #[test]
    fn test_error_from_bincode() {
        let invalid_data = vec![0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF];
        let result: Result<String> = bincode::deserialize(&invalid_data).map_err(|e| e.into());
        assert!(matches!(result, Err(Error::Parse(_))));
    }

    #[test]
    fn test_error_pattern_matching() {
        let err = Error::Validation("dataset must not be empty".to_string());
        match err {
            Error::Validation(msg) => assert!(msg.contains("dataset")),
            _ => panic!("Wrong error variant"),
        }
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_result() -> Result<i32> {
            Ok(42)
        }

        assert_eq!(returns_result().unwrap(), 42);
    }
}
