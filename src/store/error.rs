//! Lead store error types
//!
//! Errors raised by durable slots. The store itself never surfaces them:
//! the persistence adapter logs and swallows every one.

use thiserror::Error;

/// Errors that can occur while reading or writing a durable slot
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Slot refused the operation (read-only, injected failure, ...)
    #[error("Slot error: {0}")]
    Slot(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreError::Slot("write rejected".to_string());
        assert_eq!(err.to_string(), "Slot error: write rejected");

        let err = StoreError::Serialization("expected value".to_string());
        assert_eq!(err.to_string(), "Serialization error: expected value");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let store_err: StoreError = io_err.into();
        assert!(matches!(store_err, StoreError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<Vec<u32>>("not json").unwrap_err();
        let store_err: StoreError = json_err.into();
        assert!(matches!(store_err, StoreError::Serialization(_)));
    }
}
