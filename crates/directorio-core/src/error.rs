//! Error types for the directory
//!
//! Import errors are the only ones a user ever sees; their `Display` strings
//! are written to be shown as-is. Fetch errors only reach the logs.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised when importing a user-supplied directory file
#[derive(Error, Debug)]
pub enum ImportError {
    /// The file is not valid JSON
    #[error("Could not read the JSON file: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// The top-level JSON value is not an array
    #[error("The file does not contain a valid array.")]
    NotAnArray,
}

/// Errors raised while loading the external directory at startup
#[derive(Error, Debug)]
pub enum FetchError {
    /// The HTTP request could not be completed
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("Server responded with status {0}")]
    Status(u16),

    /// The local directory file could not be read
    #[error("Failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The payload is not JSON
    #[error("Invalid JSON payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// A textual value that does not name any known variant
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown {kind}: '{value}' (expected one of: {expected})")]
pub struct UnknownValue {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_error_display() {
        assert_eq!(
            ImportError::NotAnArray.to_string(),
            "The file does not contain a valid array."
        );

        let json_err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let msg = ImportError::InvalidJson(json_err).to_string();
        assert!(msg.starts_with("Could not read the JSON file"));
    }

    #[test]
    fn test_fetch_error_display() {
        assert_eq!(
            FetchError::Status(404).to_string(),
            "Server responded with status 404"
        );

        let err = FetchError::Read {
            path: PathBuf::from("/srv/directorio_autoridades.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.to_string().contains("/srv/directorio_autoridades.json"));
    }

    #[test]
    fn test_unknown_value_display() {
        let err = UnknownValue {
            kind: "sort key",
            value: "salary".to_string(),
            expected: "priority, name, position",
        };
        assert_eq!(
            err.to_string(),
            "Unknown sort key: 'salary' (expected one of: priority, name, position)"
        );
    }
}
