//! File and session errors

use std::path::PathBuf;

use thiserror::Error;

/// Backend read/write failures
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),
}

/// Outcome of a refused session operation
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("A file named {name:?} already exists")]
    NameCollision { name: String },

    #[error("File name must not be empty")]
    EmptyName,

    #[error("No file named {name:?}")]
    NotFound { name: String },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Malformed share token or storage payload.
///
/// Never surfaced to the user; callers treat it as "no data".
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Invalid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Expected a JSON object")]
    NotAnObject,

    #[error("Empty token")]
    Empty,
}

pub type Result<T> = std::result::Result<T, SessionError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error as IoError, ErrorKind};

    #[test]
    fn test_session_error_display() {
        let err = SessionError::NameCollision {
            name: "main.asm".to_string(),
        };
        assert_eq!(err.to_string(), "A file named \"main.asm\" already exists");

        assert_eq!(SessionError::EmptyName.to_string(), "File name must not be empty");
    }

    #[test]
    fn test_storage_error_from() {
        let storage = StorageError::Io {
            path: PathBuf::from("/tmp/files.json"),
            source: IoError::new(ErrorKind::PermissionDenied, "denied"),
        };
        let err: SessionError = storage.into();
        assert!(err.to_string().contains("/tmp/files.json"));
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_decode_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: DecodeError = json_err.into();
        assert!(err.to_string().starts_with("Invalid JSON"));
    }
}
