//! Error types for healthfaq operations.
//!
//! This module provides the error hierarchy using `thiserror` for storage,
//! backend, I/O, and CLI command failures. The FAQ pipeline itself never
//! surfaces these to its caller; see [`crate::pipeline`].

use thiserror::Error;

/// Result type alias for healthfaq operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    /// Storage-related errors (database operations).
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Text-generation backend errors.
    #[error("backend error: {0}")]
    Backend(#[from] BackendError),

    /// I/O errors (file operations).
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// CLI command errors.
    #[error("command error: {0}")]
    Command(#[from] CommandError),

    /// Invalid state errors.
    #[error("invalid state: {message}")]
    InvalidState {
        /// Description of the invalid state.
        message: String,
    },

    /// Configuration errors.
    #[error("configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },
}

/// Storage-specific errors for session database operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Database connection or query error.
    #[error("database error: {0}")]
    Database(String),

    /// Storage not initialized (init command not run).
    #[error("session not initialized. Run: healthfaq init")]
    NotInitialized,

    /// Buffer not found by name.
    #[error("buffer not found: {identifier}")]
    BufferNotFound {
        /// Buffer name that was not found.
        identifier: String,
    },

    /// Attempt to write a buffer under a reserved identity key.
    #[error("buffer name is reserved for session identity: {name}")]
    ReservedName {
        /// The rejected name.
        name: String,
    },

    /// Database was created by an incompatible schema version.
    #[error("unsupported schema version {found} (expected {expected})")]
    UnsupportedSchema {
        /// Version stored in the database.
        found: u32,
        /// Version this build understands.
        expected: u32,
    },

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Errors raised by a text-generation backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// No API key was configured.
    #[error("no API key configured (set GROQ_API_KEY or pass --api-key)")]
    MissingApiKey,

    /// The request could not be built or the service returned an error.
    #[error("request failed: {0}")]
    Request(String),

    /// The service answered without any generated text.
    #[error("backend returned an empty response")]
    EmptyResponse,

    /// The backend was never constructed.
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

/// I/O-specific errors for file operations.
#[derive(Error, Debug)]
pub enum IoError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path to the file that was not found.
        path: String,
    },

    /// Failed to read file.
    #[error("failed to read file: {path}: {reason}")]
    ReadFailed {
        /// Path to the file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Failed to write file.
    #[error("failed to write file: {path}: {reason}")]
    WriteFailed {
        /// Path to the file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Directory creation error.
    #[error("failed to create directory: {path}: {reason}")]
    DirectoryFailed {
        /// Path to the directory.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// File extension not supported for text extraction.
    #[error("unsupported file format: {path} (supported: txt, md, text)")]
    UnsupportedFormat {
        /// Path to the rejected file.
        path: String,
    },

    /// Generic I/O error wrapper.
    #[error("I/O error: {0}")]
    Generic(String),
}

/// CLI command-specific errors.
#[derive(Error, Debug)]
pub enum CommandError {
    /// Invalid argument provided.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Missing required argument.
    #[error("missing required argument: {0}")]
    MissingArgument(String),

    /// Command execution failed.
    #[error("command execution failed: {0}")]
    ExecutionFailed(String),
}

// Implement From traits for library errors

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(IoError::Generic(err.to_string()))
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Self::Storage(StorageError::Database(err.to_string()))
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<async_openai::error::OpenAIError> for BackendError {
    fn from(err: async_openai::error::OpenAIError) -> Self {
        Self::Request(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidState {
            message: "test error".to_string(),
        };
        assert_eq!(err.to_string(), "invalid state: test error");
    }

    #[test]
    fn test_storage_error_display() {
        let err = StorageError::NotInitialized;
        assert_eq!(
            err.to_string(),
            "session not initialized. Run: healthfaq init"
        );

        let err = StorageError::BufferNotFound {
            identifier: "report_summary".to_string(),
        };
        assert_eq!(err.to_string(), "buffer not found: report_summary");

        let err = StorageError::ReservedName {
            name: "email".to_string(),
        };
        assert!(err.to_string().contains("reserved"));

        let err = StorageError::UnsupportedSchema {
            found: 9,
            expected: 1,
        };
        assert_eq!(err.to_string(), "unsupported schema version 9 (expected 1)");
    }

    #[test]
    fn test_backend_error_display() {
        assert!(BackendError::MissingApiKey.to_string().contains("GROQ_API_KEY"));
        assert_eq!(
            BackendError::Request("timeout".to_string()).to_string(),
            "request failed: timeout"
        );
        assert_eq!(
            BackendError::EmptyResponse.to_string(),
            "backend returned an empty response"
        );
    }

    #[test]
    fn test_io_error_variants() {
        let err = IoError::FileNotFound {
            path: "/tmp/report.txt".to_string(),
        };
        assert_eq!(err.to_string(), "file not found: /tmp/report.txt");

        let err = IoError::UnsupportedFormat {
            path: "scan.pdf".to_string(),
        };
        assert!(err.to_string().contains("scan.pdf"));

        let err = IoError::ReadFailed {
            path: "/tmp/test".to_string(),
            reason: "permission denied".to_string(),
        };
        assert!(err.to_string().contains("permission denied"));
    }

    #[test]
    fn test_command_error_display() {
        let err = CommandError::MissingArgument("--name".to_string());
        assert_eq!(err.to_string(), "missing required argument: --name");
    }

    #[test]
    fn test_error_from_conversions() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));

        let err: Error = StorageError::NotInitialized.into();
        assert!(matches!(err, Error::Storage(_)));

        let err: Error = BackendError::EmptyResponse.into();
        assert!(matches!(err, Error::Backend(_)));

        let err: Error = CommandError::ExecutionFailed("x".to_string()).into();
        assert!(matches!(err, Error::Command(_)));
    }

    #[test]
    fn test_from_rusqlite_error() {
        let err: Error = rusqlite::Error::InvalidQuery.into();
        assert!(matches!(err, Error::Storage(StorageError::Database(_))));
    }

    #[test]
    fn test_from_serde_json_error_to_storage_error() {
        let json_err: serde_json::Error = serde_json::from_str::<i32>("invalid").unwrap_err();
        let err: StorageError = json_err.into();
        assert!(matches!(err, StorageError::Serialization(_)));
    }
}
