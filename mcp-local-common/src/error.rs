//! Error types for mcp-local
//!
//! Every failure raised by the file, search, and backup layers is one of the
//! variants below. Low-level I/O failures are caught where they happen and
//! re-raised with the offending path embedded, so the tool layer can render a
//! readable message without inspecting the source error.

use std::io;
use std::path::Path;
use thiserror::Error as ThisError;

/// Severity levels for error classification
///
/// - **Warning**: Potential issue but the operation can proceed
/// - **Error**: The operation failed but the server keeps serving requests
/// - **Critical**: The server cannot continue to operate normally
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Potential issue but operation can proceed
    Warning,
    /// Operation failed but system can continue
    Error,
    /// System cannot continue, requires immediate attention
    Critical,
}

/// Trait for error types that have severity levels
pub trait Severity {
    /// Get the severity level of this error
    fn severity(&self) -> ErrorSeverity;
}

/// Conceptual category of a failure, independent of the variant that carries it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The target file, directory, or backup does not exist
    NotFound,
    /// Permission was denied or the content could not be decoded
    AccessDenied,
    /// The file exceeds the configured size limit
    TooLarge,
    /// The path could not be resolved or has the wrong type
    InvalidPath,
    /// A glob or regular expression failed to compile
    InvalidPattern,
    /// A backup could not be created, listed, restored, or deleted
    BackupFailure,
    /// Caller-supplied arguments are out of range or inconsistent
    ValidationFailure,
}

/// Result type alias for mcp-local operations
pub type Result<T> = std::result::Result<T, McpLocalError>;

/// Errors raised by the core file, search, and backup operations
#[derive(Debug, ThisError)]
#[non_exhaustive]
pub enum McpLocalError {
    /// File or directory not found
    #[error("File '{path}' does not exist")]
    NotFound {
        /// The path that was not found
        path: String,
    },

    /// Permission denied or unreadable content
    #[error("{message}")]
    AccessDenied {
        /// The path that could not be accessed
        path: String,
        /// Human readable description including the path
        message: String,
    },

    /// File is larger than the configured limit
    #[error("File too large ({size}). Limit: {limit}")]
    TooLarge {
        /// The oversized file
        path: String,
        /// Formatted size of the file
        size: String,
        /// Formatted size limit
        limit: String,
    },

    /// Path cannot be resolved or is the wrong kind of entry
    #[error("Invalid path '{path}': {reason}")]
    InvalidPath {
        /// The offending path
        path: String,
        /// Why the path was rejected
        reason: String,
    },

    /// Glob or regex pattern failed to compile
    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The pattern as supplied by the caller
        pattern: String,
        /// Compiler error message
        reason: String,
    },

    /// No backup exists for the file
    #[error("No backups found for '{path}'")]
    NoBackup {
        /// The file whose backups were requested
        path: String,
    },

    /// Backup creation, restore, or removal failed
    #[error("Backup error: {message}")]
    Backup {
        /// Description of the failure
        message: String,
    },

    /// Arguments failed validation
    #[error("{message}")]
    Validation {
        /// Description of the failure
        message: String,
    },
}

impl McpLocalError {
    /// Create a not found error for a path
    pub fn not_found(path: impl AsRef<Path>) -> Self {
        McpLocalError::NotFound {
            path: path.as_ref().display().to_string(),
        }
    }

    /// Create an access denied error with a message
    pub fn access_denied(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        McpLocalError::AccessDenied {
            path: path.as_ref().display().to_string(),
            message: message.into(),
        }
    }

    /// Create an invalid path error
    pub fn invalid_path(path: impl AsRef<Path>, reason: impl Into<String>) -> Self {
        McpLocalError::InvalidPath {
            path: path.as_ref().display().to_string(),
            reason: reason.into(),
        }
    }

    /// Create an invalid pattern error
    pub fn invalid_pattern(pattern: impl Into<String>, reason: impl ToString) -> Self {
        McpLocalError::InvalidPattern {
            pattern: pattern.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a missing backup error
    pub fn no_backup(path: impl AsRef<Path>) -> Self {
        McpLocalError::NoBackup {
            path: path.as_ref().display().to_string(),
        }
    }

    /// Create a backup error
    pub fn backup(message: impl Into<String>) -> Self {
        McpLocalError::Backup {
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        McpLocalError::Validation {
            message: message.into(),
        }
    }

    /// Re-raise an I/O error against the path it occurred on
    pub fn from_io(path: impl AsRef<Path>, error: io::Error) -> Self {
        let path = path.as_ref();
        match error.kind() {
            io::ErrorKind::NotFound => Self::not_found(path),
            io::ErrorKind::PermissionDenied => Self::access_denied(
                path,
                format!("Permission denied accessing '{}'", path.display()),
            ),
            _ => Self::access_denied(
                path,
                format!("Error accessing '{}': {}", path.display(), error),
            ),
        }
    }

    /// The conceptual error kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            McpLocalError::NotFound { .. } | McpLocalError::NoBackup { .. } => {
                ErrorKind::NotFound
            }
            McpLocalError::AccessDenied { .. } => ErrorKind::AccessDenied,
            McpLocalError::TooLarge { .. } => ErrorKind::TooLarge,
            McpLocalError::InvalidPath { .. } => ErrorKind::InvalidPath,
            McpLocalError::InvalidPattern { .. } => ErrorKind::InvalidPattern,
            McpLocalError::Backup { .. } => ErrorKind::BackupFailure,
            McpLocalError::Validation { .. } => ErrorKind::ValidationFailure,
        }
    }
}

impl Severity for McpLocalError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            // A failing backup means mutations are no longer protected
            McpLocalError::Backup { .. } => ErrorSeverity::Critical,

            McpLocalError::NotFound { .. }
            | McpLocalError::NoBackup { .. }
            | McpLocalError::AccessDenied { .. }
            | McpLocalError::TooLarge { .. }
            | McpLocalError::InvalidPath { .. } => ErrorSeverity::Error,

            McpLocalError::InvalidPattern { .. } | McpLocalError::Validation { .. } => {
                ErrorSeverity::Warning
            }
        }
    }
}
