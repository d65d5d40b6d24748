//! Error types for the mcp-local configuration system

use std::path::PathBuf;
use thiserror::Error;

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Explicitly requested configuration file not found
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Configuration parsing failed
    #[error("Failed to parse configuration: {source}")]
    ParseError { source: Box<figment::Error> },

    /// Configuration validation failed
    #[error("Configuration validation failed: {message}")]
    ValidationError { message: String },

    /// Configuration file format not supported
    #[error("Unsupported configuration file format: {format}")]
    UnsupportedFormat { format: String },

    /// Settings could not be rendered back to TOML
    #[error("Failed to render configuration: {message}")]
    RenderError { message: String },
}

impl ConfigError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        ConfigError::ValidationError {
            message: message.into(),
        }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(error: figment::Error) -> Self {
        ConfigError::ParseError {
            source: Box::new(error),
        }
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
