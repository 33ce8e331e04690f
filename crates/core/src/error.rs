//! Error types for prompthub.
//!
//! This module defines a unified error enum covering configuration, document,
//! validation, remote hub and I/O failures. Both binaries report any of these
//! the same way and exit with a non-zero status.

use std::path::PathBuf;
use thiserror::Error;

/// Unified error type for prompthub.
///
/// All fallible functions return `Result<T, AppError>`.
#[derive(Error, Debug)]
pub enum AppError {
    /// Required environment variables are not set
    #[error("Missing required environment variables: {}", .0.join(", "))]
    MissingConfiguration(Vec<String>),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Prompt document file does not exist
    #[error("Prompt document not found: {}", .0.display())]
    MissingDocument(PathBuf),

    /// Prompt document exists but cannot be decoded
    #[error("Malformed prompt document: {0}")]
    MalformedDocument(String),

    /// Prompt document failed one or more validation rules
    #[error("Prompt validation failed with {} violation(s)", .0.len())]
    Validation(Vec<String>),

    /// Network, authentication or protocol errors from the prompt hub
    #[error("Remote hub error: {0}")]
    Remote(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_configuration_lists_variables() {
        let err = AppError::MissingConfiguration(vec![
            "LANGSMITH_API_KEY".to_string(),
            "OTHER_KEY".to_string(),
        ]);
        assert_eq!(
            err.to_string(),
            "Missing required environment variables: LANGSMITH_API_KEY, OTHER_KEY"
        );
    }

    #[test]
    fn test_validation_counts_violations() {
        let err = AppError::Validation(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(err.to_string(), "Prompt validation failed with 2 violation(s)");
    }

    #[test]
    fn test_missing_document_shows_path() {
        let err = AppError::MissingDocument(PathBuf::from("prompts/x.yml"));
        assert!(err.to_string().contains("prompts/x.yml"));
    }
}
