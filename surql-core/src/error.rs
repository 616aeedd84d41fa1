//! Error types for surql-core

use thiserror::Error;

/// The main error type for statement building and submission
#[derive(Error, Debug)]
pub enum Error {
    /// A required argument was empty or out of range
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// CREATE/UPDATE rendered without a data record
    #[error("Validation error: {operation} requires data to be set")]
    MissingData { operation: String },

    /// Unrecognized statement operation token
    #[error("Invalid operation: '{operation}'")]
    InvalidOperation { operation: String },

    /// Malformed `record(<table>)` type token
    #[error("Invalid record reference for field '{field}': '{type_token}' must match record(<table>)")]
    InvalidRecordReference { field: String, type_token: String },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The remote endpoint answered with a non-success status
    #[error("Transport error: {status}")]
    Transport { status: String },

    /// HTTP client error
    #[cfg(feature = "http")]
    #[error("HTTP error: {0}")]
    Http(String),
}

/// Convenience Result type for surql-core operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a new validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Validation error for an empty required argument
    pub fn empty_argument(argument: &str) -> Self {
        Self::validation(format!("{argument} must not be empty"))
    }

    /// Create a new missing data error
    pub fn missing_data(operation: impl Into<String>) -> Self {
        Self::MissingData {
            operation: operation.into(),
        }
    }

    /// Create a new invalid operation error
    pub fn invalid_operation(operation: impl Into<String>) -> Self {
        Self::InvalidOperation {
            operation: operation.into(),
        }
    }

    /// Create a new invalid record reference error
    pub fn invalid_record_reference(field: impl Into<String>, type_token: impl Into<String>) -> Self {
        Self::InvalidRecordReference {
            field: field.into(),
            type_token: type_token.into(),
        }
    }

    /// Create a new transport error
    pub fn transport(status: impl Into<String>) -> Self {
        Self::Transport {
            status: status.into(),
        }
    }
}

#[cfg(feature = "http")]
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.to_string())
    }
}
