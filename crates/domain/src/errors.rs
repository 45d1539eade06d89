//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Postdeck
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum PostdeckError {
    #[error("Document store error: {0}")]
    Store(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport-level failure talking to the store or the generation service.
    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Field-level rejection raised before any collaborator call.
    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },

    /// The generation service answered but produced nothing usable.
    #[error("No usable result: {0}")]
    EmptyResult(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl PostdeckError {
    /// Shorthand for a field-level validation error.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation { field: field.into(), message: message.into() }
    }

    /// Whether repeating the identical operation can reasonably succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Store(_))
    }
}

/// Result type alias for Postdeck operations
pub type Result<T> = std::result::Result<T, PostdeckError>;
