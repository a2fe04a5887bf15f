//! Client error types

use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Credentials rejected by the hosted API
    #[error("Authentication required")]
    Unauthorized,

    /// Single-record lookup found nothing
    #[error("{0}")]
    NotFound(String),

    /// Profile exists but its role is outside the staff set
    #[error("Profile with ID {0} is not a staff member")]
    NotStaff(i64),

    /// The hosted API rejected the request as a whole
    #[error("Request rejected: {0}")]
    Rejected(String),

    /// A write produced no successful record
    #[error("{0}")]
    WriteFailed(String),

    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// The caller cancelled the operation
    #[error("Operation cancelled")]
    Cancelled,

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound(_))
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
