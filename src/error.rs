//! Error types for the upload and poll flows

use std::time::Duration;

use crate::backend::BackendError;

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Input problems caught before any remote call is made
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please select a video file first!")]
    NoFile,

    #[error("File too large! Please select a video under {limit_mib}MB.")]
    TooLarge { size: u64, limit_mib: u64 },

    #[error("Please enter a Video ID!")]
    MissingId,
}

/// Error types for client operations
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Remote(#[from] BackendError),

    #[error("Video ID not found! Please check the ID and try again.")]
    NotFound(String),

    #[error("malformed AI report: {0}")]
    MalformedPayload(String),

    #[error("request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("failed to read video file: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::MalformedPayload(err.to_string())
    }
}
