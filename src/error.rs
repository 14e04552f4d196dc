use thiserror::Error;

use crate::schema::ValidationError;

/// Custom error type for Blockhost operations.
#[derive(Debug, Error)]
pub enum BlockhostError {
    /// Tool payload failed schema validation.
    #[error("Validation error at {}: {}", .0.path, .0.message)]
    Validation(ValidationError),

    /// Host-application adapter call failed.
    #[error("Host error: {0}")]
    Host(String),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<ValidationError> for BlockhostError {
    fn from(err: ValidationError) -> Self {
        BlockhostError::Validation(err)
    }
}

impl From<serde_json::Error> for BlockhostError {
    fn from(err: serde_json::Error) -> Self {
        BlockhostError::Serialization(err.to_string())
    }
}
