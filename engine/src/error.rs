//! Error types for the catalog engine.

use crate::schema::ValidationDetails;
use thiserror::Error;

/// All possible errors from the catalog engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    // Lookup errors
    #[error("product not found: {0}")]
    NotFound(String),

    // Validation errors
    #[error("validation failed: {0}")]
    ValidationFailed(ValidationDetails),

    // Transport errors, raised by callers that talk to the API
    #[error("network failure: {0}")]
    NetworkFailure(String),

    // Persistence errors
    #[error("storage error: {0}")]
    Storage(String),

    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),
}

impl Error {
    /// Build a validation error with a single root-level message.
    pub fn invalid(message: impl Into<String>) -> Self {
        let mut details = ValidationDetails::default();
        details.push_form_error(message);
        Error::ValidationFailed(details)
    }

    /// Build a validation error with a single message attached to `field`.
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut details = ValidationDetails::default();
        details.push_field_error(field, message);
        Error::ValidationFailed(details)
    }
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
