//! Unified error handling for the server.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use catalog_engine::ValidationDetails;
use serde::Serialize;

/// Message returned for every unknown key.
pub const NOT_FOUND_MESSAGE: &str = "Product not found";

/// Message returned for a key segment that cannot be decoded.
pub const INVALID_KEY_MESSAGE: &str = "Invalid key";

/// Message returned for every rejected request body.
pub const INVALID_BODY_MESSAGE: &str = "Invalid body";

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Engine error: {0}")]
    Engine(#[from] catalog_engine::Error),

    #[error("Invalid body: {0}")]
    InvalidBody(ValidationDetails),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

/// Error response body.
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl AppError {
    fn parts(&self) -> (StatusCode, String, Option<serde_json::Value>) {
        use catalog_engine::Error as EngineError;

        match self {
            AppError::Engine(EngineError::NotFound(key)) | AppError::NotFound(key) => {
                tracing::debug!("No product matches key {:?}", key);
                (StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE.to_string(), None)
            }
            AppError::Engine(EngineError::ValidationFailed(details))
            | AppError::InvalidBody(details) => {
                tracing::warn!("Rejected body: {}", details);
                (
                    StatusCode::BAD_REQUEST,
                    INVALID_BODY_MESSAGE.to_string(),
                    serde_json::to_value(details).ok(),
                )
            }
            AppError::InvalidKey(reason) => {
                tracing::debug!("Rejected key: {}", reason);
                let mut details = ValidationDetails::default();
                details.push_form_error(reason.clone());
                (
                    StatusCode::BAD_REQUEST,
                    INVALID_KEY_MESSAGE.to_string(),
                    serde_json::to_value(&details).ok(),
                )
            }
            AppError::Engine(e) => {
                tracing::error!("Engine error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = self.parts();
        (status, Json(ErrorResponse { error, details })).into_response()
    }
}

/// Result type alias for handlers.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        let (status, message, details) =
            AppError::Engine(catalog_engine::Error::NotFound("x".into())).parts();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(message, "Product not found");
        assert!(details.is_none());

        let (status, message, details) =
            AppError::Engine(catalog_engine::Error::invalid_field("images", "Invalid url")).parts();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message, "Invalid body");
        assert_eq!(details.unwrap()["fieldErrors"]["images"][0], "Invalid url");

        let (status, _, _) =
            AppError::Engine(catalog_engine::Error::Storage("disk".into())).parts();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn invalid_key_is_a_json_bad_request() {
        let (status, message, details) = AppError::InvalidKey("bad utf-8".into()).parts();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message, "Invalid key");
        assert_eq!(details.unwrap()["formErrors"][0], "bad utf-8");
    }
}
