//! API error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use textsift_core::SiftError;

/// API error response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    /// Error code
    pub code: String,
    /// Human-readable message
    pub message: String,
    /// Additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn not_found(resource: &str) -> Self {
        Self::new("NOT_FOUND", format!("{resource} not found"))
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn schema_error(message: impl Into<String>) -> Self {
        Self::new("SCHEMA_ERROR", message)
    }

    pub fn internal_error() -> Self {
        Self::new("INTERNAL_ERROR", "Internal server error")
    }
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    /// The uploaded sheet does not carry the expected schema
    Schema(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiError::not_found(&msg)),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ApiError::bad_request(msg)),
            AppError::Schema(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiError::schema_error(msg),
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::internal_error().with_details(msg),
            ),
        };

        (status, Json(error)).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<SiftError> for AppError {
    fn from(err: SiftError) -> Self {
        match err {
            SiftError::Schema(msg) => AppError::Schema(msg),
            SiftError::Parse(msg) => AppError::BadRequest(format!("Parse error: {msg}")),
            SiftError::InvalidInput(msg) => AppError::BadRequest(msg),
            SiftError::Validation(msg) => AppError::BadRequest(msg),
            SiftError::Extraction(msg) => AppError::Internal(format!("Extraction error: {msg}")),
            SiftError::Config(msg) => AppError::Internal(format!("Configuration error: {msg}")),
            SiftError::Other(err) => AppError::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_maps_to_422() {
        let response = AppError::Schema("missing text column".into()).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_sift_error_conversion() {
        let err: AppError = SiftError::Schema("bad header".into()).into();
        assert!(matches!(err, AppError::Schema(_)));

        let err: AppError = SiftError::Parse("corrupt workbook".into()).into();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
