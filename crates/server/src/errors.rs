use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::ErrorBody;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::warn;

pub const STUDENT_NOT_FOUND: &str = "Student not found";
pub const MISSING_FIELDS: &str = "Missing name, age, or course";
pub const INVALID_FIELDS: &str = "Invalid name, age, or course";

/// Error response rendered as `{"error": message}` with the given status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub message: String,
}

impl JsonApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    pub fn not_found() -> Self { Self::new(StatusCode::NOT_FOUND, STUDENT_NOT_FOUND) }

    pub fn missing_fields() -> Self { Self::new(StatusCode::BAD_REQUEST, MISSING_FIELDS) }

    pub fn invalid_fields() -> Self { Self::new(StatusCode::BAD_REQUEST, INVALID_FIELDS) }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::NotFound(_) => Self::not_found(),
            ServiceError::Model(_) => Self::missing_fields(),
        }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        if self.status.is_client_error() {
            warn!(status = self.status.as_u16(), error = %self.message, "request rejected");
        }
        (self.status, Json(ErrorBody { error: self.message })).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("cannot bind {addr}: {source}")]
    Bind { addr: String, source: std::io::Error },
}
