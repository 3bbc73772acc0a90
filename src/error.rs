use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("Invalid FIT: {0}")]
    InvalidFit(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("Activity contains no records")]
    EmptyActivity,
    #[error("No valid records found after filtering")]
    NoValidSamples,
}

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("Sink is not configured: {0}")]
    NotConfigured(&'static str),
    #[error("Failed to serialize payload: {0}")]
    Serialize(String),
    #[error("Upload request failed: {0}")]
    Request(String),
    #[error("Upload rejected with status {0}: {1}")]
    Status(u16, String),
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Process(#[from] ProcessError),
    #[error(transparent)]
    Sink(#[from] SinkError),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Decode(_) | AppError::Process(_) | AppError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Sink(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}
