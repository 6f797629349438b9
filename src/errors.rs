use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Body returned for any failure that escapes the booking pipeline.
pub const PROCESSING_FAILURE: &str = "Failed to correctly chat with the AI model.";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("AI provider error: {0}")]
    Ai(String),

    #[error("invalid request body: {0}")]
    InvalidRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request failed");

        // Clients only ever see the generic message; details stay in the logs.
        let body = serde_json::json!({ "error": PROCESSING_FAILURE });
        (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response()
    }
}
