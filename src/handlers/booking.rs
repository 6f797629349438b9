use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::ComposedResponse;
use crate::services::booking;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ParseRequest {
    #[serde(default)]
    pub prompt: String,
}

// POST /api/llm/parse
pub async fn parse_request(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ParseRequest>, JsonRejection>,
) -> Result<ComposedResponse, AppError> {
    // Rejections go through AppError so the body matches every other failure.
    let Json(payload) = payload.map_err(|rejection| {
        tracing::warn!(status = %rejection.status(), "rejected booking request body");
        AppError::InvalidRequest(rejection.body_text())
    })?;

    tracing::info!(prompt = %payload.prompt, "incoming booking request");

    booking::resolve_booking_intent(&state, &payload.prompt).await
}
