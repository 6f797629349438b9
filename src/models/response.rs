use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Number;

use super::{EventRecord, Intent};

pub const HELP_INSTRUCTION: &str =
    "Please provide a short request that includes the desired action, event, and number of tickets!";
pub const HELP_EXAMPLE: &str = "I want to book 2 tickets for the jazz concert.";
pub const NO_MATCH_INSTRUCTION: &str =
    "No matching events found for your request. Please make another one.";

/// Fallback body steering the user toward a well-formed request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HelpPayload {
    pub intent: Option<Intent>,
    pub event: Option<String>,
    pub tickets: Option<Number>,
    pub instruction: String,
    pub example: String,
}

impl Default for HelpPayload {
    fn default() -> Self {
        Self {
            intent: None,
            event: None,
            tickets: None,
            instruction: HELP_INSTRUCTION.to_string(),
            example: HELP_EXAMPLE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingResult {
    pub events: Vec<EventRecord>,
    pub tickets: Number,
    pub intent: Option<Intent>,
}

/// Final outcome of a booking request. Every variant is a 200 to the client.
#[derive(Debug, Clone, PartialEq)]
pub enum ComposedResponse {
    Help(HelpPayload),
    NoMatch(String),
    Matched(BookingResult),
}

impl ComposedResponse {
    pub fn help() -> Self {
        ComposedResponse::Help(HelpPayload::default())
    }

    pub fn no_match() -> Self {
        ComposedResponse::NoMatch(NO_MATCH_INSTRUCTION.to_string())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ComposedResponse::Help(_) => "help",
            ComposedResponse::NoMatch(_) => "no_match",
            ComposedResponse::Matched(_) => "matched",
        }
    }
}

impl IntoResponse for ComposedResponse {
    fn into_response(self) -> Response {
        match self {
            ComposedResponse::Help(help) => (StatusCode::OK, Json(help)).into_response(),
            ComposedResponse::NoMatch(text) => (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                text,
            )
                .into_response(),
            ComposedResponse::Matched(result) => (StatusCode::OK, Json(result)).into_response(),
        }
    }
}
