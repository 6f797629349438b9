use serde_json::{Number, Value};

use crate::errors::AppError;
use crate::models::{BookingResult, ComposedResponse, EventRecord, ParsedIntent};
use crate::services::ai::extract::{assistant_text, is_blank};
use crate::services::ai::intent::{parse_intent, request_intent};
use crate::services::ai::normalize::normalize_text;
use crate::services::catalog::fetch_catalog;
use crate::state::AppState;

/// Turn a free-form booking request into a response for the UI.
///
/// Only a failed model call is an error; every other outcome, including
/// unusable model output, is a regular [`ComposedResponse`].
pub async fn resolve_booking_intent(
    state: &AppState,
    prompt: &str,
) -> Result<ComposedResponse, AppError> {
    let raw = request_intent(state.llm.as_ref(), prompt)
        .await
        .map_err(|e| AppError::Ai(format!("{e:#}")))?;

    tracing::info!(raw = %raw, "model raw response");

    let Some(parsed) = recover_intent(&raw) else {
        return Ok(ComposedResponse::help());
    };

    tracing::info!(
        intent = ?parsed.intent,
        event = ?parsed.event,
        tickets = ?parsed.tickets,
        "parsed booking intent"
    );

    let catalog = fetch_catalog(state.catalog.as_ref()).await;
    tracing::info!(events = catalog.len(), "catalog loaded");

    let matched = state.matcher.match_events(&parsed, &catalog);
    let response = compose(parsed, matched);

    tracing::info!(outcome = response.kind(), "booking request resolved");

    Ok(response)
}

/// Extract, normalize and parse the model's answer. `None` means the user
/// should be shown the help payload.
pub fn recover_intent(raw: &Value) -> Option<ParsedIntent> {
    if is_blank(raw) {
        tracing::warn!("model returned an empty response");
        return None;
    }

    let mut text = assistant_text(raw);
    if text.is_empty() {
        text = raw.to_string();
    }

    let text = normalize_text(&text);
    tracing::debug!(text = %text, "assistant text");

    if text.is_empty() {
        tracing::warn!("model response contained no text");
        return None;
    }

    let parsed = parse_intent(&text);
    if parsed.is_none() {
        tracing::warn!(text = %text, "no JSON intent found in model response");
    }
    parsed
}

/// Shape the final response from a parsed intent and its matches.
pub fn compose(parsed: ParsedIntent, matched: Vec<EventRecord>) -> ComposedResponse {
    if matched.is_empty() {
        return ComposedResponse::no_match();
    }

    ComposedResponse::Matched(BookingResult {
        events: matched,
        tickets: parsed.tickets.unwrap_or_else(|| Number::from(0)),
        intent: parsed.intent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Intent;
    use serde_json::json;

    #[test]
    fn test_null_response_needs_help() {
        assert_eq!(recover_intent(&json!(null)), None);
    }

    #[test]
    fn test_quoted_escaped_reply() {
        let raw = json!(r#""{\"intent\":\"book\",\"event\":\"Jazz Concert\",\"tickets\":2}""#);
        assert_eq!(
            recover_intent(&raw),
            Some(ParsedIntent {
                intent: Some(Intent::Book),
                event: Some("Jazz Concert".to_string()),
                tickets: Some(Number::from(2)),
            })
        );
    }

    #[test]
    fn test_chat_completion_with_prose() {
        let raw = json!({
            "choices": [{"message": {"content": "Here you go: {\"intent\":\"view\"} enjoy!"}}]
        });
        assert_eq!(recover_intent(&raw).unwrap().intent, Some(Intent::View));
    }

    #[test]
    fn test_unrecognised_envelope_is_parsed_whole() {
        let raw = json!({"intent": "cancel", "event": "Gala", "tickets": 1});
        let parsed = recover_intent(&raw).unwrap();
        assert_eq!(parsed.intent, Some(Intent::Cancel));
        assert_eq!(parsed.event.as_deref(), Some("Gala"));
    }

    #[test]
    fn test_empty_output_falls_back_to_whole_response() {
        let raw = json!({"output": [], "intent": "view"});
        assert_eq!(recover_intent(&raw).unwrap().intent, Some(Intent::View));
    }

    #[test]
    fn test_plain_prose_needs_help() {
        assert_eq!(recover_intent(&json!("I can't help with that.")), None);
        assert_eq!(recover_intent(&json!("   ")), None);
    }

    #[test]
    fn test_compose_no_match() {
        let parsed = ParsedIntent {
            event: Some("opera".to_string()),
            ..Default::default()
        };
        assert_eq!(compose(parsed, vec![]), ComposedResponse::no_match());
    }

    #[test]
    fn test_compose_defaults() {
        let event: EventRecord =
            serde_json::from_value(json!({"id": 1, "eventName": "Gala"})).unwrap();
        let parsed = ParsedIntent {
            event: Some("gala".to_string()),
            ..Default::default()
        };

        match compose(parsed, vec![event.clone()]) {
            ComposedResponse::Matched(result) => {
                assert_eq!(result.events, vec![event]);
                assert_eq!(result.tickets, Number::from(0));
                assert_eq!(result.intent, None);
            }
            other => panic!("expected matched response, got {other:?}"),
        }
    }
}
