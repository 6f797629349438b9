use serde_json::{Number, Value};

use crate::models::{Intent, ParsedIntent};
use crate::services::ai::extract::is_blank;
use crate::services::ai::{LlmProvider, Message};

const SYSTEM_PROMPT: &str = r#"You are an expert event planning assistant for an event booking platform. Your task is to PARSE user input to extract structured information such as the specific event and the number of desired tickets.

Return ONLY a JSON object (no markdown, no explanation) with this exact structure:
{
  "intent": "book" | "cancel" | "view",
  "event": "<event name>",
  "tickets": <number>
}

Intent rules:
- "book": the user wants to buy tickets for an event
- "cancel": the user wants to give back tickets they hold
- "view": the user wants to see which events are available
"#;

/// Ask the model to turn a free-form prompt into an intent. Returns the raw
/// response body.
pub async fn request_intent(llm: &dyn LlmProvider, prompt: &str) -> anyhow::Result<Value> {
    let messages = [Message {
        role: "user".to_string(),
        content: prompt.to_string(),
    }];

    llm.chat(SYSTEM_PROMPT, &messages).await
}

/// Recover a [`ParsedIntent`] from normalized model text.
///
/// Returns `None` when no JSON can be found, or when the JSON found is
/// `null`, `false`, `0` or `""`.
pub fn parse_intent(text: &str) -> Option<ParsedIntent> {
    // Try direct parse first
    if let Ok(value) = serde_json::from_str::<Value>(text) {
        return interpret(&value);
    }

    // Fall back to the widest embedded block
    let block = extract_json_block(text)?;
    match serde_json::from_str::<Value>(block) {
        Ok(value) => interpret(&value),
        Err(e) => {
            tracing::debug!(error = %e, "embedded JSON block did not parse");
            None
        }
    }
}

/// Span from the first `{` to the last `}`, else from the first `[` to the
/// last `]`.
///
/// The match is greedy: two separate objects in one reply come back as a
/// single span covering both, which then fails to parse.
pub fn extract_json_block(text: &str) -> Option<&str> {
    delimited_span(text, '{', '}').or_else(|| delimited_span(text, '[', ']'))
}

fn delimited_span(text: &str, open: char, close: char) -> Option<&str> {
    let start = text.find(open)?;
    let end = text.rfind(close).filter(|&end| end > start)?;
    Some(&text[start..=end])
}

fn interpret(value: &Value) -> Option<ParsedIntent> {
    if is_blank(value) {
        return None;
    }

    // Non-object JSON (an array, a number) still counts as a parse, just an
    // empty one.
    Some(ParsedIntent {
        intent: value
            .get("intent")
            .and_then(Value::as_str)
            .map(Intent::parse),
        event: value.get("event").and_then(event_name),
        tickets: value.get("tickets").and_then(ticket_count),
    })
}

fn event_name(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn ticket_count(value: &Value) -> Option<Number> {
    match value {
        Value::Number(n) => Some(n.clone()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
