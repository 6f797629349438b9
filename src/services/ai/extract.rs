use anyhow::Context;
use serde_json::Value;

/// Envelope shapes a chat backend is known to answer with.
///
/// Classification is by priority: the first shape that fits wins, and
/// anything unrecognised lands in `Other`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ModelResponse<'a> {
    /// `null`, `false`, `0` or `""`.
    Empty,
    /// The body was already a bare string.
    Text(&'a str),
    /// OpenAI-style `choices[0].message.content` or `choices[0].content`.
    ChatChoice(&'a str),
    /// Responses-API style `output` sequence.
    Output(&'a Value),
    /// Ollama-style top-level `message.content`.
    Message(&'a str),
    Other(&'a Value),
}

/// JSON values that count as "nothing there".
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

impl<'a> ModelResponse<'a> {
    pub fn classify(raw: &'a Value) -> Self {
        if is_blank(raw) {
            return ModelResponse::Empty;
        }
        if let Value::String(s) = raw {
            return ModelResponse::Text(s);
        }

        let choice = raw.get("choices").and_then(|c| c.get(0));
        if let Some(content) = non_empty_str(choice.and_then(|c| c.pointer("/message/content")))
            .or_else(|| non_empty_str(choice.and_then(|c| c.get("content"))))
        {
            return ModelResponse::ChatChoice(content);
        }

        if let Some(output) = raw.get("output").filter(|o| !is_blank(o)) {
            return ModelResponse::Output(output);
        }

        if let Some(content) = non_empty_str(raw.pointer("/message/content")) {
            return ModelResponse::Message(content);
        }

        ModelResponse::Other(raw)
    }

    /// Best-effort answer text, or an empty string when there is none.
    pub fn text(&self) -> String {
        match self {
            ModelResponse::Empty => String::new(),
            ModelResponse::Text(s) | ModelResponse::ChatChoice(s) | ModelResponse::Message(s) => {
                s.to_string()
            }
            ModelResponse::Output(output) => join_output(output).unwrap_or_else(|e| {
                tracing::debug!(error = %e, "could not flatten output sequence, serializing it whole");
                output.to_string()
            }),
            ModelResponse::Other(value) => value.to_string(),
        }
    }
}

/// Shorthand for `ModelResponse::classify(raw).text()`.
pub fn assistant_text(raw: &Value) -> String {
    ModelResponse::classify(raw).text()
}

fn join_output(output: &Value) -> anyhow::Result<String> {
    let items = output
        .as_array()
        .context("output is not a sequence")?;

    let parts = items
        .iter()
        .map(output_item_text)
        .collect::<Result<Vec<_>, _>>()
        .context("failed to serialize output element")?;

    Ok(parts.join(" "))
}

fn output_item_text(item: &Value) -> serde_json::Result<String> {
    if let Some(s) = item.as_str() {
        return Ok(s.to_string());
    }

    match item.get("content") {
        Some(Value::String(s)) if !s.is_empty() => Ok(s.clone()),
        Some(Value::Array(fragments)) => Ok(fragments
            .iter()
            .map(|f| f.get("text").and_then(Value::as_str).unwrap_or(""))
            .collect()),
        _ => serde_json::to_string(item),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bare_string() {
        let raw = json!("hello there");
        assert_eq!(ModelResponse::classify(&raw), ModelResponse::Text("hello there"));
        assert_eq!(assistant_text(&raw), "hello there");
    }

    #[test]
    fn test_chat_choice_message_content() {
        let raw = json!({"choices": [{"message": {"role": "assistant", "content": "X"}}]});
        assert_eq!(ModelResponse::classify(&raw), ModelResponse::ChatChoice("X"));
        assert_eq!(assistant_text(&raw), "X");
    }

    #[test]
    fn test_chat_choice_flat_content() {
        let raw = json!({"choices": [{"content": "flat"}]});
        assert_eq!(assistant_text(&raw), "flat");
    }

    #[test]
    fn test_output_sequence_mixed_elements() {
        let raw = json!({
            "output": [
                "lead",
                {"content": "plain"},
                {"content": [{"text": "frag"}, {"type": "refusal"}, {"text": "ment"}]},
                42
            ]
        });
        assert_eq!(assistant_text(&raw), "lead plain fragment 42");
    }

    #[test]
    fn test_output_object_without_content_is_serialized() {
        let raw = json!({"output": [{"kind": "x"}]});
        assert_eq!(assistant_text(&raw), r#"{"kind":"x"}"#);
    }

    #[test]
    fn test_output_not_a_sequence_serializes_output() {
        let raw = json!({"output": {"content": "nested"}});
        assert!(matches!(ModelResponse::classify(&raw), ModelResponse::Output(_)));
        assert_eq!(assistant_text(&raw), r#"{"content":"nested"}"#);
    }

    #[test]
    fn test_top_level_message_content() {
        let raw = json!({"model": "llama3.2", "message": {"role": "assistant", "content": "ollama says"}});
        assert_eq!(ModelResponse::classify(&raw), ModelResponse::Message("ollama says"));
    }

    #[test]
    fn test_choices_win_over_message() {
        let raw = json!({
            "choices": [{"message": {"content": "first"}}],
            "message": {"content": "second"}
        });
        assert_eq!(assistant_text(&raw), "first");
    }

    #[test]
    fn test_empty_choice_content_falls_through() {
        let raw = json!({"choices": [{"message": {"content": ""}}], "message": {"content": "fallback"}});
        assert_eq!(assistant_text(&raw), "fallback");
    }

    #[test]
    fn test_unknown_shape_serializes_whole_response() {
        let raw = json!({"intent": "view"});
        assert_eq!(ModelResponse::classify(&raw), ModelResponse::Other(&raw));
        assert_eq!(assistant_text(&raw), r#"{"intent":"view"}"#);
    }

    #[test]
    fn test_blank_values_are_empty() {
        for raw in [json!(null), json!(false), json!(0), json!("")] {
            assert_eq!(ModelResponse::classify(&raw), ModelResponse::Empty);
            assert_eq!(assistant_text(&raw), "");
        }
    }
}
