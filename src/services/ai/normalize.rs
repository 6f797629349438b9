/// Trim model text and peel off one layer of quoting.
///
/// A reply wrapped in matching `"` or `'` is first decoded as a JSON string
/// literal, which also undoes escapes like `\"` and `\n`. If that fails the
/// outer characters are simply dropped.
pub fn normalize_text(text: &str) -> String {
    let trimmed = text.trim();

    let (Some(first), Some(last)) = (trimmed.chars().next(), trimmed.chars().last()) else {
        return String::new();
    };

    if first != last || !matches!(first, '"' | '\'') {
        return trimmed.to_string();
    }

    if let Ok(decoded) = serde_json::from_str::<String>(trimmed) {
        return decoded.trim().to_string();
    }

    // Both quote characters are one byte wide; a lone quote leaves nothing.
    trimmed
        .get(1..trimmed.len() - 1)
        .unwrap_or("")
        .trim()
        .to_string()
}
