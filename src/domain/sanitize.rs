use serde_json::Value;

use crate::constants::MAX_FIELD_CHARS;

/// Trims, strips every `<` and `>` and caps the result at 1000 characters.
///
/// This is bracket stripping, not HTML sanitization: `<b>hi</b>` becomes
/// `bhi/b`. Applying it twice yields the same string.
pub fn sanitize_input(input: &str) -> String {
    input
        .trim()
        .chars()
        .filter(|c| *c != '<' && *c != '>')
        .take(MAX_FIELD_CHARS)
        .collect()
}

/// String form of an untyped field before sanitization.
pub fn coerce_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}
