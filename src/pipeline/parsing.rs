use serde_json::{Map, Value};
use tracing::debug;

use crate::error::ParseError;

use super::sanitize::sanitize;

/// Parses a completion into a JSON object.
///
/// Two attempts only: the raw text as-is, then the sanitized text. A failure
/// after the second attempt carries the second error and a bounded excerpt of
/// the original text.
pub fn parse(raw: &str) -> Result<Map<String, Value>, ParseError> {
    match parse_object(raw) {
        Ok(object) => return Ok(object),
        Err(message) => debug!(%message, "strict parse failed, retrying sanitized text"),
    }

    let sanitized = sanitize(raw);
    parse_object(&sanitized).map_err(|message| ParseError::new(message, raw))
}

fn parse_object(text: &str) -> Result<Map<String, Value>, String> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(object)) => Ok(object),
        Ok(other) => Err(format!("expected a JSON object, found {}", value_kind(&other))),
        Err(err) => Err(err.to_string()),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
