use serde_json::{Map, Value};

use crate::error::RestError;

pub type JsonObject = Map<String, Value>;

/// Reduce a response body to a single JSON object.
///
/// Blank bodies and empty arrays become `{}`. A non-empty array yields its *last* element, which
/// must itself be an object; every other element is discarded. Callers relying on list endpoints
/// should be aware that this is lossy.
pub fn normalize_body(body: &str) -> Result<JsonObject, RestError> {
    if is_blank(body) {
        return Ok(JsonObject::new());
    }

    match serde_json::from_str::<Value>(body)? {
        Value::Object(object) => Ok(object),
        Value::Array(mut items) => match items.pop() {
            None => Ok(JsonObject::new()),
            Some(Value::Object(object)) => Ok(object),
            Some(other) => Err(RestError::TypeMismatch {
                found: kind_of(&other),
            }),
        },
        other => Err(RestError::TypeMismatch {
            found: kind_of(&other),
        }),
    }
}

/// Blank means only ASCII control characters and spaces; other Unicode whitespace such as
/// U+00A0 is left for the JSON parser to reject.
fn is_blank(body: &str) -> bool {
    body.chars().all(|c| c <= ' ')
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
