//! Envelope handling for backend ranking payloads.
//!
//! The backend has answered ranking requests in three shapes over time:
//!
//! - a bare array of records
//! - `{ "data": [...] }`
//! - an object carrying the records under some other array-valued key
//!   (`items`, `rankings`, ...)
//!
//! Anything else is rejected rather than read as an empty ranking, so a
//! backend that changed shape does not look like one with no data.
use common::{BackendError, BackendResult};
use serde_json::{Map, Value};

pub const DATA_KEY: &str = "data";

/// Pulls the list of raw ranking records out of a backend payload.
pub fn extract_records(raw: Value) -> BackendResult<Vec<Value>> {
    match raw {
        Value::Array(items) => Ok(items),
        Value::Object(mut obj) => {
            let key = array_key(&obj).map(str::to_owned);
            match key.and_then(|key| obj.remove(&key)) {
                Some(Value::Array(items)) => Ok(items),
                _ => Err(BackendError::malformed(
                    "response object has no array field",
                    &Value::Object(obj).to_string(),
                )),
            }
        }
        other => Err(BackendError::malformed(
            format!("expected an array or object, got {}", json_type(&other)),
            &other.to_string(),
        )),
    }
}

/// `data` wins when it holds an array; otherwise the first array-valued key
/// in document order.
fn array_key(obj: &Map<String, Value>) -> Option<&str> {
    if matches!(obj.get(DATA_KEY), Some(Value::Array(_))) {
        return Some(DATA_KEY);
    }
    obj.iter()
        .find(|(_, value)| value.is_array())
        .map(|(key, _)| key.as_str())
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
