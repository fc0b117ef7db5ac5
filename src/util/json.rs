// file: src/util/json.rs
// description: null-safe typed access to fields of json objects
// reference: https://docs.rs/serde_json

use crate::error::Result;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Deserializes `elem[key]` into `T`.
///
/// A null `elem`, a missing key or an explicit `null` value all give
/// `Ok(None)`. Only a value of the wrong shape is an error.
pub fn json_to_object<T: DeserializeOwned>(elem: &Value, key: &str) -> Result<Option<T>> {
    match elem.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => Ok(Some(T::deserialize(value)?)),
    }
}

/// Reads `obj[key]` as text. Scalars other than strings come back in their
/// JSON form; null and missing fields give `None`.
pub fn get_as_string(obj: &Value, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

pub fn get_as_long(obj: &Value, key: &str) -> i64 {
    obj.get(key).and_then(as_i64).unwrap_or(0)
}

pub fn get_as_int(obj: &Value, key: &str) -> i32 {
    obj.get(key)
        .and_then(as_i64)
        .and_then(|v| i32::try_from(v).ok())
        .unwrap_or(0)
}

fn as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}
