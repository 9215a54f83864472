//! Collection response envelopes
//!
//! List endpoints answer either with a bare JSON array or with an object that
//! wraps the array under a resource-specific key.

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Expected shape of a list response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionShape {
    /// `[item, ...]`
    Bare,
    /// `{ "<key>": [item, ...] }`
    Wrapped(&'static str),
}

/// Decode a collection from either envelope shape
///
/// A bare array is accepted whatever shape was expected. A wrapped response
/// with the key missing or `null` yields an empty collection.
///
/// # Errors
///
/// Returns a message when the body is neither shape or an item fails to decode.
pub fn decode_collection<T: DeserializeOwned>(
    body: Value,
    shape: CollectionShape,
) -> Result<Vec<T>, String> {
    let items = match (body, shape) {
        (Value::Array(items), _) => items,
        (Value::Object(mut fields), CollectionShape::Wrapped(key)) => match fields.remove(key) {
            Some(Value::Array(items)) => items,
            Some(Value::Null) | None => {
                tracing::debug!(key, "collection key absent, treating as empty");
                Vec::new()
            }
            Some(other) => {
                return Err(format!(
                    "expected '{key}' to hold an array, found {}",
                    kind_of(&other)
                ));
            }
        },
        (other, CollectionShape::Bare) => {
            return Err(format!("expected an array, found {}", kind_of(&other)));
        }
        (other, CollectionShape::Wrapped(key)) => {
            return Err(format!(
                "expected an array or an object with '{key}', found {}",
                kind_of(&other)
            ));
        }
    };

    serde_json::from_value(Value::Array(items)).map_err(|e| e.to_string())
}

const fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
