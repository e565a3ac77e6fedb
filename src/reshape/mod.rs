//! Two-phase decoding of CloudStack payloads.
//!
//! Responses arrive wrapped in envelopes whose keys depend on the command.
//! The helpers here strip those envelopes and normalise port fields that the
//! server emits as strings, leaving a `serde_json::Value` with the same shape
//! whether the command ran synchronously or as an asynchronous job. The
//! typed decode into a response struct happens last.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;

/// Where the useful object sits inside a payload.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ResultShape {
    /// The payload is the object itself, for example list envelopes
    /// (`{"count": 1, "firewallrule": [...]}`) or success records.
    Flat,
    /// The payload is keyed by an object-type tag, for example
    /// `{"firewallrule": {...}}`, and the tag must be stripped.
    Nested,
}

/// Errors raised while reshaping or decoding a payload.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ReshapeError {
    /// The body is not valid JSON.
    #[error("malformed JSON payload: {message}")]
    Json {
        /// Parser error message.
        message: String,
    },
    /// The body is not a single-key `<command>response` envelope.
    #[error("expected a single-key response envelope, found {found}")]
    Envelope {
        /// Description of what was found instead.
        found: String,
    },
    /// A nested payload is not keyed by exactly one object-type tag.
    #[error("expected a payload nested under one object-type key, found {found}")]
    Nesting {
        /// Description of what was found instead.
        found: String,
    },
    /// A numeric field holds a string that is not an integer.
    #[error("field {field} holds {value:?}, which is not an integer")]
    InvalidNumber {
        /// Field name.
        field: String,
        /// Offending string value.
        value: String,
    },
    /// The reshaped payload does not match the response type.
    #[error("payload does not match the expected response: {message}")]
    Decode {
        /// Deserializer error message.
        message: String,
    },
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => String::from("null"),
        Value::Bool(_) => String::from("a boolean"),
        Value::Number(_) => String::from("a number"),
        Value::String(_) => String::from("a string"),
        Value::Array(_) => String::from("an array"),
        Value::Object(map) => format!("an object with {} keys", map.len()),
    }
}

fn single_entry(map: Map<String, Value>) -> Option<(String, Value)> {
    if map.len() != 1 {
        return None;
    }
    map.into_iter().next()
}

/// Parses a synchronous response body and strips its `<command>response`
/// envelope.
///
/// # Errors
///
/// Returns [`ReshapeError::Json`] for invalid JSON and
/// [`ReshapeError::Envelope`] when the body is not a single-key object.
pub fn unwrap_response(body: &[u8]) -> Result<Value, ReshapeError> {
    let parsed: Value = serde_json::from_slice(body).map_err(|err| ReshapeError::Json {
        message: err.to_string(),
    })?;
    let found = describe(&parsed);
    let Value::Object(map) = parsed else {
        return Err(ReshapeError::Envelope { found });
    };
    single_entry(map)
        .map(|(_, inner)| inner)
        .ok_or(ReshapeError::Envelope { found })
}

/// Strips the object-type tag from a nested payload.
///
/// # Errors
///
/// Returns [`ReshapeError::Nesting`] unless `payload` is an object with a
/// single key whose value is an object or an array.
pub fn unwrap_nested(payload: Value) -> Result<Value, ReshapeError> {
    let found = describe(&payload);
    let Value::Object(map) = payload else {
        return Err(ReshapeError::Nesting { found });
    };
    match single_entry(map) {
        Some((_, inner @ (Value::Object(_) | Value::Array(_)))) => Ok(inner),
        _ => Err(ReshapeError::Nesting { found }),
    }
}

/// Applies `shape` to `payload`.
///
/// # Errors
///
/// Propagates [`unwrap_nested`] failures for [`ResultShape::Nested`].
pub fn apply_shape(payload: Value, shape: ResultShape) -> Result<Value, ReshapeError> {
    match shape {
        ResultShape::Flat => Ok(payload),
        ResultShape::Nested => unwrap_nested(payload),
    }
}

fn coerce_object(map: &mut Map<String, Value>, fields: &[&str]) -> Result<(), ReshapeError> {
    for field in fields {
        let Some(slot) = map.get_mut(*field) else {
            continue;
        };
        let Value::String(text) = slot else {
            continue;
        };
        let number = text
            .trim()
            .parse::<i64>()
            .map_err(|_| ReshapeError::InvalidNumber {
                field: (*field).to_owned(),
                value: text.clone(),
            })?;
        *slot = Value::from(number);
    }
    Ok(())
}

fn coerce_items(items: &mut [Value], fields: &[&str]) -> Result<(), ReshapeError> {
    for item in items {
        if let Value::Object(map) = item {
            coerce_object(map, fields)?;
        }
    }
    Ok(())
}

/// Rewrites string-encoded integers in `fields` as JSON numbers.
///
/// Accepts a single object, a bare list of objects, or a list envelope whose
/// array members hold the objects. Values that are already numbers are left
/// untouched, so the pass is idempotent.
///
/// # Errors
///
/// Returns [`ReshapeError::InvalidNumber`] when a listed field holds a string
/// that does not parse as an integer.
pub fn coerce_numeric_fields(value: &mut Value, fields: &[&str]) -> Result<(), ReshapeError> {
    if fields.is_empty() {
        return Ok(());
    }
    match value {
        Value::Array(items) => coerce_items(items, fields),
        Value::Object(map) => {
            coerce_object(map, fields)?;
            for nested in map.values_mut() {
                if let Value::Array(items) = nested {
                    coerce_items(items, fields)?;
                }
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Decodes a reshaped payload into `T`.
///
/// # Errors
///
/// Returns [`ReshapeError::Decode`] when the payload does not match `T`.
pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ReshapeError> {
    serde_json::from_value(value).map_err(|err| ReshapeError::Decode {
        message: err.to_string(),
    })
}

/// Unwraps, normalises and decodes a payload in one step.
///
/// # Errors
///
/// Returns the first [`ReshapeError`] raised by any phase.
pub fn reshape<T: DeserializeOwned>(
    payload: Value,
    shape: ResultShape,
    numeric_fields: &[&str],
) -> Result<T, ReshapeError> {
    let mut value = apply_shape(payload, shape)?;
    coerce_numeric_fields(&mut value, numeric_fields)?;
    decode(value)
}
