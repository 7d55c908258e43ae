//! Strict-mode schema normalization.
//!
//! OpenAI's strict structured-output mode requires every object in the
//! schema to be closed (`additionalProperties: false`). This module converts
//! an arbitrary nested schema into that form.

use serde_json::Value;

/// Normalize a schema for strict structured-output mode.
///
/// Returns a copy of `schema` in which every mapping whose `type` is
/// `"object"` carries `additionalProperties: false`, at any nesting depth.
/// The walk covers `properties` values, `items`, the branches of
/// `anyOf`/`allOf`/`oneOf`, and every other nested mapping or sequence.
/// A pre-existing `additionalProperties` value is overwritten, which makes
/// the transform idempotent. Everything else passes through untouched.
#[must_use]
pub fn to_strict_schema(schema: &Value) -> Value {
    let mut normalized = schema.clone();
    close_objects(&mut normalized);
    normalized
}

fn close_objects(value: &mut Value) {
    match value {
        Value::Object(map) => {
            if map.get("type").and_then(Value::as_str) == Some("object") {
                map.insert("additionalProperties".to_string(), Value::Bool(false));
            }
            for (_, nested) in map.iter_mut() {
                close_objects(nested);
            }
        }
        Value::Array(items) => {
            for item in items.iter_mut() {
                close_objects(item);
            }
        }
        _ => {}
    }
}
