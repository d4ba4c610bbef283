//! Shared JSON Schema utilities for model providers.

use serde_json::Value;

/// Keywords that response-format endpoints reject at the schema root or below.
const UNSUPPORTED_PROPS: &[&str] = &["$schema", "title"];

/// Normalizes a `schemars`-generated schema for use as a response format.
///
/// This function:
/// - Removes `$schema` and `title` annotations at every level.
/// - Sets `additionalProperties: false` on object schemas that declare `properties`.
/// - Leaves schemas without `properties` (free-form values) open.
pub fn normalize_output_schema(mut schema: Value) -> Value {
    if let Value::Array(ref mut arr) = schema {
        for item in arr.iter_mut() {
            *item = normalize_output_schema(item.take());
        }
        return schema;
    }

    if let Value::Object(ref mut obj) = schema {
        for prop in UNSUPPORTED_PROPS {
            if obj.remove(*prop).is_some() {
                tracing::trace!(property = *prop, "Removed schema annotation");
            }
        }

        if obj.contains_key("properties") {
            obj.insert("additionalProperties".to_string(), Value::Bool(false));
        }

        if let Some(Value::Object(props)) = obj.get_mut("properties") {
            for (_key, value) in props.iter_mut() {
                *value = normalize_output_schema(value.take());
            }
        }

        if let Some(items) = obj.get_mut("items") {
            *items = normalize_output_schema(items.take());
        }

        for key in ["allOf", "anyOf", "oneOf"] {
            if let Some(Value::Array(arr)) = obj.get_mut(key) {
                for item in arr.iter_mut() {
                    *item = normalize_output_schema(item.take());
                }
            }
        }

        for key in ["$defs", "definitions"] {
            if let Some(Value::Object(defs)) = obj.get_mut(key) {
                for (_key, value) in defs.iter_mut() {
                    *value = normalize_output_schema(value.take());
                }
            }
        }
    }

    schema
}
