//! Builders for Gemini response-schema hints (OpenAPI subset, upper-case type names).

use serde_json::{json, Map, Value};

pub fn string() -> Value {
    json!({ "type": "STRING" })
}

pub fn number() -> Value {
    json!({ "type": "NUMBER" })
}

pub fn integer() -> Value {
    json!({ "type": "INTEGER" })
}

pub fn array(items: Value) -> Value {
    json!({ "type": "ARRAY", "items": items })
}

pub fn string_array() -> Value {
    array(string())
}

/// An object whose listed properties are all required.
pub fn object(properties: &[(&str, Value)]) -> Value {
    let required: Vec<&str> = properties.iter().map(|(name, _)| *name).collect();
    let properties: Map<String, Value> = properties
        .iter()
        .map(|(name, schema)| (name.to_string(), schema.clone()))
        .collect();
    json!({
        "type": "OBJECT",
        "properties": properties,
        "required": required,
    })
}
