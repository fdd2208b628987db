//! Conformance check for structured model replies.
//!
//! Only the keywords the prompt schemas use are enforced: `type`,
//! `properties`, `required` and `items`. Optional properties may be `null`.
//! Replies spelled in snake_case are renamed to the schema's property names
//! by [`normalize_keys`] before the check.

use serde_json::Value;

/// Check `value` against `schema`, returning the first violation with its JSON path.
pub fn check_conformance(value: &Value, schema: &Value) -> Result<(), String> {
    check_at("$", value, schema)
}

fn check_at(path: &str, value: &Value, schema: &Value) -> Result<(), String> {
    if let Some(expected) = schema.get("type").and_then(Value::as_str) {
        if !type_matches(expected, value) {
            return Err(format!(
                "{} should be {}, got {}",
                path,
                expected.to_ascii_lowercase(),
                type_name(value)
            ));
        }
    }

    match value {
        Value::Object(map) => {
            let required: Vec<&str> = schema
                .get("required")
                .and_then(Value::as_array)
                .map(|keys| keys.iter().filter_map(Value::as_str).collect())
                .unwrap_or_default();

            for key in &required {
                if map.get(*key).map_or(true, Value::is_null) {
                    return Err(format!("{} is missing required field '{}'", path, key));
                }
            }

            if let Some(properties) = schema.get("properties").and_then(Value::as_object) {
                for (key, property_schema) in properties {
                    match map.get(key) {
                        Some(Value::Null) | None => {}
                        Some(child) => {
                            check_at(&format!("{}.{}", path, key), child, property_schema)?
                        }
                    }
                }
            }
        }
        Value::Array(items) => {
            if let Some(item_schema) = schema.get("items") {
                for (index, item) in items.iter().enumerate() {
                    check_at(&format!("{}[{}]", path, index), item, item_schema)?;
                }
            }
        }
        _ => {}
    }

    Ok(())
}

/// Rename snake_case keys in `value` to the camelCase property names declared by `schema`.
///
/// A key already spelled the schema's way wins over its snake_case twin.
pub fn normalize_keys(value: &mut Value, schema: &Value) {
    match value {
        Value::Object(map) => {
            let Some(properties) = schema.get("properties").and_then(Value::as_object) else {
                return;
            };
            for (key, property_schema) in properties {
                if !map.contains_key(key) {
                    if let Some(child) = map.remove(&to_snake_case(key)) {
                        map.insert(key.clone(), child);
                    }
                }
                if let Some(child) = map.get_mut(key) {
                    normalize_keys(child, property_schema);
                }
            }
        }
        Value::Array(items) => {
            if let Some(item_schema) = schema.get("items") {
                for item in items {
                    normalize_keys(item, item_schema);
                }
            }
        }
        _ => {}
    }
}

fn to_snake_case(name: &str) -> String {
    let mut snake = String::with_capacity(name.len() + 4);
    for ch in name.chars() {
        if ch.is_ascii_uppercase() {
            snake.push('_');
            snake.push(ch.to_ascii_lowercase());
        } else {
            snake.push(ch);
        }
    }
    snake
}

fn type_matches(expected: &str, value: &Value) -> bool {
    match expected.to_ascii_lowercase().as_str() {
        "object" => value.is_object(),
        "array" => value.is_array(),
        "string" => value.is_string(),
        "number" => value.is_number(),
        "integer" => value.is_i64() || value.is_u64(),
        "boolean" => value.is_boolean(),
        "null" => value.is_null(),
        _ => true,
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
