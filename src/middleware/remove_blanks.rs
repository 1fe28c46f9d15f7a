use serde_json::Value;

/// Drop every object member whose value is the empty string, at any depth.
///
/// `{"superhero": {"name": "", "alias": "Nova"}}` becomes
/// `{"superhero": {"alias": "Nova"}}`. Whitespace-only strings and array
/// elements are kept; objects inside arrays are cleaned.
pub fn remove_blank_fields(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, v)| !is_blank(v))
                .map(|(k, v)| (k, remove_blank_fields(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(remove_blank_fields).collect()),
        other => other,
    }
}

fn is_blank(value: &Value) -> bool {
    matches!(value, Value::String(s) if s.is_empty())
}
