//! Rendering of an entity's auxiliary key/value details into the plain-text
//! block shown under "more details" in the shell.
use serde_json::{Map, Value};

/// Ordered auxiliary mapping; emission follows insertion order
pub type ExtraData = Map<String, Value>;

/// Values that carry nothing worth showing
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// `content_rating` -> `Content Rating`
pub fn title_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut in_word = false;

    for ch in key.chars() {
        let ch = if ch == '_' { ' ' } else { ch };
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }

    out
}

fn inline(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Object(map) => map
            .iter()
            .map(|(key, value)| format!("{}: {}", key, inline(value)))
            .collect::<Vec<_>>()
            .join(", "),
        Value::Array(items) => items.iter().map(inline).collect::<Vec<_>>().join(", "),
        other => other.to_string(),
    }
}

/// Renders the mapping as `Key: value` lines, with nested mappings and
/// sequences expanded into indented lines under a `Key:` header.
pub fn render(data: &ExtraData) -> String {
    let mut lines = Vec::new();

    for (key, value) in data {
        if is_empty_value(value) {
            continue;
        }

        let label = title_case(key);
        match value {
            Value::Object(map) => {
                lines.push(format!("{}:", label));
                for (sub_key, sub_value) in map {
                    lines.push(format!("  {}: {}", sub_key, inline(sub_value)));
                }
            }
            Value::Array(items) => {
                lines.push(format!("{}:", label));
                for item in items {
                    lines.push(format!("  - {}", inline(item)));
                }
            }
            other => lines.push(format!("{}: {}", label, inline(other))),
        }
    }

    lines.join("\n")
}
