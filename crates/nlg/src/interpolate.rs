use std::collections::HashMap;

use serde_json::Value;
use tracing::warn;

/// Fill `{name}` placeholders in `text` from `values`.
///
/// Strings are inserted raw, `null` renders as the empty string, and any
/// other JSON value is inserted in its compact JSON form. `{{` and `}}` are
/// literal brace escapes. A placeholder with no matching value is left
/// verbatim (and logged) rather than failing the render.
pub fn interpolate_text(text: &str, values: &HashMap<String, Value>) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            },
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            },
            '{' => {
                let mut name = String::new();
                while let Some(&next) = chars.peek() {
                    if next == '}' || !is_placeholder_char(next) {
                        break;
                    }
                    name.push(next);
                    chars.next();
                }
                if chars.peek() == Some(&'}') && !name.is_empty() {
                    chars.next();
                    match values.get(&name) {
                        Some(value) => out.push_str(&render_value(value)),
                        None => {
                            warn!(placeholder = %name, "no value for placeholder, leaving as-is");
                            out.push('{');
                            out.push_str(&name);
                            out.push('}');
                        },
                    }
                } else {
                    // Not a well-formed placeholder; emit what we consumed.
                    out.push('{');
                    out.push_str(&name);
                }
            },
            _ => out.push(c),
        }
    }

    out
}

fn is_placeholder_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn render_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
