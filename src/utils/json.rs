use serde_json::Value;

pub const PREVIEW_CHARS: usize = 100;

/// Pretty JSON for objects and arrays, plain text for scalars.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Object(_) | Value::Array(_) => {
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        }
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub fn value_preview(value: &Value) -> String {
    let rendered = render_value(value);
    if rendered.chars().count() > PREVIEW_CHARS {
        let cut: String = rendered.chars().take(PREVIEW_CHARS).collect();
        format!("{}...", cut)
    } else {
        rendered
    }
}
