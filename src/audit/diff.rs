//! Field-level change summaries for audit entries

use serde_json::Value;

const MAX_STRING_CHARS: usize = 40;

/// Summarize which top-level fields changed between two stored rows
///
/// Returns `None` when nothing changed. Changed and removed fields come
/// first in key order, then fields only present in `after`.
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    let changes = match (before, after) {
        (Value::Object(before_obj), Value::Object(after_obj)) => {
            let mut changes = Vec::new();
            for (key, before_val) in before_obj {
                match after_obj.get(key) {
                    Some(after_val) if after_val == before_val => {}
                    Some(after_val) => changes.push(format!(
                        "{}: {} -> {}",
                        key,
                        format_value(before_val),
                        format_value(after_val)
                    )),
                    None => changes.push(format!("{}: {} -> (removed)", key, format_value(before_val))),
                }
            }
            for (key, after_val) in after_obj {
                if !before_obj.contains_key(key) {
                    changes.push(format!("{}: (added) -> {}", key, format_value(after_val)));
                }
            }
            changes
        }
        _ if before != after => vec![format!("{} -> {}", format_value(before), format_value(after))],
        _ => Vec::new(),
    };

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) if s.chars().count() > MAX_STRING_CHARS => {
            let head: String = s.chars().take(MAX_STRING_CHARS - 3).collect();
            format!("\"{}...\"", head)
        }
        Value::String(s) => format!("\"{}\"", s),
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => {
            // installments render as "2/3"
            match (obj.get("current"), obj.get("total")) {
                (Some(current), Some(total)) if obj.len() == 2 => format!("{}/{}", current, total),
                _ => format!("{{{} fields}}", obj.len()),
            }
        }
    }
}
