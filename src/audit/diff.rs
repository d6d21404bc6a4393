//! Field diffs for audit entries
//!
//! Only top-level fields are compared; nested values are summarized.

use serde_json::Value;

const MAX_STRING_CHARS: usize = 40;

/// Describe the top-level field changes between two JSON values
///
/// Returns `None` when nothing changed.
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    let changes = match (before, after) {
        (Value::Object(before_obj), Value::Object(after_obj)) => {
            let mut changes: Vec<String> = before_obj
                .iter()
                .filter_map(|(key, old)| match after_obj.get(key) {
                    Some(new) if new == old => None,
                    Some(new) => Some(format!("{}: {} -> {}", key, summarize(old), summarize(new))),
                    None => Some(format!("{}: {} -> (removed)", key, summarize(old))),
                })
                .collect();
            changes.extend(
                after_obj
                    .iter()
                    .filter(|(key, _)| !before_obj.contains_key(*key))
                    .map(|(key, new)| format!("{}: (added) -> {}", key, summarize(new))),
            );
            changes
        }
        _ if before != after => vec![format!("{} -> {}", summarize(before), summarize(after))],
        _ => Vec::new(),
    };

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

/// Short rendering of a JSON value; long strings are cut on a char boundary
fn summarize(value: &Value) -> String {
    match value {
        Value::String(s) if s.chars().count() > MAX_STRING_CHARS => {
            let cut: String = s.chars().take(MAX_STRING_CHARS - 3).collect();
            format!("\"{}...\"", cut)
        }
        Value::String(s) => format!("\"{}\"", s),
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
        other => other.to_string(),
    }
}
