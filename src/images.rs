//! Tolerant normalization of the backend's image-reference field.
//!
//! The repair endpoints have historically emitted this field as a JSON
//! array, a JSON-encoded string, a bare path, or a truncated array missing
//! its closing bracket. The parser's job is maximum tolerance, not
//! validation: any input yields a (possibly empty) list of path strings and
//! never an error.

use serde_json::Value;

/// Normalize a raw image-reference payload into an ordered list of paths.
///
/// Total function: malformed input degrades to `[]` or a single literal
/// path, with a warning logged for shapes that carry no usable data.
pub fn parse_image_refs(raw: &Value) -> Vec<String> {
    match raw {
        Value::Array(items) => collect_strings(items),
        Value::String(s) => parse_image_str(s),
        Value::Null => Vec::new(),
        other => {
            tracing::warn!("unexpected image field type, ignoring: {other}");
            Vec::new()
        }
    }
}

fn parse_image_str(s: &str) -> Vec<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    // JSON-array-looking but possibly truncated: try as-is, then with the
    // missing bracket appended.
    if trimmed.starts_with('[') {
        if let Ok(Value::Array(items)) = serde_json::from_str::<Value>(trimmed) {
            return collect_strings(&items);
        }
        let repaired = format!("{trimmed}]");
        if let Ok(Value::Array(items)) = serde_json::from_str::<Value>(&repaired) {
            tracing::warn!("repaired truncated image array: {trimmed}");
            return collect_strings(&items);
        }
    }

    // Strict parse: an embedded array or a JSON-quoted single path.
    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Array(items)) => collect_strings(&items),
        Ok(Value::String(path)) => vec![path],
        // Any other JSON scalar, or no JSON at all: the original string is
        // the path.
        Ok(_) | Err(_) => vec![trimmed.to_owned()],
    }
}

fn collect_strings(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s.clone()),
            // Scalars keep their textual form; only entries with no usable
            // path representation are dropped.
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            other => {
                tracing::warn!("skipping unusable image entry: {other}");
                None
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
