//! JSON output formatting.

/// Format a value as compact JSON, one document per line.
pub fn format_json<T: serde::Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_default()
}
