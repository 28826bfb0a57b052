//! Log parsing utilities
//!
//! Terraform emits structured JSON log lines in remote runs; these helpers
//! reduce them to their human-readable `@message`.

/// Extract @message from JSON log line or return line as-is
///
/// # Returns
/// * For JSON lines with @message: the message content
/// * For JSON lines without @message: empty string (to skip)
/// * For non-JSON lines: the original line
pub fn extract_log_message(line: &str) -> String {
    if line.starts_with('{') {
        if let Ok(json) = serde_json::from_str::<serde_json::Value>(line) {
            if let Some(message) = json.get("@message").and_then(|m| m.as_str()) {
                return message.to_string();
            }
            // JSON without @message - skip
            return String::new();
        }
    }
    line.to_string()
}

/// Rewrite a whole log with [`extract_log_message`], dropping skipped lines
pub fn human_readable_log(content: &str) -> String {
    content
        .lines()
        .map(extract_log_message)
        .filter(|m| !m.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
