//! Locate and parse the JSON object embedded in free-form model output.
//!
//! Vision models wrap their answer in prose or markdown fences. The object
//! is taken to span from the first `{` to the last `}` in the buffer. Stray
//! braces inside surrounding narrative will defeat this, which is why the
//! extraction request also asks for a JSON response MIME type.

use serde_json::Value;

/// Return the substring from the first `{` to the last `}` inclusive.
///
/// ```
/// use listdesk_core::json_block::outermost_braces;
///
/// assert_eq!(outermost_braces(r#"prefix{"a":1}suffix"#), Some(r#"{"a":1}"#));
/// assert_eq!(outermost_braces("no json here"), None);
/// ```
pub fn outermost_braces(buffer: &str) -> Option<&str> {
    let start = buffer.find('{')?;
    let end = buffer.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&buffer[start..=end])
}

/// Parse the outermost brace pair as a JSON object.
///
/// Returns `None` when there is no brace pair or the span is not valid JSON.
pub fn extract_object(buffer: &str) -> Option<serde_json::Map<String, Value>> {
    let span = outermost_braces(buffer)?;
    match serde_json::from_str::<Value>(span).ok()? {
        Value::Object(map) => Some(map),
        _ => None,
    }
}
