//! Upstream event classification
//!
//! Each NDJSON line from the upstream is a JSON record with a `type` tag.
//! Only `text-delta` records carry text for the client; every other shape is
//! [`StreamEvent::Other`] and produces no output.

use serde_json::Value;

/// Type tag of records carrying generated text
pub const TEXT_DELTA_TYPE: &str = "text-delta";

/// A single decoded upstream line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// Generated text fragment
    TextDelta(String),
    /// Any record not recognized as a text delta
    Other,
}

impl StreamEvent {
    /// Parse one complete line.
    ///
    /// Returns an error only when the line is not valid JSON. Valid JSON of an
    /// unexpected shape is `Other`.
    pub fn parse(line: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(line)?;
        Ok(Self::classify(&value))
    }

    /// Classify a parsed record
    pub fn classify(value: &Value) -> Self {
        let is_text_delta = value.get("type").and_then(Value::as_str) == Some(TEXT_DELTA_TYPE);

        match value.get("delta").and_then(Value::as_str) {
            Some(text) if is_text_delta => StreamEvent::TextDelta(text.to_string()),
            _ => StreamEvent::Other,
        }
    }
}
