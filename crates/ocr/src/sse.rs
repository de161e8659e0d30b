//! Decoding of the model's `text/event-stream` response.
//!
//! [`SseDecoder`] accepts arbitrary byte chunks (which may split lines and
//! UTF-8 sequences) and yields the `data` payload of each complete event.
//! [`parse_parts`] then pulls the content parts out of one payload.

use serde::Deserialize;

use crate::error::OcrError;

/// Incremental server-sent-events decoder.
#[derive(Debug, Default)]
pub struct SseDecoder {
    pending: Vec<u8>,
    data: Vec<String>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk; returns the payloads of every event it completed.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.pending.extend_from_slice(chunk);
        let mut events = Vec::new();

        while let Some(pos) = self.pending.iter().position(|b| *b == b'\n') {
            let raw: Vec<u8> = self.pending.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&raw);
            let line = line.trim_end_matches(['\n', '\r']);

            if line.is_empty() {
                if let Some(payload) = self.take_event() {
                    events.push(payload);
                }
            } else if let Some(value) = line.strip_prefix("data:") {
                self.data
                    .push(value.strip_prefix(' ').unwrap_or(value).to_string());
            }
            // `event:`, `id:`, `retry:` and `:` comments are not used.
        }
        events
    }

    /// Flush a trailing event not followed by a blank line.
    pub fn finish(&mut self) -> Option<String> {
        if !self.pending.is_empty() {
            let rest = std::mem::take(&mut self.pending);
            let line = String::from_utf8_lossy(&rest);
            if let Some(value) = line.trim_end_matches('\r').strip_prefix("data:") {
                self.data
                    .push(value.strip_prefix(' ').unwrap_or(value).to_string());
            }
        }
        self.take_event()
    }

    fn take_event(&mut self) -> Option<String> {
        if self.data.is_empty() {
            return None;
        }
        Some(std::mem::take(&mut self.data).join("\n"))
    }
}

/// One text part of a streamed response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamPart {
    pub text: String,
    /// True for reasoning summaries, false for answer content.
    pub thought: bool,
}

#[derive(Debug, Deserialize)]
struct StreamChunk {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    error: Option<StreamErrorBody>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    thought: bool,
}

#[derive(Debug, Deserialize)]
struct StreamErrorBody {
    #[serde(default)]
    message: String,
}

/// Extract the text parts from one event payload.
///
/// Payloads that are not JSON are skipped with a debug log; an embedded
/// error object becomes [`OcrError::Stream`].
pub fn parse_parts(payload: &str) -> Result<Vec<StreamPart>, OcrError> {
    let chunk: StreamChunk = match serde_json::from_str(payload) {
        Ok(chunk) => chunk,
        Err(e) => {
            tracing::debug!(error = %e, "Skipping non-JSON stream payload");
            return Ok(Vec::new());
        }
    };
    if let Some(err) = chunk.error {
        return Err(OcrError::Stream(err.message));
    }

    Ok(chunk
        .candidates
        .into_iter()
        .filter_map(|c| c.content)
        .flat_map(|c| c.parts)
        .filter_map(|p| {
            p.text
                .filter(|t| !t.is_empty())
                .map(|text| StreamPart { text, thought: p.thought })
        })
        .collect())
}
