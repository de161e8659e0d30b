//! Relay from the model stream to the browser.
//!
//! [`spawn_relay`] runs the upstream call on its own task and forwards
//! [`OcrEvent`]s through a bounded channel in arrival order:
//!
//! 1. `Info` once, before the upstream call.
//! 2. `Thought` for every reasoning part, verbatim.
//! 3. `Progress` for every answer fragment (the fragment is buffered).
//! 4. Exactly one terminal `Complete` or `Error`.
//!
//! A failed send means the receiver is gone; the task then stops reading
//! upstream and exits without a terminal event.

use futures::StreamExt;
use listdesk_core::agents;
use listdesk_core::json_block;
use serde_json::{Map, Value};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::api::GeminiClient;
use crate::error::OcrError;
use crate::sse::{parse_parts, SseDecoder};

/// Text sent with every `progress` event.
pub const PROGRESS_MESSAGE: &str = "Extracting listing data...";

const CHANNEL_CAPACITY: usize = 64;

/// One uploaded page.
#[derive(Debug, Clone)]
pub struct ImageInput {
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl ImageInput {
    /// Accepts `image/*` and `application/pdf`.
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Result<Self, OcrError> {
        let mime_type = mime_type.into();
        if !accepts_mime(&mime_type) {
            return Err(OcrError::UnsupportedMime(mime_type));
        }
        Ok(Self { mime_type, data })
    }
}

pub fn accepts_mime(mime_type: &str) -> bool {
    let essence = mime_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence.starts_with("image/") || essence == "application/pdf"
}

#[derive(Debug, Clone, PartialEq)]
pub enum OcrEvent {
    Info { model_id: String },
    Thought(String),
    Progress,
    Complete(Value),
    Error(String),
}

impl OcrEvent {
    /// SSE event name.
    pub fn name(&self) -> &'static str {
        match self {
            OcrEvent::Info { .. } => "info",
            OcrEvent::Thought(_) => "thought",
            OcrEvent::Progress => "progress",
            OcrEvent::Complete(_) => "complete",
            OcrEvent::Error(_) => "error",
        }
    }

    /// SSE `data` field. Thoughts and progress are plain text, the rest JSON.
    pub fn data(&self) -> String {
        match self {
            OcrEvent::Info { model_id } => serde_json::json!({ "modelId": model_id }).to_string(),
            OcrEvent::Thought(text) => text.clone(),
            OcrEvent::Progress => PROGRESS_MESSAGE.to_string(),
            OcrEvent::Complete(listing) => listing.to_string(),
            OcrEvent::Error(message) => serde_json::json!({ "error": message }).to_string(),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, OcrEvent::Complete(_) | OcrEvent::Error(_))
    }
}

/// Start an extraction on a background task.
pub fn spawn_relay(
    client: GeminiClient,
    images: Vec<ImageInput>,
) -> (mpsc::Receiver<OcrEvent>, JoinHandle<()>) {
    let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
    let handle = tokio::spawn(async move { relay(&client, &images, tx).await });
    (rx, handle)
}

/// Drive one extraction to its terminal event.
pub async fn relay(client: &GeminiClient, images: &[ImageInput], tx: mpsc::Sender<OcrEvent>) {
    let model_id = client.model().to_string();
    let terminal = match extract(client, images, &tx).await {
        Ok(listing) => {
            tracing::info!(model_id = %model_id, images = images.len(), "Extraction complete");
            OcrEvent::Complete(listing)
        }
        Err(OcrError::Disconnected) => {
            tracing::debug!(model_id = %model_id, "Client went away during extraction");
            return;
        }
        Err(e) => {
            match &e {
                OcrError::Api { status, body } => {
                    tracing::error!(model_id = %model_id, status, body = %body, "Model API error");
                }
                other => tracing::error!(model_id = %model_id, error = %other, "Extraction failed"),
            }
            OcrEvent::Error(e.to_string())
        }
    };
    let _ = tx.send(terminal).await;
}

async fn extract(
    client: &GeminiClient,
    images: &[ImageInput],
    tx: &mpsc::Sender<OcrEvent>,
) -> Result<Value, OcrError> {
    send(
        tx,
        OcrEvent::Info {
            model_id: client.model().to_string(),
        },
    )
    .await?;

    let response = client.stream_extraction(images).await?;
    let mut body = response.bytes_stream();
    let mut decoder = SseDecoder::new();
    let mut buffer = String::new();

    while let Some(chunk) = body.next().await {
        for payload in decoder.push(&chunk?) {
            forward(&payload, &mut buffer, tx).await?;
        }
    }
    if let Some(payload) = decoder.finish() {
        forward(&payload, &mut buffer, tx).await?;
    }

    finish(&buffer)
}

async fn forward(
    payload: &str,
    buffer: &mut String,
    tx: &mpsc::Sender<OcrEvent>,
) -> Result<(), OcrError> {
    for part in parse_parts(payload)? {
        if part.thought {
            send(tx, OcrEvent::Thought(part.text)).await?;
        } else {
            buffer.push_str(&part.text);
            send(tx, OcrEvent::Progress).await?;
        }
    }
    Ok(())
}

async fn send(tx: &mpsc::Sender<OcrEvent>, event: OcrEvent) -> Result<(), OcrError> {
    tx.send(event).await.map_err(|_| OcrError::Disconnected)
}

/// Parse the accumulated answer text into a listing object.
///
/// The outermost `{ ... }` is parsed and its `listing_agent` replaced with
/// the canonical agent name and `listing_agent_id` when it matches.
pub fn finish(buffer: &str) -> Result<Value, OcrError> {
    let mut listing = json_block::extract_object(buffer).ok_or(OcrError::NoJson)?;
    apply_agent_match(&mut listing);
    Ok(Value::Object(listing))
}

/// Canonicalize `listing_agent` in place. Unmatched names are left as
/// extracted with a null `listing_agent_id`.
pub fn apply_agent_match(listing: &mut Map<String, Value>) {
    let raw = listing
        .get("listing_agent")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    match agents::match_agent(&raw) {
        Some(matched) => {
            if matched.is_ambiguous() {
                tracing::warn!(
                    input = %raw,
                    chosen = matched.agent.name,
                    "Extracted agent name matched several agents equally"
                );
            }
            listing.insert("listing_agent".into(), Value::from(matched.agent.name));
            listing.insert(
                "listing_agent_id".into(),
                Value::from(matched.agent.vaultre_id),
            );
        }
        None => {
            if !raw.trim().is_empty() {
                tracing::debug!(input = %raw, "Extracted agent name not in agent table");
            }
            listing.insert("listing_agent_id".into(), Value::Null);
        }
    }
}
