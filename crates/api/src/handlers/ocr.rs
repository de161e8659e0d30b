//! Streaming document extraction.

use std::convert::Infallible;

use axum::extract::{Multipart, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::Stream;
use listdesk_ocr::{spawn_relay, ImageInput, OcrEvent};
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::StreamExt as _;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Multipart field carrying document pages.
const IMAGES_FIELD: &str = "images";

/// POST /api/ocr
///
/// Multipart upload of one or more `images` parts (`image/*` or PDF).
/// Responds with `text/event-stream`: `info`, then any number of `thought`
/// and `progress` events, then exactly one `complete` or `error`.
pub async fn extract_listing(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Sse<impl Stream<Item = Result<Event, Infallible>>>> {
    let mut images = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some(IMAGES_FIELD) {
            continue;
        }
        let mime_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {e}")))?;
        images.push(ImageInput::new(mime_type, data.to_vec())?);
    }

    if images.is_empty() {
        return Err(AppError::BadRequest("At least one image is required".into()));
    }

    let client = state.gemini()?.clone();
    tracing::info!(model_id = %client.model(), images = images.len(), "Starting extraction");

    let (rx, _handle) = spawn_relay(client, images);
    let stream = ReceiverStream::new(rx).map(|event| Ok(to_sse(&event)));

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}

// SSE fields cannot carry carriage returns; newlines are split into data lines.
fn to_sse(event: &OcrEvent) -> Event {
    let data = event.data().replace('\r', "");
    Event::default().event(event.name()).data(data)
}
