use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn_with_state;
use axum::routing::post;
use axum::Router;

use crate::handlers::ocr;
use crate::middleware::rate_limit::rate_limit;
use crate::state::AppState;

/// Upload ceiling for one extraction request (all pages together).
const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Routes mounted at `/ocr`. Rate limited, streaming, no request timeout.
///
/// ```text
/// POST   /                  -> extract_listing (text/event-stream)
/// ```
pub fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(ocr::extract_listing))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .route_layer(from_fn_with_state(state.clone(), rate_limit))
}
