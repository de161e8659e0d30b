use axum::routing::post;
use axum::Router;

use crate::handlers::chat;
use crate::state::AppState;

/// Routes mounted at `/chat`.
///
/// ```text
/// POST   /session           -> create_session
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/session", post(chat::create_session))
}
