use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;

use crate::handlers::offers;
use crate::middleware::rate_limit::rate_limit;
use crate::state::AppState;

/// Routes mounted at `/offers`. Rate limited.
///
/// ```text
/// POST   /                  -> submit_offer
/// GET    /{id}              -> get_offer
/// GET    /properties        -> available_properties
/// GET    /drafts            -> list_drafts
/// POST   /drafts            -> save_draft
/// GET    /drafts/latest     -> latest_draft
/// ```
pub fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(offers::submit_offer))
        .route("/{id}", get(offers::get_offer))
        .route("/properties", get(offers::available_properties))
        .route(
            "/drafts",
            get(offers::list_drafts).post(offers::save_draft),
        )
        .route("/drafts/latest", get(offers::latest_draft))
        .route_layer(from_fn_with_state(state.clone(), rate_limit))
}
