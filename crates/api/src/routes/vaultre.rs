use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;

use crate::handlers::vaultre;
use crate::middleware::rate_limit::rate_limit;
use crate::state::AppState;

/// Routes mounted at `/vaultre`. Rate limited.
///
/// ```text
/// POST   /appraisals            -> upsert_appraisal
/// GET    /properties/search     -> search_property
/// GET    /properties/{id}       -> get_property
/// GET    /expense-types         -> expense_types
/// ```
pub fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/appraisals", post(vaultre::upsert_appraisal))
        .route("/properties/search", get(vaultre::search_property))
        .route("/properties/{id}", get(vaultre::get_property))
        .route("/expense-types", get(vaultre::expense_types))
        .route_layer(from_fn_with_state(state.clone(), rate_limit))
}
