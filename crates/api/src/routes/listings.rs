use axum::routing::get;
use axum::Router;

use crate::handlers::listings;
use crate::state::AppState;

/// Routes mounted at `/listings`.
///
/// ```text
/// GET    /                  -> list_listings
/// POST   /                  -> create_listing
/// GET    /{id}              -> get_listing
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(listings::list_listings).post(listings::create_listing),
        )
        .route("/{id}", get(listings::get_listing))
}
