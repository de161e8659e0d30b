pub mod chat;
pub mod health;
pub mod listings;
pub mod ocr;
pub mod offers;
pub mod vaultre;

use std::time::Duration;

use axum::http::StatusCode;
use axum::Router;
use tower_http::timeout::TimeoutLayer;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /chat/session                                    create chat session (POST)
///
/// /listings                                        list, save
/// /listings/{id}                                   get
///
/// /offers                                          submit (POST, rate limited)
/// /offers/properties                               on-market properties (rate limited)
/// /offers/drafts                                   history list, save (rate limited)
///
/// /vaultre/appraisals                              create or update (POST, rate limited)
/// /vaultre/properties/search                       address lookup (rate limited)
/// /vaultre/properties/{id}                         property detail (rate limited)
/// /vaultre/expense-types                           lookup (rate limited)
///
/// /ocr                                             extraction stream (POST, rate limited)
/// ```
///
/// Every route except `/ocr` runs under the request timeout; the
/// extraction stream stays open for as long as the model keeps talking.
pub fn api_routes(state: &AppState) -> Router<AppState> {
    let timeout = TimeoutLayer::with_status_code(
        StatusCode::REQUEST_TIMEOUT,
        Duration::from_secs(state.config.request_timeout_secs),
    );

    Router::new()
        .nest("/chat", chat::router())
        .nest("/listings", listings::router())
        .nest("/offers", offers::router(state))
        .nest("/vaultre", vaultre::router(state))
        // Layers only wrap routes added above this point.
        .layer(timeout)
        .nest("/ocr", ocr::router(state))
}
