#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use listdesk_api::config::ServerConfig;
use listdesk_api::router::build_app_router;
use listdesk_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults and no integrations.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    let mut config = ServerConfig::from_lookup(|_| None);
    config.host = "127.0.0.1".to_string();
    config.port = 0;
    config
}

/// Build the full application router with all middleware layers.
///
/// This goes through the same [`build_app_router`] as `main.rs` so
/// integration tests exercise the production middleware stack.
pub fn build_test_app(pool: Option<PgPool>) -> Router {
    build_app_with(test_config(), pool)
}

pub fn build_app_with(config: ServerConfig, pool: Option<PgPool>) -> Router {
    build_app_router(AppState::from_config(config, pool))
}

/// Bind an in-process fake upstream on an ephemeral port; returns its base URL.
pub async fn spawn_upstream(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn post_json(app: Router, uri: &str, json: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(json.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

/// A minimal valid listing payload.
pub fn listing_json() -> serde_json::Value {
    serde_json::json!({
        "listing_agent": "WENDY SQUIBB",
        "listing_agent_id": 30112,
        "street_number": "2",
        "street_name": "Moonbeam Place",
        "suburb": "Ulverstone",
        "postcode": "7315",
        "price": "Offers over $450,000",
        "bedrooms": 3,
    })
}

/// A minimal valid offer payload.
pub fn offer_json() -> serde_json::Value {
    serde_json::json!({
        "property_id": 501,
        "property_address": "2 Moonbeam Place, Ulverstone",
        "purchasers": [{ "full_name": "Alex Buyer", "email": "alex@example.com" }],
        "solicitor": { "firm": "Smith & Co" },
        "offer_price": 455000,
        "deposit": 10000,
    })
}
