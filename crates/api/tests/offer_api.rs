//! Offer submission and form history.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Test: field-specific validation messages
// ---------------------------------------------------------------------------

#[tokio::test]
async fn purchaser_without_contact_is_rejected() {
    let app = common::build_test_app(None);
    let mut offer = common::offer_json();
    offer["purchasers"] = json!([{ "full_name": "Alex Buyer" }]);

    let response = post_json(app, "/api/offers", offer).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "purchasers[0] needs an email or phone");
}

#[tokio::test]
async fn finance_condition_needs_days() {
    let app = common::build_test_app(None);
    let mut offer = common::offer_json();
    offer["finance_required"] = json!(true);

    let response = post_json(app, "/api/offers", offer).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "finance_days is required when the condition applies");
}

// ---------------------------------------------------------------------------
// Test: submission persists
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn offer_is_persisted(pool: PgPool) {
    let app = common::build_test_app(Some(pool));

    let response = post_json(app.clone(), "/api/offers", common::offer_json()).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["offer_price"], 455000);
    assert_eq!(json["data"]["property_id"], 501);
    assert_eq!(json["data"]["payload"]["solicitor"]["firm"], "Smith & Co");

    let id = json["data"]["id"].as_i64().unwrap();
    let response = get(app.clone(), &format!("/api/offers/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["offer_price"], 455000);

    let response = get(app, &format!("/api/offers/{}", id + 1000)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: drafts are newest first and capped
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn drafts_are_capped_newest_first(pool: PgPool) {
    let app = common::build_test_app(Some(pool));
    let client_key = "5f0c7a52-8f5e-4a8e-9a55-1f3c0c1d2e3f";

    for step in 0..12 {
        let response = post_json(
            app.clone(),
            "/api/offers/drafts",
            json!({ "client_key": client_key, "snapshot": { "step": step } }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = get(app.clone(), &format!("/api/offers/drafts?client_key={client_key}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let drafts = json["data"].as_array().unwrap();
    assert_eq!(drafts.len(), 10);
    assert_eq!(drafts[0]["snapshot"]["step"], 11);
    assert_eq!(drafts[9]["snapshot"]["step"], 2);

    let response = get(app, &format!("/api/offers/drafts/latest?client_key={client_key}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["snapshot"]["step"], 11);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn latest_draft_is_null_for_new_client(pool: PgPool) {
    let app = common::build_test_app(Some(pool));

    let response = get(
        app,
        "/api/offers/drafts/latest?client_key=0b8f2d7e-4c3a-4f5e-8a1b-9c2d3e4f5a6b",
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await["data"].is_null());
}

#[tokio::test]
async fn non_object_snapshot_is_rejected() {
    let app = common::build_test_app(None);
    let response = post_json(
        app,
        "/api/offers/drafts",
        json!({ "client_key": "5f0c7a52-8f5e-4a8e-9a55-1f3c0c1d2e3f", "snapshot": [1, 2] }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}
