//! VaultRE-backed endpoints against a fake VaultRE server.

mod common;

use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use common::{body_json, get as get_req, post_json};
use listdesk_vaultre::VaultReConfig;
use serde_json::json;

async fn app_with_vaultre() -> Router {
    let fake = Router::new()
        .route(
            "/suburbs",
            get(|| async {
                Json(json!({
                    "items": [{ "id": 41, "name": "Ulverstone", "postcode": "7315" }]
                }))
            }),
        )
        .route(
            "/properties/residential/sale",
            get(|| async {
                Json(json!({
                    "items": [{ "id": 501, "address": { "streetNumber": "2", "street": "Moonbeam Place" } }],
                    "totalPages": 1
                }))
            })
            .post(|| async { (StatusCode::CREATED, Json(json!({ "id": 777 }))) }),
        )
        .route(
            "/properties/residential/sale/available",
            get(|| async {
                Json(json!({
                    "items": [{
                        "id": 501,
                        "address": { "unitNumber": "3", "streetNumber": "12", "street": "Reibey Street",
                                     "suburb": { "id": 41, "name": "Ulverstone" } },
                        "displayPrice": "$520,000"
                    }]
                }))
            }),
        )
        .route(
            "/properties/{id}",
            get(|| async { (StatusCode::NOT_FOUND, "no such property") }),
        )
        .route(
            "/types/expense",
            get(|| async { Json(json!({ "items": [{ "id": 1, "name": "Council rates" }] })) }),
        );
    let base_url = common::spawn_upstream(fake).await;

    let mut config = common::test_config();
    config.vaultre = Some(VaultReConfig {
        api_key: "key".into(),
        bearer_token: "token".into(),
        base_url,
    });
    common::build_app_with(config, None)
}

// ---------------------------------------------------------------------------
// Test: lookups pass through in the data envelope
// ---------------------------------------------------------------------------

#[tokio::test]
async fn expense_types_are_proxied() {
    let app = app_with_vaultre().await;
    let response = get_req(app, "/api/vaultre/expense-types").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["items"][0]["name"], "Council rates");
}

// ---------------------------------------------------------------------------
// Test: upstream 404 becomes 502
// ---------------------------------------------------------------------------

#[tokio::test]
async fn upstream_failure_is_bad_gateway() {
    let app = app_with_vaultre().await;
    let response = get_req(app, "/api/vaultre/properties/99").await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UPSTREAM_ERROR");
}

// ---------------------------------------------------------------------------
// Test: address search finds the existing property
// ---------------------------------------------------------------------------

#[tokio::test]
async fn property_search_matches_address() {
    let app = app_with_vaultre().await;
    let response = get_req(
        app,
        "/api/vaultre/properties/search?street_number=2&street_name=MOONBEAM%20PLACE&suburb=ulverstone",
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["suburb"]["id"], 41);
    assert_eq!(json["data"]["property"]["id"], 501);
}

#[tokio::test]
async fn property_search_requires_address_fields() {
    let app = app_with_vaultre().await;
    let response = get_req(app, "/api/vaultre/properties/search?suburb=Ulverstone").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "street_number is required");
}

// ---------------------------------------------------------------------------
// Test: appraisal create vs update
// ---------------------------------------------------------------------------

#[tokio::test]
async fn appraisal_updates_matching_property() {
    let app = app_with_vaultre().await;
    let response = post_json(app, "/api/vaultre/appraisals", common::listing_json()).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["action"], "updated");
    assert_eq!(json["data"]["propertyId"], 501);
    assert_eq!(json["data"]["suburbId"], 41);
}

#[tokio::test]
async fn appraisal_created_for_new_address() {
    let app = app_with_vaultre().await;
    let mut listing = common::listing_json();
    listing["street_number"] = json!("14");

    let response = post_json(app, "/api/vaultre/appraisals", listing).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["action"], "created");
    assert_eq!(json["data"]["propertyId"], 777);
}

#[tokio::test]
async fn appraisal_rejects_invalid_listing() {
    let app = app_with_vaultre().await;
    let mut listing = common::listing_json();
    listing["street_name"] = json!("  ");

    let response = post_json(app, "/api/vaultre/appraisals", listing).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "street_name is required");
}

// ---------------------------------------------------------------------------
// Test: offer form property picker
// ---------------------------------------------------------------------------

#[tokio::test]
async fn offer_properties_use_display_address() {
    let app = app_with_vaultre().await;
    let response = get_req(app, "/api/offers/properties").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"][0]["id"], 501);
    assert_eq!(json["data"][0]["address"], "3/12 Reibey Street, Ulverstone");
    assert_eq!(json["data"][0]["display_price"], "$520,000");
}
