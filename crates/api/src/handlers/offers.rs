//! Handlers for purchase offer intake.
//!
//! Offers are validated, persisted and announced on the workflow webhook.
//! Form history ("drafts") is stored per client key, newest first, and
//! capped at [`OFFER_HISTORY_CAP`] entries.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use listdesk_core::offer::{validate_offer, OfferSubmission, OFFER_HISTORY_CAP};
use listdesk_core::error::CoreError;
use listdesk_core::types::{CrmId, DbId};
use listdesk_db::repositories::{OfferDraftRepo, OfferRepo};
use listdesk_events::{event, WorkflowEvent};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::handlers::listings::notify;
use crate::response::DataResponse;
use crate::state::AppState;

/// How many on-market properties the offer form can pick from.
const AVAILABLE_PAGE_SIZE: u32 = 200;

/// A property the offer form can be filled against.
#[derive(Debug, Serialize)]
pub struct OfferProperty {
    pub id: CrmId,
    pub address: String,
    pub display_price: Option<String>,
    pub heading: Option<String>,
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

/// GET /api/offers/properties
///
/// On-market residential sale properties from VaultRE.
pub async fn available_properties(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let page = state
        .vaultre()?
        .available_sale_properties(AVAILABLE_PAGE_SIZE)
        .await?;

    let properties: Vec<OfferProperty> = page
        .items
        .into_iter()
        .map(|p| OfferProperty {
            id: p.id,
            address: p.display_address(),
            display_price: p.display_price,
            heading: p.heading,
        })
        .collect();

    tracing::debug!(count = properties.len(), "Loaded offer properties");
    Ok(Json(DataResponse { data: properties }))
}

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

/// POST /api/offers
pub async fn submit_offer(
    State(state): State<AppState>,
    Json(offer): Json<OfferSubmission>,
) -> AppResult<impl IntoResponse> {
    validate_offer(&offer)?;
    let pool = state.db()?;

    let saved = OfferRepo::create(pool, &offer).await?;
    tracing::info!(
        offer_id = saved.id,
        property_id = ?saved.property_id,
        offer_price = saved.offer_price,
        "Offer submitted"
    );

    let payload = serde_json::to_value(&offer).unwrap_or_default();
    notify(&state, WorkflowEvent::new(event::OFFER_SUBMITTED, saved.id, payload)).await;

    Ok((StatusCode::CREATED, Json(DataResponse { data: saved })))
}

/// GET /api/offers/{id}
pub async fn get_offer(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let offer = OfferRepo::find_by_id(state.db()?, id)
        .await?
        .ok_or(CoreError::NotFound { entity: "Offer", id })?;
    Ok(Json(DataResponse { data: offer }))
}

// ---------------------------------------------------------------------------
// Drafts
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct DraftListParams {
    pub client_key: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct SaveDraft {
    pub client_key: Uuid,
    pub snapshot: serde_json::Value,
}

/// GET /api/offers/drafts?client_key=
///
/// Saved form snapshots for one client, newest first.
pub async fn list_drafts(
    State(state): State<AppState>,
    Query(params): Query<DraftListParams>,
) -> AppResult<impl IntoResponse> {
    let drafts = OfferDraftRepo::list(state.db()?, params.client_key).await?;
    Ok(Json(DataResponse { data: drafts }))
}

/// GET /api/offers/drafts/latest?client_key=
///
/// The snapshot to resume the form from; `data` is null when none is saved.
pub async fn latest_draft(
    State(state): State<AppState>,
    Query(params): Query<DraftListParams>,
) -> AppResult<impl IntoResponse> {
    let draft = OfferDraftRepo::latest(state.db()?, params.client_key).await?;
    Ok(Json(DataResponse { data: draft }))
}

/// POST /api/offers/drafts
///
/// Store a snapshot; the oldest beyond the cap are evicted.
pub async fn save_draft(
    State(state): State<AppState>,
    Json(input): Json<SaveDraft>,
) -> AppResult<impl IntoResponse> {
    if !input.snapshot.is_object() {
        return Err(AppError::BadRequest("snapshot must be a JSON object".into()));
    }

    let draft = OfferDraftRepo::save(state.db()?, input.client_key, &input.snapshot).await?;
    tracing::debug!(
        draft_id = draft.id,
        client_key = %input.client_key,
        cap = OFFER_HISTORY_CAP,
        "Offer draft saved"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: draft })))
}
