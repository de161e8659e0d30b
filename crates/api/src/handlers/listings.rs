//! Handlers for saved listings.
//!
//! A save inserts an immutable row and then notifies the workflow webhook.
//! The webhook is best-effort: its failure is logged and the save still
//! succeeds.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use listdesk_core::error::CoreError;
use listdesk_core::listing::{validate_listing, ListingDraft};
use listdesk_core::paging::{clamp_limit, clamp_offset, DEFAULT_LIMIT, MAX_LIMIT};
use listdesk_core::types::DbId;
use listdesk_db::repositories::ListingRepo;
use listdesk_events::{event, WorkflowEvent};

use crate::error::AppResult;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/listings
///
/// Validate and persist a reviewed listing, then emit `listing.saved`.
pub async fn create_listing(
    State(state): State<AppState>,
    Json(draft): Json<ListingDraft>,
) -> AppResult<impl IntoResponse> {
    validate_listing(&draft)?;
    let pool = state.db()?;

    let listing = ListingRepo::create(pool, &draft).await?;
    tracing::info!(
        listing_id = listing.id,
        suburb = %listing.suburb,
        agent_id = ?listing.listing_agent_id,
        "Listing saved"
    );

    let payload = serde_json::to_value(&draft).unwrap_or_default();
    notify(&state, WorkflowEvent::new(event::LISTING_SAVED, listing.id, payload)).await;

    Ok((StatusCode::CREATED, Json(DataResponse { data: listing })))
}

/// GET /api/listings
///
/// Most recently saved listings first.
pub async fn list_listings(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT);
    let offset = clamp_offset(params.offset);
    let listings = ListingRepo::list_recent(state.db()?, limit, offset).await?;
    Ok(Json(DataResponse { data: listings }))
}

/// GET /api/listings/{id}
pub async fn get_listing(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let listing = ListingRepo::find_by_id(state.db()?, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Listing",
            id,
        })?;
    Ok(Json(DataResponse { data: listing }))
}

/// Send a workflow event if a webhook is configured.
pub(crate) async fn notify(state: &AppState, event: WorkflowEvent) {
    match &state.webhook {
        Some(webhook) => {
            if webhook.deliver_best_effort(&event).await {
                tracing::debug!(
                    event_type = event.event_type,
                    record_id = event.record_id,
                    "Workflow webhook delivered"
                );
            }
        }
        None => tracing::warn!(
            event_type = event.event_type,
            record_id = event.record_id,
            "WORKFLOW_WEBHOOK_URL not configured, skipping webhook"
        ),
    }
}
