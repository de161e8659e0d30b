//! Handlers proxying and reconciling against VaultRE.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use listdesk_core::address::AddressComponents;
use listdesk_core::listing::{require, validate_listing, ListingDraft};
use listdesk_core::types::CrmId;
use listdesk_vaultre::models::{Property, Suburb};
use listdesk_vaultre::reconcile::{lookup_address, reconcile_appraisal};
use serde::Serialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/vaultre/appraisals
///
/// Create an appraisal for the listing, or update the CRM property that
/// already has its address.
pub async fn upsert_appraisal(
    State(state): State<AppState>,
    Json(draft): Json<ListingDraft>,
) -> AppResult<impl IntoResponse> {
    validate_listing(&draft)?;
    let outcome = reconcile_appraisal(state.vaultre()?, &draft).await?;
    Ok(Json(DataResponse { data: outcome }))
}

#[derive(Debug, Serialize)]
pub struct PropertySearchResult {
    pub suburb: Suburb,
    /// The exact address match, if the suburb has one.
    pub property: Option<Property>,
}

/// GET /api/vaultre/properties/search?street_number=&street_name=&suburb=[&unit_number=&postcode=]
///
/// Resolve the suburb and look for an exact address match without writing.
pub async fn search_property(
    State(state): State<AppState>,
    Query(address): Query<AddressComponents>,
) -> AppResult<impl IntoResponse> {
    require("street_number", address.street_number.as_deref())?;
    require("street_name", address.street_name.as_deref())?;
    require("suburb", address.suburb.as_deref())?;

    let (suburb, property) = lookup_address(state.vaultre()?, &address).await?;
    tracing::debug!(
        suburb_id = suburb.id,
        property_id = ?property.as_ref().map(|p| p.id),
        "Property search"
    );
    Ok(Json(DataResponse {
        data: PropertySearchResult { suburb, property },
    }))
}

/// GET /api/vaultre/properties/{id}
pub async fn get_property(
    State(state): State<AppState>,
    Path(id): Path<CrmId>,
) -> AppResult<impl IntoResponse> {
    let property = state.vaultre()?.get_property(id).await?;
    Ok(Json(DataResponse { data: property }))
}

/// GET /api/vaultre/expense-types
pub async fn expense_types(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let types = state.vaultre()?.expense_types().await?;
    Ok(Json(DataResponse { data: types }))
}
