//! Offer submissions and offer-form history rows.

use listdesk_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A row from the `offers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Offer {
    pub id: DbId,
    pub property_id: Option<i64>,
    pub property_address: String,
    pub offer_price: i64,
    pub deposit: Option<i64>,
    pub payload: serde_json::Value,
    pub created_at: Timestamp,
}

/// A row from the `offer_drafts` table: one saved snapshot of the form.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OfferDraft {
    pub id: DbId,
    pub client_key: Uuid,
    pub snapshot: serde_json::Value,
    pub created_at: Timestamp,
}
