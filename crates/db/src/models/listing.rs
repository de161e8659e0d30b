//! Saved listing rows.

use listdesk_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `listings` table.
///
/// The indexed columns are copied out of `payload`, which holds the full
/// reviewed draft as submitted.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Listing {
    pub id: DbId,
    pub listing_agent: String,
    pub listing_agent_id: Option<i64>,
    pub unit_number: Option<String>,
    pub street_number: String,
    pub street_name: String,
    pub suburb: String,
    pub postcode: Option<String>,
    pub price: Option<String>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub garages: Option<i32>,
    pub payload: serde_json::Value,
    pub created_at: Timestamp,
}
