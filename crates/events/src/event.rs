use chrono::{DateTime, Utc};
use serde::Serialize;

/// Event type sent after a listing is saved.
pub const LISTING_SAVED: &str = "listing.saved";

/// Event type sent after an offer is submitted.
pub const OFFER_SUBMITTED: &str = "offer.submitted";

/// Envelope posted to the workflow webhook.
#[derive(Debug, Clone, Serialize)]
pub struct WorkflowEvent {
    pub event_type: &'static str,
    /// Database id of the saved row.
    pub record_id: i64,
    pub payload: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}

impl WorkflowEvent {
    pub fn new(event_type: &'static str, record_id: i64, payload: serde_json::Value) -> Self {
        Self {
            event_type,
            record_id,
            payload,
            timestamp: Utc::now(),
        }
    }
}
