//! Repository for the `listings` table.

use listdesk_core::listing::ListingDraft;
use listdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::listing::Listing;

const COLUMNS: &str = "\
    id, listing_agent, listing_agent_id, unit_number, street_number, street_name, \
    suburb, postcode, price, bedrooms, bathrooms, garages, payload, created_at";

/// Insert-only access to saved listings.
pub struct ListingRepo;

impl ListingRepo {
    /// Persist a validated draft as a new row.
    ///
    /// Required text columns fall back to `""`; callers validate first.
    pub async fn create(pool: &PgPool, draft: &ListingDraft) -> Result<Listing, sqlx::Error> {
        let payload = serde_json::to_value(draft)
            .map_err(|e| sqlx::Error::Encode(Box::new(e)))?;
        let query = format!(
            "INSERT INTO listings \
                (listing_agent, listing_agent_id, unit_number, street_number, street_name, \
                 suburb, postcode, price, bedrooms, bathrooms, garages, payload) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Listing>(&query)
            .bind(draft.listing_agent.as_deref().unwrap_or_default().trim())
            .bind(draft.listing_agent_id)
            .bind(draft.address.unit_number.as_deref())
            .bind(draft.address.street_number.as_deref().unwrap_or_default().trim())
            .bind(draft.address.street_name.as_deref().unwrap_or_default().trim())
            .bind(draft.address.suburb.as_deref().unwrap_or_default().trim())
            .bind(draft.address.postcode.as_deref())
            .bind(draft.price.as_deref())
            .bind(draft.bedrooms)
            .bind(draft.bathrooms)
            .bind(draft.garages)
            .bind(payload)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Listing>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM listings WHERE id = $1");
        sqlx::query_as::<_, Listing>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Most recent listings first.
    pub async fn list_recent(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Listing>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM listings ORDER BY created_at DESC, id DESC LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Listing>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
