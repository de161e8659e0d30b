//! Repositories for the `offers` and `offer_drafts` tables.

use listdesk_core::offer::{OfferSubmission, OFFER_HISTORY_CAP};
use listdesk_core::types::DbId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::offer::{Offer, OfferDraft};

const OFFER_COLUMNS: &str =
    "id, property_id, property_address, offer_price, deposit, payload, created_at";

const DRAFT_COLUMNS: &str = "id, client_key, snapshot, created_at";

pub struct OfferRepo;

impl OfferRepo {
    pub async fn create(pool: &PgPool, offer: &OfferSubmission) -> Result<Offer, sqlx::Error> {
        let payload = serde_json::to_value(offer)
            .map_err(|e| sqlx::Error::Encode(Box::new(e)))?;
        let query = format!(
            "INSERT INTO offers (property_id, property_address, offer_price, deposit, payload) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {OFFER_COLUMNS}"
        );
        sqlx::query_as::<_, Offer>(&query)
            .bind(offer.property_id)
            .bind(offer.property_address.trim())
            .bind(offer.offer_price)
            .bind(offer.deposit)
            .bind(payload)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Offer>, sqlx::Error> {
        let query = format!("SELECT {OFFER_COLUMNS} FROM offers WHERE id = $1");
        sqlx::query_as::<_, Offer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}

/// Capped, newest-first history of offer-form snapshots per client.
pub struct OfferDraftRepo;

impl OfferDraftRepo {
    /// Save a snapshot and evict anything beyond [`OFFER_HISTORY_CAP`] for
    /// the same client, oldest first.
    pub async fn save(
        pool: &PgPool,
        client_key: Uuid,
        snapshot: &serde_json::Value,
    ) -> Result<OfferDraft, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO offer_drafts (client_key, snapshot) VALUES ($1, $2) \
             RETURNING {DRAFT_COLUMNS}"
        );
        let draft = sqlx::query_as::<_, OfferDraft>(&query)
            .bind(client_key)
            .bind(snapshot)
            .fetch_one(&mut *tx)
            .await?;

        let evicted = sqlx::query(
            "DELETE FROM offer_drafts WHERE client_key = $1 AND id NOT IN ( \
                 SELECT id FROM offer_drafts WHERE client_key = $1 \
                 ORDER BY created_at DESC, id DESC LIMIT $2)",
        )
        .bind(client_key)
        .bind(OFFER_HISTORY_CAP)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        tx.commit().await?;

        if evicted > 0 {
            tracing::debug!(%client_key, evicted, "Evicted old offer drafts");
        }
        Ok(draft)
    }

    /// Newest first, at most [`OFFER_HISTORY_CAP`] entries.
    pub async fn list(pool: &PgPool, client_key: Uuid) -> Result<Vec<OfferDraft>, sqlx::Error> {
        let query = format!(
            "SELECT {DRAFT_COLUMNS} FROM offer_drafts WHERE client_key = $1 \
             ORDER BY created_at DESC, id DESC LIMIT $2"
        );
        sqlx::query_as::<_, OfferDraft>(&query)
            .bind(client_key)
            .bind(OFFER_HISTORY_CAP)
            .fetch_all(pool)
            .await
    }

    /// The newest snapshot for a client, used to resume the form.
    pub async fn latest(pool: &PgPool, client_key: Uuid) -> Result<Option<OfferDraft>, sqlx::Error> {
        let query = format!(
            "SELECT {DRAFT_COLUMNS} FROM offer_drafts WHERE client_key = $1 \
             ORDER BY created_at DESC, id DESC LIMIT 1"
        );
        sqlx::query_as::<_, OfferDraft>(&query)
            .bind(client_key)
            .fetch_optional(pool)
            .await
    }
}
