//! The CRM operations reconciliation depends on.
//!
//! [`VaultReApi`](crate::api::VaultReApi) implements this over HTTP; tests
//! supply in-memory directories to exercise paging and matching.

use async_trait::async_trait;
use listdesk_core::types::CrmId;

use crate::error::VaultReError;
use crate::models::{Page, Property, Suburb};

#[async_trait]
pub trait CrmClient: Send + Sync {
    /// Search the suburb directory by name.
    async fn search_suburbs(&self, name: &str) -> Result<Vec<Suburb>, VaultReError>;

    /// One page (1-based) of residential sale properties in a suburb.
    async fn sale_properties_page(
        &self,
        suburb_id: CrmId,
        page: u32,
        page_size: u32,
    ) -> Result<Page<Property>, VaultReError>;

    /// Create a residential sale property in appraisal status. Returns its id.
    async fn create_appraisal(&self, payload: &serde_json::Value) -> Result<CrmId, VaultReError>;

    /// Update an existing residential sale property.
    async fn update_property(
        &self,
        property_id: CrmId,
        payload: &serde_json::Value,
    ) -> Result<(), VaultReError>;
}
