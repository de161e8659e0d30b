//! VaultRE CRM integration.
//!
//! - [`api`]: REST client for the VaultRE endpoints listdesk uses.
//! - [`models`]: wire types (suburbs, properties, paged envelopes).
//! - [`directory`]: the [`CrmClient`] seam reconciliation runs against.
//! - [`reconcile`]: suburb selection, paged exact address matching and the
//!   create-vs-update appraisal decision.
//! - [`appraisal`]: appraisal payload construction from a listing draft.

pub mod api;
pub mod appraisal;
pub mod directory;
pub mod error;
pub mod models;
pub mod reconcile;

pub use api::{VaultReApi, VaultReConfig};
pub use directory::CrmClient;
pub use error::VaultReError;
