//! Row structs and DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct matching
//! the database row. Inputs are the domain types from `listdesk_core`.

pub mod listing;
pub mod offer;
