//! Listdesk domain logic.
//!
//! Pure building blocks shared by the HTTP server and the integration
//! crates: error types, listing/offer validation, address normalization,
//! the static agent table with its fuzzy matcher, JSON block extraction
//! for model output, and the per-client request-rate limiter.

pub mod address;
pub mod agents;
pub mod error;
pub mod json_block;
pub mod listing;
pub mod offer;
pub mod paging;
pub mod rate_limit;
pub mod types;
