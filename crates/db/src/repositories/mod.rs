//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod listing_repo;
pub mod offer_repo;

pub use listing_repo::ListingRepo;
pub use offer_repo::{OfferDraftRepo, OfferRepo};
