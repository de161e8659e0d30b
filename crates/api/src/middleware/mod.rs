//! Request middleware.
//!
//! - [`rate_limit::rate_limit`]: per-client fixed-window limiter.

pub mod rate_limit;
