//! Pagination parameter clamping for list endpoints.

/// Default page size for list endpoints.
pub const DEFAULT_LIMIT: i64 = 25;

/// Largest page size a client may request.
pub const MAX_LIMIT: i64 = 100;

/// Clamp a user-provided limit to valid bounds.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}
