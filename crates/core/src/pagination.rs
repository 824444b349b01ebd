//! Limit/offset clamping for list endpoints.

/// Page size when the caller does not ask for one.
pub const DEFAULT_LIMIT: i64 = 15;

/// Largest page a caller may request.
pub const MAX_LIMIT: i64 = 100;

/// Clamp a requested page size into `1..=MAX_LIMIT`, defaulting to
/// [`DEFAULT_LIMIT`].
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
}

/// Clamp a requested offset to be non-negative, defaulting to 0.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}
