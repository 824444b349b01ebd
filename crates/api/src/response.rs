//! Shared response envelope types for API handlers.

use serde::Serialize;

/// One page of a list endpoint: `{ "data": [...], "total", "limit", "offset" }`.
///
/// `total` counts every match, not just the rows in `data`.
#[derive(Debug, Serialize)]
pub struct PagedResponse<T: Serialize> {
    pub data: Vec<T>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}
