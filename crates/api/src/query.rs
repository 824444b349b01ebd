//! Shared query parameter types for API handlers.

use chrono::NaiveDate;
use duebook_core::types::DbId;
use serde::Deserialize;

/// `?dueSoonDays=` on endpoints that derive a status without listing.
#[derive(Debug, Default, Deserialize)]
pub struct ThresholdParams {
    #[serde(rename = "dueSoonDays")]
    pub due_soon_days: Option<i64>,
}

/// Filters accepted by expense list and summary endpoints.
///
/// Fields are spelled out rather than flattened: `serde_urlencoded` loses
/// number/bool typing through `#[serde(flatten)]`.
#[derive(Debug, Default, Deserialize)]
pub struct ExpenseListParams {
    #[serde(rename = "dueSoonDays")]
    pub due_soon_days: Option<i64>,
    /// Derived status label (`overdue`, `due-soon`, `due`, `paid`).
    pub status: Option<String>,
    /// Case-insensitive name prefix.
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub expense_type: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub user_id: Option<DbId>,
    pub paid: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
