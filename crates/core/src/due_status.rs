//! Due-date status derivation.
//!
//! An expense only stores a `paid` flag and a due date. Everything the
//! dashboard shows (overdue, due soon, due, paid) is derived here from those
//! two fields, the current calendar date and a due-soon threshold in days.
//! Comparisons happen on [`NaiveDate`] values, so time-of-day and timezone
//! skew never move an expense between buckets.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Money;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Due-soon threshold used when the caller does not supply one.
pub const DEFAULT_DUE_SOON_DAYS: u32 = 5;

/// Largest accepted due-soon threshold.
pub const MAX_DUE_SOON_DAYS: u32 = 365;

pub const STATUS_PAID: &str = "paid";
pub const STATUS_OVERDUE: &str = "overdue";
pub const STATUS_DUE_SOON: &str = "due-soon";
pub const STATUS_DUE: &str = "due";

/// All valid status labels, in dashboard order.
pub const VALID_STATUSES: &[&str] = &[STATUS_OVERDUE, STATUS_DUE_SOON, STATUS_DUE, STATUS_PAID];

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// The derived status of an expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DueStatus {
    Overdue,
    DueSoon,
    Due,
    Paid,
}

impl DueStatus {
    /// Parse a wire label (`paid`, `overdue`, `due-soon`, `due`).
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            STATUS_PAID => Ok(Self::Paid),
            STATUS_OVERDUE => Ok(Self::Overdue),
            STATUS_DUE_SOON => Ok(Self::DueSoon),
            STATUS_DUE => Ok(Self::Due),
            _ => Err(format!(
                "Invalid status '{s}'. Must be one of: {}",
                VALID_STATUSES.join(", ")
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Paid => STATUS_PAID,
            Self::Overdue => STATUS_OVERDUE,
            Self::DueSoon => STATUS_DUE_SOON,
            Self::Due => STATUS_DUE,
        }
    }

    /// The flag/date range that yields this status for `today` and `threshold`.
    ///
    /// Storage backends filter on the window instead of deriving per row.
    pub fn window(&self, today: NaiveDate, threshold: u32) -> StatusWindow {
        let horizon = add_days(today, u64::from(threshold));
        match self {
            Self::Paid => StatusWindow {
                paid: true,
                due_from: None,
                due_to: None,
            },
            Self::Overdue => StatusWindow {
                paid: false,
                due_from: None,
                due_to: Some(today.pred_opt().unwrap_or(NaiveDate::MIN)),
            },
            Self::DueSoon => StatusWindow {
                paid: false,
                due_from: Some(today),
                due_to: Some(horizon),
            },
            Self::Due => StatusWindow {
                paid: false,
                due_from: Some(add_days(horizon, 1)),
                due_to: None,
            },
        }
    }
}

impl std::fmt::Display for DueStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Structs
// ---------------------------------------------------------------------------

/// Inclusive range predicate over `(paid, due_date)` equivalent to one status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusWindow {
    pub paid: bool,
    pub due_from: Option<NaiveDate>,
    pub due_to: Option<NaiveDate>,
}

impl StatusWindow {
    pub fn contains(&self, paid: bool, due_date: NaiveDate) -> bool {
        if paid != self.paid {
            return false;
        }
        let after_start = self.due_from.map_or(true, |from| due_date >= from);
        let before_end = self.due_to.map_or(true, |to| due_date <= to);
        after_start && before_end
    }
}

/// Count and amount total for one status bucket.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatusBucket {
    pub count: usize,
    pub total: Money,
}

impl StatusBucket {
    fn add(&mut self, amount: Money) {
        self.count += 1;
        self.total += amount;
    }
}

/// Per-status counts and totals, as shown on the dashboard cards.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatusSummary {
    pub overdue: StatusBucket,
    #[serde(rename = "due-soon")]
    pub due_soon: StatusBucket,
    pub due: StatusBucket,
    pub paid: StatusBucket,
    pub due_soon_days: u32,
}

impl StatusSummary {
    /// Fold `(status, amount)` pairs into buckets.
    pub fn from_items<I>(items: I, due_soon_days: u32) -> Self
    where
        I: IntoIterator<Item = (DueStatus, Money)>,
    {
        let mut summary = Self {
            due_soon_days,
            ..Self::default()
        };
        for (status, amount) in items {
            summary.bucket_mut(status).add(amount);
        }
        summary
    }

    pub fn bucket(&self, status: DueStatus) -> &StatusBucket {
        match status {
            DueStatus::Overdue => &self.overdue,
            DueStatus::DueSoon => &self.due_soon,
            DueStatus::Due => &self.due,
            DueStatus::Paid => &self.paid,
        }
    }

    fn bucket_mut(&mut self, status: DueStatus) -> &mut StatusBucket {
        match status {
            DueStatus::Overdue => &mut self.overdue,
            DueStatus::DueSoon => &mut self.due_soon,
            DueStatus::Due => &mut self.due,
            DueStatus::Paid => &mut self.paid,
        }
    }
}

// ---------------------------------------------------------------------------
// Derivation
// ---------------------------------------------------------------------------

/// Classify an expense.
///
/// `paid` short-circuits every date rule. Otherwise a due date before
/// `today` is overdue, one within `[today, today + threshold]` (inclusive on
/// both ends) is due soon, and anything later is due.
pub fn derive_status(
    paid: bool,
    due_date: NaiveDate,
    today: NaiveDate,
    threshold: u32,
) -> DueStatus {
    if paid {
        return DueStatus::Paid;
    }

    let days_until_due = (due_date - today).num_days();
    if days_until_due < 0 {
        DueStatus::Overdue
    } else if days_until_due <= i64::from(threshold) {
        DueStatus::DueSoon
    } else {
        DueStatus::Due
    }
}

/// Check a caller-supplied threshold and narrow it to `u32`.
pub fn validate_threshold(days: i64) -> Result<u32, CoreError> {
    if !(0..=i64::from(MAX_DUE_SOON_DAYS)).contains(&days) {
        return Err(CoreError::Validation(format!(
            "dueSoonDays must be between 0 and {MAX_DUE_SOON_DAYS}, got {days}"
        )));
    }
    // In range, so the cast cannot truncate.
    Ok(days as u32)
}

/// Today's date in the server's local timezone.
pub fn today_local() -> NaiveDate {
    chrono::Local::now().date_naive()
}

fn add_days(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX)
}
