use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::LedgerError;

/// Lifecycle of an expense. Created `Pending`; a manager moves it to
/// `Approved` or `Rejected`. Transitions overwrite in place, prior
/// transitions are not retained.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseStatus {
    Pending,
    Approved,
    Rejected,
}

impl FromStr for ExpenseStatus {
    type Err = LedgerError;

    // Wire strings are lowercase and case-sensitive
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ExpenseStatus::Pending),
            "approved" => Ok(ExpenseStatus::Approved),
            "rejected" => Ok(ExpenseStatus::Rejected),
            other => Err(LedgerError::InvalidStatus(other.to_string())),
        }
    }
}

impl std::fmt::Display for ExpenseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ExpenseStatus::Pending => "pending",
            ExpenseStatus::Approved => "approved",
            ExpenseStatus::Rejected => "rejected",
        };
        write!(f, "{}", s)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Expense {
    pub id: Uuid,
    pub description: String,
    #[schema(value_type = f64)]
    pub amount: Decimal,
    pub category: String,
    /// Caller-supplied timestamp, stored verbatim. Aggregations parse it
    /// defensively; an unparseable date drops the expense from date-bucketed
    /// views only.
    pub date: String,
    pub room_id: Uuid,
    pub added_by: Uuid,
    pub status: ExpenseStatus,
    pub approved_by: Option<Uuid>,
    pub approved_at: Option<DateTime<Utc>>,
}

impl Expense {
    pub fn is_approved(&self) -> bool {
        self.status == ExpenseStatus::Approved
    }

    /// Best-effort parse of the stored date string: RFC 3339, then a bare
    /// `YYYY-MM-DDTHH:MM:SS`, then `YYYY-MM-DD` at midnight, all taken as UTC.
    pub fn parsed_date(&self) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(&self.date) {
            return Some(dt.with_timezone(&Utc));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(&self.date, "%Y-%m-%dT%H:%M:%S") {
            return Some(naive.and_utc());
        }
        if let Ok(day) = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d") {
            return day.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
        }
        None
    }
}
