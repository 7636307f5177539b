use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{Expense, ExpenseStatus};

/// Applies a status transition to an expense and returns the updated record.
///
/// Deliberately permissive: any status can overwrite any prior status,
/// including re-opening an approved or rejected expense back to pending or
/// flipping approved and rejected directly. The caller (service layer) is
/// responsible for deciding who may invoke this; the transition itself only
/// maintains the record invariants:
///
/// - `Pending` clears `approved_by` and `approved_at`,
/// - `Approved`/`Rejected` stamp `approved_at = at` and record the acting
///   member, which may be absent.
pub fn set_status(
    expense: &Expense,
    new_status: ExpenseStatus,
    acting_member_id: Option<Uuid>,
    at: DateTime<Utc>,
) -> Expense {
    let (approved_by, approved_at) = match new_status {
        ExpenseStatus::Pending => (None, None),
        ExpenseStatus::Approved | ExpenseStatus::Rejected => (acting_member_id, Some(at)),
    };

    Expense {
        status: new_status,
        approved_by,
        approved_at,
        ..expense.clone()
    }
}
