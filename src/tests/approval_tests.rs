use chrono::Utc;
use uuid::Uuid;

use crate::core::approval::set_status;
use crate::error::LedgerError;
use crate::models::ExpenseStatus;
use crate::tests::test_expense;

#[test]
fn test_pending_clears_approval_fields_from_any_prior_state() {
    let room_id = Uuid::new_v4();
    let member_id = Uuid::new_v4();
    let approver = Uuid::new_v4();
    let base = test_expense(
        room_id,
        member_id,
        "42.00",
        "Food",
        "2026-08-01",
        ExpenseStatus::Pending,
    );

    let approved = set_status(&base, ExpenseStatus::Approved, Some(approver), Utc::now());
    assert_eq!(approved.status, ExpenseStatus::Approved);
    assert_eq!(approved.approved_by, Some(approver));
    assert!(approved.approved_at.is_some());

    let reopened = set_status(&approved, ExpenseStatus::Pending, Some(approver), Utc::now());
    assert_eq!(reopened.status, ExpenseStatus::Pending);
    assert_eq!(reopened.approved_by, None);
    assert_eq!(reopened.approved_at, None);

    let rejected = set_status(&base, ExpenseStatus::Rejected, Some(approver), Utc::now());
    let reopened = set_status(&rejected, ExpenseStatus::Pending, None, Utc::now());
    assert_eq!(reopened.approved_by, None);
    assert_eq!(reopened.approved_at, None);
}

#[test]
fn test_transition_stamps_time_and_tolerates_missing_approver() {
    let base = test_expense(
        Uuid::new_v4(),
        Uuid::new_v4(),
        "10.00",
        "Internet",
        "2026-08-01",
        ExpenseStatus::Pending,
    );

    let at = Utc::now();
    let approved = set_status(&base, ExpenseStatus::Approved, None, at);
    assert_eq!(approved.approved_by, None);
    assert_eq!(approved.approved_at, Some(at));
}

#[test]
fn test_any_state_can_overwrite_any_other() {
    let approver = Uuid::new_v4();
    let base = test_expense(
        Uuid::new_v4(),
        Uuid::new_v4(),
        "10.00",
        "Food",
        "2026-08-01",
        ExpenseStatus::Pending,
    );

    // Approved and rejected flip directly, no pending round-trip required
    let approved = set_status(&base, ExpenseStatus::Approved, Some(approver), Utc::now());
    let flipped = set_status(&approved, ExpenseStatus::Rejected, Some(approver), Utc::now());
    assert_eq!(flipped.status, ExpenseStatus::Rejected);
    assert_eq!(flipped.approved_by, Some(approver));
    assert!(flipped.approved_at.is_some());

    let back = set_status(&flipped, ExpenseStatus::Approved, Some(approver), Utc::now());
    assert_eq!(back.status, ExpenseStatus::Approved);
}

#[test]
fn test_unknown_status_string_fails_to_parse() {
    let result = "bogus".parse::<ExpenseStatus>();
    assert!(matches!(result, Err(LedgerError::InvalidStatus(s)) if s == "bogus"));

    // Wire strings are case-sensitive
    assert!("Approved".parse::<ExpenseStatus>().is_err());
    assert_eq!(
        "approved".parse::<ExpenseStatus>().unwrap(),
        ExpenseStatus::Approved
    );
}
