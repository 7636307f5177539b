mod analytics_tests;
mod approval_tests;

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::{Expense, ExpenseStatus, Member};
use crate::service::LedgerService;
use crate::{InMemoryAuditLogger, InMemoryCache, InMemoryStorage};

pub fn create_test_service() -> LedgerService<InMemoryStorage, InMemoryAuditLogger, InMemoryCache>
{
    let storage = InMemoryStorage::new();
    let audit = InMemoryAuditLogger::new();
    let cache = InMemoryCache::new();
    LedgerService::new(storage, audit, cache)
}

pub fn amount(value: &str) -> Decimal {
    value.parse().unwrap()
}

pub fn test_member(name: &str, is_manager: bool, room_id: Uuid) -> Member {
    Member {
        id: Uuid::new_v4(),
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        is_manager,
        room_id,
        created_at: Utc::now(),
    }
}

pub fn test_expense(
    room_id: Uuid,
    added_by: Uuid,
    value: &str,
    category: &str,
    date: &str,
    status: ExpenseStatus,
) -> Expense {
    Expense {
        id: Uuid::new_v4(),
        description: format!("{} purchase", category),
        amount: amount(value),
        category: category.to_string(),
        date: date.to_string(),
        room_id,
        added_by,
        status,
        approved_by: None,
        approved_at: None,
    }
}
