use async_trait::async_trait;
use uuid::Uuid;

use crate::error::LedgerError;
use crate::models::{Expense, Member, Room};

/// Ledger Store contract. The service layer treats this as the single owner
/// of persistent state; everything above it computes over snapshots.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn create_room(&self, room: Room) -> Result<Room, LedgerError>;
    async fn get_room(&self, room_id: Uuid) -> Result<Option<Room>, LedgerError>;
    async fn get_room_by_invite_code(&self, code: &str) -> Result<Option<Room>, LedgerError>;

    async fn create_member(&self, member: Member) -> Result<Member, LedgerError>;
    async fn get_member(&self, member_id: Uuid) -> Result<Option<Member>, LedgerError>;
    async fn get_member_by_email(&self, email: &str) -> Result<Option<Member>, LedgerError>;
    /// Members of a room in joined order (created_at ascending).
    async fn list_members(&self, room_id: Uuid) -> Result<Vec<Member>, LedgerError>;

    async fn create_expense(&self, expense: Expense) -> Result<Expense, LedgerError>;
    async fn update_expense(&self, expense: Expense) -> Result<Expense, LedgerError>;
    async fn get_expense(&self, expense_id: Uuid) -> Result<Option<Expense>, LedgerError>;
    async fn list_expenses(&self, room_id: Uuid) -> Result<Vec<Expense>, LedgerError>;
}

pub mod in_memory;
