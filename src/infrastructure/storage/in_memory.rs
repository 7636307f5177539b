use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::LedgerError;
use crate::infrastructure::storage::Storage;
use crate::models::{Expense, Member, Room};

pub struct InMemoryStorage {
    rooms: Mutex<HashMap<Uuid, Room>>,
    invite_codes: Mutex<HashMap<String, Uuid>>, // code -> room_id
    members: Mutex<HashMap<Uuid, Member>>,
    emails: Mutex<HashMap<String, Uuid>>, // email -> member_id
    expenses: Mutex<HashMap<Uuid, Expense>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        InMemoryStorage {
            rooms: Mutex::new(HashMap::new()),
            invite_codes: Mutex::new(HashMap::new()),
            members: Mutex::new(HashMap::new()),
            emails: Mutex::new(HashMap::new()),
            expenses: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn create_room(&self, room: Room) -> Result<Room, LedgerError> {
        // For production: use a database unique constraint on invite_code
        let mut invite_codes = self.invite_codes.lock().await;
        if invite_codes.contains_key(&room.invite_code) {
            return Err(LedgerError::InviteCodeTaken(room.invite_code));
        }
        invite_codes.insert(room.invite_code.clone(), room.id);
        let mut rooms = self.rooms.lock().await;
        rooms.insert(room.id, room.clone());
        Ok(room)
    }

    async fn get_room(&self, room_id: Uuid) -> Result<Option<Room>, LedgerError> {
        Ok(self.rooms.lock().await.get(&room_id).cloned())
    }

    async fn get_room_by_invite_code(&self, code: &str) -> Result<Option<Room>, LedgerError> {
        // For production: use a database index on invite_code
        let room_id = self.invite_codes.lock().await.get(code).copied();
        Ok(match room_id {
            Some(id) => self.rooms.lock().await.get(&id).cloned(),
            None => None,
        })
    }

    async fn create_member(&self, member: Member) -> Result<Member, LedgerError> {
        let mut emails = self.emails.lock().await;
        if emails.contains_key(&member.email) {
            return Err(LedgerError::EmailAlreadyRegistered(member.email));
        }
        emails.insert(member.email.clone(), member.id);
        let mut members = self.members.lock().await;
        members.insert(member.id, member.clone());
        Ok(member)
    }

    async fn get_member(&self, member_id: Uuid) -> Result<Option<Member>, LedgerError> {
        Ok(self.members.lock().await.get(&member_id).cloned())
    }

    async fn get_member_by_email(&self, email: &str) -> Result<Option<Member>, LedgerError> {
        // For production: use a database index on email
        let member_id = self.emails.lock().await.get(email).copied();
        Ok(match member_id {
            Some(id) => self.members.lock().await.get(&id).cloned(),
            None => None,
        })
    }

    async fn list_members(&self, room_id: Uuid) -> Result<Vec<Member>, LedgerError> {
        // For production: database query with index, ordered by created_at
        let mut members: Vec<Member> = self
            .members
            .lock()
            .await
            .values()
            .filter(|m| m.room_id == room_id)
            .cloned()
            .collect();
        members.sort_by_key(|m| m.created_at);
        Ok(members)
    }

    async fn create_expense(&self, expense: Expense) -> Result<Expense, LedgerError> {
        self.expenses
            .lock()
            .await
            .insert(expense.id, expense.clone());
        Ok(expense)
    }

    async fn update_expense(&self, expense: Expense) -> Result<Expense, LedgerError> {
        let mut expenses = self.expenses.lock().await;
        if !expenses.contains_key(&expense.id) {
            return Err(LedgerError::ExpenseNotFound(expense.id.to_string()));
        }
        expenses.insert(expense.id, expense.clone());
        Ok(expense)
    }

    async fn get_expense(&self, expense_id: Uuid) -> Result<Option<Expense>, LedgerError> {
        Ok(self.expenses.lock().await.get(&expense_id).cloned())
    }

    async fn list_expenses(&self, room_id: Uuid) -> Result<Vec<Expense>, LedgerError> {
        // For production: database query with index on room_id
        Ok(self
            .expenses
            .lock()
            .await
            .values()
            .filter(|e| e.room_id == room_id)
            .cloned()
            .collect())
    }
}
