use chrono::Utc;
use futures::try_join;
use log::{debug, info, warn};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::json;
use uuid::Uuid;

use crate::constants::{
    ANALYTICS_QUERIED, EXPENSE_ADDED, EXPENSE_STATUS_CHANGED, MAX_EXPENSE_AMOUNT, MEMBER_ADDED,
    PAIRWISE_QUERIED, ROOM_CREATED, SETTLEMENT_CACHE_TTL, SETTLEMENT_QUERIED,
};
use crate::core::analytics::{AnalyticsReport, MonthWindow};
use crate::core::approval;
use crate::core::settlement::{self, PairwiseBalance, SettlementReport};
use crate::error::{FieldError, LedgerError};
use crate::infrastructure::cache::Cache;
use crate::infrastructure::logging::AuditLogger;
use crate::infrastructure::storage::Storage;
use crate::models::{AuditLogEntry, Expense, ExpenseStatus, Member, Room};

/// Two-party comparison plus the expenses it was computed from.
#[derive(Clone, Debug, Serialize)]
pub struct PairwiseReport {
    pub balance: PairwiseBalance,
    pub shared: Vec<Expense>,
}

pub struct LedgerService<S: Storage, L: AuditLogger, C: Cache> {
    storage: S,
    audit: L,
    cache: C,
}

impl<S: Storage, L: AuditLogger, C: Cache> LedgerService<S, L, C> {
    pub fn new(storage: S, audit: L, cache: C) -> Self {
        info!("Initializing LedgerService");
        LedgerService {
            storage,
            audit,
            cache,
        }
    }

    // ROOMS

    pub async fn create_room(
        &self,
        name: String,
        invite_code: Option<String>,
    ) -> Result<Room, LedgerError> {
        info!("Creating room '{}'", name);
        self.validate_string_input("name", &name, 100)?;

        let invite_code = match invite_code {
            Some(code) => {
                self.validate_string_input("invite_code", &code, 32)?;
                code
            }
            None => Self::generate_invite_code(),
        };

        let now = Utc::now();
        let room = Room {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            invite_code,
            created_at: now,
            updated_at: now,
        };

        let created = self.storage.create_room(room).await?;
        debug!("Room created with ID: {}", created.id);

        self.audit
            .log_action(
                ROOM_CREATED,
                json!({ "room_id": created.id, "name": created.name, "invite_code": created.invite_code }),
                None,
            )
            .await?;

        Ok(created)
    }

    pub async fn get_room(&self, room_id: Uuid) -> Result<Room, LedgerError> {
        self.storage
            .get_room(room_id)
            .await?
            .ok_or_else(|| LedgerError::RoomNotFound(room_id.to_string()))
    }

    pub async fn find_room_by_invite_code(&self, code: &str) -> Result<Room, LedgerError> {
        self.storage
            .get_room_by_invite_code(code)
            .await?
            .ok_or_else(|| {
                warn!("Invalid invite code: {}", code);
                LedgerError::RoomNotFound(code.to_string())
            })
    }

    // MEMBERS

    pub async fn add_member(
        &self,
        room_id: Uuid,
        name: String,
        email: String,
        is_manager: bool,
    ) -> Result<Member, LedgerError> {
        info!("Adding member '{}' to room {}", name, room_id);
        self.get_room(room_id).await?;
        self.validate_string_input("name", &name, 100)?;

        let email = email.trim().to_lowercase();
        if !email.contains('@') || !email.contains('.') || email.len() < 5 {
            return Err(LedgerError::InvalidInput(
                "email".to_string(),
                FieldError {
                    field: "email".to_string(),
                    title: "Invalid email".to_string(),
                    description: "Email format is invalid".to_string(),
                },
            ));
        }

        if self.storage.get_member_by_email(&email).await?.is_some() {
            warn!("Email {} already registered", email);
            return Err(LedgerError::EmailAlreadyRegistered(email));
        }

        // The first member of a room is always its manager; later members
        // take the caller-supplied flag
        let existing = self.storage.list_members(room_id).await?;
        let is_manager = if existing.is_empty() { true } else { is_manager };

        let member = Member {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            email,
            is_manager,
            room_id,
            created_at: Utc::now(),
        };

        let created = self.storage.create_member(member).await?;
        debug!("Member created with ID: {}", created.id);

        self.audit
            .log_action(
                MEMBER_ADDED,
                json!({
                    "room_id": room_id,
                    "member_id": created.id,
                    "name": created.name,
                    "is_manager": created.is_manager
                }),
                Some(created.id),
            )
            .await?;

        Ok(created)
    }

    pub async fn get_member(&self, member_id: Uuid) -> Result<Member, LedgerError> {
        self.storage
            .get_member(member_id)
            .await?
            .ok_or_else(|| LedgerError::MemberNotFound(member_id.to_string()))
    }

    pub async fn list_members(&self, room_id: Uuid) -> Result<Vec<Member>, LedgerError> {
        self.get_room(room_id).await?;
        self.storage.list_members(room_id).await
    }

    // EXPENSES

    pub async fn create_expense(
        &self,
        room_id: Uuid,
        description: String,
        amount: Decimal,
        category: String,
        date: String,
        added_by: Uuid,
    ) -> Result<Expense, LedgerError> {
        info!(
            "Creating expense in room {} by member {} for amount {}",
            room_id, added_by, amount
        );
        self.get_room(room_id).await?;
        let member = self.get_member(added_by).await?;
        if member.room_id != room_id {
            warn!("Member {} not in room {}", added_by, room_id);
            return Err(LedgerError::NotRoomMember(added_by.to_string()));
        }

        self.validate_string_input("description", &description, 200)?;
        self.validate_string_input("category", &category, 100)?;
        self.validate_string_input("date", &date, 64)?;
        self.validate_amount_input("amount", amount)?;

        let expense = Expense {
            id: Uuid::new_v4(),
            description: description.trim().to_string(),
            amount,
            category: category.trim().to_string(),
            date,
            room_id,
            added_by,
            status: ExpenseStatus::Pending,
            approved_by: None,
            approved_at: None,
        };

        let created = self.storage.create_expense(expense).await?;
        debug!("Expense created with ID: {}", created.id);
        self.cache.invalidate_settlement(room_id).await?;

        self.audit
            .log_action(
                EXPENSE_ADDED,
                json!({
                    "room_id": room_id,
                    "expense_id": created.id,
                    "amount": created.amount,
                    "category": created.category
                }),
                Some(added_by),
            )
            .await?;

        Ok(created)
    }

    /// Room ledger, newest first; expenses whose date does not parse sort
    /// last.
    pub async fn list_expenses(&self, room_id: Uuid) -> Result<Vec<Expense>, LedgerError> {
        self.get_room(room_id).await?;
        let mut expenses = self.storage.list_expenses(room_id).await?;
        expenses.sort_by(|a, b| b.parsed_date().cmp(&a.parsed_date()));
        Ok(expenses)
    }

    /// Applies a status transition and persists the result.
    ///
    /// The transition itself is permissive (any prior state may be
    /// overwritten, see `core::approval`); what is enforced here is that a
    /// supplied approver exists, belongs to the expense's room, and holds
    /// the manager flag. An absent approver is tolerated.
    pub async fn update_expense_status(
        &self,
        expense_id: Uuid,
        status: &str,
        approver_id: Option<Uuid>,
    ) -> Result<Expense, LedgerError> {
        info!("Setting expense {} status to '{}'", expense_id, status);
        let new_status: ExpenseStatus = status.parse()?;

        let expense = self
            .storage
            .get_expense(expense_id)
            .await?
            .ok_or_else(|| LedgerError::ExpenseNotFound(expense_id.to_string()))?;

        if let Some(approver) = approver_id {
            let member = self.get_member(approver).await?;
            if member.room_id != expense.room_id {
                warn!("Approver {} not in room {}", approver, expense.room_id);
                return Err(LedgerError::NotRoomMember(approver.to_string()));
            }
            if !member.is_manager {
                warn!(
                    "Member {} attempted status change on expense {} without manager flag",
                    approver, expense_id
                );
                return Err(LedgerError::NotManager(approver.to_string()));
            }
        }

        let updated = approval::set_status(&expense, new_status, approver_id, Utc::now());
        let saved = self.storage.update_expense(updated).await?;
        debug!("Expense {} now {}", saved.id, saved.status);
        self.cache.invalidate_settlement(saved.room_id).await?;

        self.audit
            .log_action(
                EXPENSE_STATUS_CHANGED,
                json!({
                    "room_id": saved.room_id,
                    "expense_id": saved.id,
                    "status": saved.status,
                    "approver_id": approver_id
                }),
                approver_id,
            )
            .await?;

        Ok(saved)
    }

    // DERIVED VIEWS

    pub async fn settlement_report(&self, room_id: Uuid) -> Result<SettlementReport, LedgerError> {
        self.get_room(room_id).await?;

        if let Some(cached) = self.cache.get_settlement(room_id).await? {
            debug!("Settlement report for room {} served from cache", room_id);
            return Ok(cached);
        }

        let (expenses, members) = try_join!(
            self.storage.list_expenses(room_id),
            self.storage.list_members(room_id)
        )?;
        let report = settlement::settle(&expenses, &members);

        self.cache
            .save_settlement(room_id, &report, SETTLEMENT_CACHE_TTL)
            .await?;
        self.audit
            .log_action(
                SETTLEMENT_QUERIED,
                json!({ "room_id": room_id, "total_approved": report.total_approved }),
                None,
            )
            .await?;

        Ok(report)
    }

    pub async fn pairwise_report(
        &self,
        room_id: Uuid,
        member_a: Uuid,
        member_b: Uuid,
    ) -> Result<PairwiseReport, LedgerError> {
        self.get_room(room_id).await?;
        let expenses = self.storage.list_expenses(room_id).await?;

        let balance = settlement::pairwise(&expenses, member_a, member_b);
        let shared = settlement::shared_expenses(&expenses, member_a, member_b);

        self.audit
            .log_action(
                PAIRWISE_QUERIED,
                json!({ "room_id": room_id, "member_a": member_a, "member_b": member_b }),
                None,
            )
            .await?;

        Ok(PairwiseReport { balance, shared })
    }

    pub async fn analytics_report(
        &self,
        room_id: Uuid,
        window: Option<MonthWindow>,
    ) -> Result<AnalyticsReport, LedgerError> {
        self.get_room(room_id).await?;
        let (expenses, members) = try_join!(
            self.storage.list_expenses(room_id),
            self.storage.list_members(room_id)
        )?;

        let now = Utc::now();
        let window = window.unwrap_or_else(|| MonthWindow::containing(now));
        let report = AnalyticsReport::build(&expenses, members.len(), window, now);

        self.audit
            .log_action(
                ANALYTICS_QUERIED,
                json!({ "room_id": room_id, "year": window.year, "month": window.month }),
                None,
            )
            .await?;

        Ok(report)
    }

    pub async fn audit_log(&self) -> Result<Vec<AuditLogEntry>, LedgerError> {
        self.audit.entries().await
    }

    // VALIDATION HELPERS

    fn validate_string_input(
        &self,
        field: &str,
        value: &str,
        max_length: usize,
    ) -> Result<(), LedgerError> {
        if value.trim().is_empty() {
            return Err(LedgerError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: format!("Invalid {}", field),
                    description: format!("{} cannot be empty", field),
                },
            ));
        }
        if value.len() > max_length {
            return Err(LedgerError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: format!("{} Too Long", field),
                    description: format!("{} cannot exceed {} characters", field, max_length),
                },
            ));
        }
        if value.chars().any(|c| c.is_control() || "<>{}[]".contains(c)) {
            return Err(LedgerError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: format!("Invalid {}", field),
                    description: format!("{} contains invalid characters", field),
                },
            ));
        }
        Ok(())
    }

    fn validate_amount_input(&self, field: &str, amount: Decimal) -> Result<(), LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: "Invalid Amount".to_string(),
                    description: "Amount must be greater than 0".to_string(),
                },
            ));
        }
        if amount > Decimal::from(MAX_EXPENSE_AMOUNT) {
            return Err(LedgerError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: "Amount Too Large".to_string(),
                    description: format!("Amount cannot exceed {}", MAX_EXPENSE_AMOUNT),
                },
            ));
        }
        Ok(())
    }

    // UTILITIES

    fn generate_invite_code() -> String {
        let token = Uuid::new_v4().simple().to_string();
        let code = format!("ROOM-{}", token[..6].to_uppercase());
        debug!("Generated invite code: {}", code);
        code
    }
}
