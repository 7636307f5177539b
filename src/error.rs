use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: String,
    pub title: String,
    pub description: String,
}

#[derive(Error, Debug, Clone, Serialize)]
pub enum LedgerError {
    /// Status string is not one of pending/approved/rejected
    #[error("Invalid expense status: {0}")]
    InvalidStatus(String),

    /// Room with given ID not found
    #[error("Room {0} not found")]
    RoomNotFound(String),

    /// Member with given ID not found
    #[error("Member {0} not found")]
    MemberNotFound(String),

    /// Expense with given ID not found
    #[error("Expense {0} not found")]
    ExpenseNotFound(String),

    /// Member does not belong to the room
    #[error("Member {0} is not a room member")]
    NotRoomMember(String),

    /// Acting member is not the room manager
    #[error("Member {0} is not a manager")]
    NotManager(String),

    /// Email is already registered to another member
    #[error("Email {0} already registered")]
    EmailAlreadyRegistered(String),

    /// Invite code is already taken by another room
    #[error("Invite code {0} already exists")]
    InviteCodeTaken(String),

    /// Generic input validation error with detailed field information
    #[error("Invalid input for field `{0}`: {1:?}")]
    InvalidInput(String, FieldError),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Logging error: {0}")]
    LoggingError(String),

    #[error("Cache error: {0}")]
    CacheError(String),
}
