pub mod in_memory;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::LedgerError;
use crate::models::AuditLogEntry;

#[async_trait]
pub trait AuditLogger: Send + Sync {
    async fn log_action(
        &self,
        action: &str,
        details: serde_json::Value,
        member_id: Option<Uuid>,
    ) -> Result<(), LedgerError>;

    async fn entries(&self) -> Result<Vec<AuditLogEntry>, LedgerError>;
}
