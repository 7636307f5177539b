use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::error::LedgerError;
use crate::infrastructure::logging::AuditLogger;
use crate::models::AuditLogEntry;

pub struct InMemoryAuditLogger {
    entries: tokio::sync::Mutex<Vec<AuditLogEntry>>,
}

impl InMemoryAuditLogger {
    pub fn new() -> Self {
        InMemoryAuditLogger {
            entries: tokio::sync::Mutex::new(Vec::new()),
        }
    }
}

impl Default for InMemoryAuditLogger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuditLogger for InMemoryAuditLogger {
    async fn log_action(
        &self,
        action: &str,
        details: serde_json::Value,
        member_id: Option<Uuid>,
    ) -> Result<(), LedgerError> {
        // For production: use a logging queue or batch writes
        let mut entries = self.entries.lock().await;
        entries.push(AuditLogEntry::new(action, member_id, &details, Utc::now()));
        Ok(())
    }

    async fn entries(&self) -> Result<Vec<AuditLogEntry>, LedgerError> {
        Ok(self.entries.lock().await.clone())
    }
}
