pub mod cache_keys;
pub mod in_memory;

use async_trait::async_trait;
use uuid::Uuid;

use crate::core::settlement::SettlementReport;
use crate::error::LedgerError;

/// Read-through cache for per-room settlement reports. Every ledger write
/// invalidates the room's entry; the TTL only bounds staleness against
/// writers that bypass this process.
#[async_trait]
pub trait Cache: Send + Sync {
    async fn get_settlement(&self, room_id: Uuid) -> Result<Option<SettlementReport>, LedgerError>;

    async fn save_settlement(
        &self,
        room_id: Uuid,
        report: &SettlementReport,
        ttl: std::time::Duration,
    ) -> Result<(), LedgerError>;

    async fn invalidate_settlement(&self, room_id: Uuid) -> Result<(), LedgerError>;
}
