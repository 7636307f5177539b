use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::core::settlement::SettlementReport;
use crate::error::LedgerError;
use crate::infrastructure::cache::{Cache, cache_keys};

#[derive(Clone)]
pub struct InMemoryCache {
    cache: Arc<RwLock<HashMap<String, (SettlementReport, chrono::DateTime<chrono::Utc>)>>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        InMemoryCache {
            cache: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Cache for InMemoryCache {
    async fn get_settlement(&self, room_id: Uuid) -> Result<Option<SettlementReport>, LedgerError> {
        let cache = self.cache.read().await;
        let key = cache_keys::settlement_key(room_id);
        Ok(cache
            .get(&key)
            .filter(|(_, expiry)| *expiry > chrono::Utc::now())
            .map(|(report, _)| report.clone()))
    }

    async fn save_settlement(
        &self,
        room_id: Uuid,
        report: &SettlementReport,
        ttl: std::time::Duration,
    ) -> Result<(), LedgerError> {
        let mut cache = self.cache.write().await;
        let key = cache_keys::settlement_key(room_id);
        let expiry = chrono::Utc::now()
            + chrono::Duration::from_std(ttl)
                .map_err(|e| LedgerError::CacheError(format!("Failed to convert TTL: {}", e)))?;
        cache.insert(key, (report.clone(), expiry));
        Ok(())
    }

    async fn invalidate_settlement(&self, room_id: Uuid) -> Result<(), LedgerError> {
        let mut cache = self.cache.write().await;
        cache.remove(&cache_keys::settlement_key(room_id));
        cache.retain(|_, (_, expiry)| *expiry > chrono::Utc::now());
        Ok(())
    }
}
