use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::PasscodeStore;
use crate::error::AppResult;
use crate::models::PasscodeRecord;

#[derive(Clone, Default)]
pub struct InMemoryPasscodeStore {
    records: Arc<RwLock<HashMap<String, PasscodeRecord>>>,
}

impl InMemoryPasscodeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PasscodeStore for InMemoryPasscodeStore {
    async fn get(&self, phone: &str) -> AppResult<Option<PasscodeRecord>> {
        let records = self.records.read().await;
        Ok(records.get(phone).cloned())
    }

    async fn set(&self, phone: &str, record: PasscodeRecord) -> AppResult<()> {
        let mut records = self.records.write().await;
        records.insert(phone.to_string(), record);
        Ok(())
    }

    async fn delete(&self, phone: &str) -> AppResult<()> {
        let mut records = self.records.write().await;
        records.remove(phone);
        Ok(())
    }

    async fn delete_stale(&self, now: DateTime<Utc>, issuance_window: Duration) -> AppResult<usize> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|_, record| !record.is_stale(now, issuance_window));
        Ok(before - records.len())
    }

    async fn count(&self) -> AppResult<usize> {
        Ok(self.records.read().await.len())
    }
}
