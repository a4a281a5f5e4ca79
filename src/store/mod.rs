//! Keyed storage for outstanding passcodes.
//!
//! Services only see the [`PasscodeStore`] trait. The in-memory implementation
//! is what the binary runs with; anything keyed and persistent (Redis, a SQL
//! table) can be dropped in behind the same trait.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::error::AppResult;
use crate::models::PasscodeRecord;

pub mod memory;

pub use memory::InMemoryPasscodeStore;

#[async_trait]
pub trait PasscodeStore: Send + Sync {
    async fn get(&self, phone: &str) -> AppResult<Option<PasscodeRecord>>;

    /// Insert or replace the record for `phone`.
    async fn set(&self, phone: &str, record: PasscodeRecord) -> AppResult<()>;

    async fn delete(&self, phone: &str) -> AppResult<()>;

    /// Remove every record that is expired and past its issuance window.
    async fn delete_stale(&self, now: DateTime<Utc>, issuance_window: Duration) -> AppResult<usize>;

    async fn count(&self) -> AppResult<usize>;
}
