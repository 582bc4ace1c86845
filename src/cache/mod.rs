//! Counter cache gateway: a named integer kept in the key-value store.
//!
//! The counter is maintained as a side effect of record writes and is not derived
//! transactionally from the `records` table, so it approximates the live row count.

pub mod memory;
pub mod redis;

pub use self::memory::MemoryCounterCache;
pub use self::redis::RedisCounterCache;

use crate::error::AppError;
use async_trait::async_trait;

#[async_trait]
pub trait CounterCache: Send + Sync {
    /// Atomically add 1, creating the counter at 0 first when absent. Returns the new value.
    async fn increment(&self, key: &str) -> Result<i64, AppError>;

    /// Atomically subtract 1, creating the counter at 0 first when absent. May go negative.
    async fn decrement(&self, key: &str) -> Result<i64, AppError>;

    /// Current value; an absent counter reads as 0.
    async fn get(&self, key: &str) -> Result<i64, AppError>;

    async fn ping(&self) -> Result<(), AppError>;
}
