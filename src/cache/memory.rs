//! In-process [`CounterCache`] for tests and local runs without Redis.

use super::CounterCache;
use crate::error::AppError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

#[derive(Default)]
pub struct MemoryCounterCache {
    counters: Mutex<HashMap<String, i64>>,
    unavailable: AtomicBool,
}

impl MemoryCounterCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// While set, every call fails as if the cache server were unreachable.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn add(&self, key: &str, delta: i64) -> Result<i64, AppError> {
        self.check()?;
        let mut counters = self.counters.lock().map_err(|_| unavailable())?;
        let value = counters.entry(key.to_string()).or_insert(0);
        *value += delta;
        Ok(*value)
    }

    fn check(&self) -> Result<(), AppError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(())
    }
}

fn unavailable() -> AppError {
    AppError::Cache(redis::RedisError::from((
        redis::ErrorKind::IoError,
        "counter cache unavailable",
    )))
}

#[async_trait]
impl CounterCache for MemoryCounterCache {
    async fn increment(&self, key: &str) -> Result<i64, AppError> {
        self.add(key, 1)
    }

    async fn decrement(&self, key: &str) -> Result<i64, AppError> {
        self.add(key, -1)
    }

    async fn get(&self, key: &str) -> Result<i64, AppError> {
        self.check()?;
        let counters = self.counters.lock().map_err(|_| unavailable())?;
        Ok(counters.get(key).copied().unwrap_or(0))
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.check()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn decrement_without_increment_goes_negative() {
        let cache = MemoryCounterCache::new();
        assert_eq!(cache.decrement("records").await.unwrap(), -1);
        assert_eq!(cache.decrement("records").await.unwrap(), -2);
        assert_eq!(cache.increment("records").await.unwrap(), -1);
    }

    #[tokio::test]
    async fn absent_counter_reads_zero() {
        let cache = MemoryCounterCache::new();
        assert_eq!(cache.get("records").await.unwrap(), 0);
    }
}
