//! Redis implementation of [`CounterCache`].

use super::CounterCache;
use crate::error::AppError;
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, IntoConnectionInfo};
use std::time::Duration;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(1);

#[derive(Clone)]
pub struct RedisCounterCache {
    conn: ConnectionManager,
}

impl RedisCounterCache {
    /// Connect to `url`, select database `db` and ping it. Fails when the server does not answer within one second.
    pub async fn connect(url: &str, db: i64) -> Result<Self, AppError> {
        let mut info = url.into_connection_info()?;
        info.redis.db = db;
        let client = redis::Client::open(info)?;
        let conn = tokio::time::timeout(CONNECT_TIMEOUT, ConnectionManager::new(client))
            .await
            .map_err(|_| timed_out())??;
        let cache = Self { conn };
        tokio::time::timeout(CONNECT_TIMEOUT, cache.ping())
            .await
            .map_err(|_| timed_out())??;
        Ok(cache)
    }

    /// Remove every key of the selected database.
    pub async fn flush_db(&self) -> Result<(), AppError> {
        let mut conn = self.conn.clone();
        let _: () = redis::cmd("FLUSHDB").query_async(&mut conn).await?;
        Ok(())
    }
}

fn timed_out() -> AppError {
    AppError::Cache(redis::RedisError::from((
        redis::ErrorKind::IoError,
        "timed out connecting to redis",
    )))
}

#[async_trait]
impl CounterCache for RedisCounterCache {
    async fn increment(&self, key: &str) -> Result<i64, AppError> {
        let mut conn = self.conn.clone();
        let value: i64 = conn.incr(key, 1).await?;
        Ok(value)
    }

    async fn decrement(&self, key: &str) -> Result<i64, AppError> {
        let mut conn = self.conn.clone();
        let value: i64 = conn.decr(key, 1).await?;
        Ok(value)
    }

    async fn get(&self, key: &str) -> Result<i64, AppError> {
        let mut conn = self.conn.clone();
        let value: Option<i64> = conn.get(key).await?;
        Ok(value.unwrap_or(0))
    }

    async fn ping(&self) -> Result<(), AppError> {
        let mut conn = self.conn.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }
}
