//! In-process [`RecordStore`] for tests and local runs without PostgreSQL.

use super::RecordStore;
use crate::error::AppError;
use crate::model::{Record, RecordInput};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
pub struct MemoryRecordStore {
    rows: RwLock<Vec<Record>>,
    unavailable: AtomicBool,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// While set, every call fails as if the database connection were gone.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.rows.read().map(|rows| rows.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check(&self) -> Result<(), AppError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::Persistence(sqlx::Error::PoolClosed));
        }
        Ok(())
    }
}

fn poisoned<T>(_: T) -> AppError {
    AppError::Persistence(sqlx::Error::Protocol("record store lock poisoned".into()))
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn create(&self, input: &RecordInput) -> Result<Record, AppError> {
        self.check()?;
        let now = Utc::now();
        let record = Record {
            id: Uuid::new_v4(),
            data: input.data.clone(),
            order_date: input.order_date,
            forward: input.forward,
            location: input.location.clone(),
            created_at: now,
            updated_at: now,
        };
        self.rows.write().map_err(poisoned)?.push(record.clone());
        Ok(record)
    }

    async fn find_all(&self) -> Result<Vec<Record>, AppError> {
        self.check()?;
        Ok(self.rows.read().map_err(poisoned)?.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Record>, AppError> {
        self.check()?;
        let rows = self.rows.read().map_err(poisoned)?;
        Ok(rows.iter().find(|r| r.id == id).cloned())
    }

    async fn update(&self, record: &mut Record) -> Result<(), AppError> {
        self.check()?;
        let mut rows = self.rows.write().map_err(poisoned)?;
        if let Some(row) = rows.iter_mut().find(|r| r.id == record.id) {
            row.data = record.data.clone();
            row.order_date = record.order_date;
            row.forward = record.forward;
            row.location = record.location.clone();
            row.updated_at = Utc::now();
            record.updated_at = row.updated_at;
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<u64, AppError> {
        self.check()?;
        let mut rows = self.rows.write().map_err(poisoned)?;
        let before = rows.len();
        rows.retain(|r| r.id != id);
        Ok((before - rows.len()) as u64)
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.check()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(data: &str) -> RecordInput {
        RecordInput {
            data: data.into(),
            ..RecordInput::default()
        }
    }

    #[tokio::test]
    async fn delete_of_missing_id_is_noop() {
        let store = MemoryRecordStore::new();
        store.create(&input("a")).await.unwrap();
        assert_eq!(store.delete_by_id(Uuid::new_v4()).await.unwrap(), 0);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn update_overwrites_and_stamps_updated_at() {
        let store = MemoryRecordStore::new();
        let created = store.create(&input("X")).await.unwrap();
        let mut record = Record::from_input(created.id, input("Y"));
        store.update(&mut record).await.unwrap();
        assert!(record.updated_at >= created.updated_at);

        let stored = store.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(stored.data, "Y");
        assert_eq!(stored.created_at, created.created_at);
    }

    #[tokio::test]
    async fn unavailable_store_fails_with_persistence_error() {
        let store = MemoryRecordStore::new();
        store.set_unavailable(true);
        assert!(matches!(store.find_all().await, Err(AppError::Persistence(_))));
    }
}
