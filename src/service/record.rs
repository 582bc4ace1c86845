//! Record operations: one store call, plus one counter call for create and delete.
//!
//! Writes go to the store first. The counter is touched only after the store call
//! succeeds, and a failed counter call is reported without undoing the store write.
//! Under cache failures the counter therefore drifts from the real row count; nothing
//! reconciles it.

use crate::error::AppError;
use crate::model::{Record, RecordInput, RECORDS_KEY};
use crate::state::AppState;
use uuid::Uuid;

pub struct RecordService;

#[derive(Clone, Copy, Debug)]
enum CounterOp {
    Increment,
    Decrement,
}

impl RecordService {
    pub async fn list(state: &AppState) -> Result<Vec<Record>, AppError> {
        state.store.find_all().await
    }

    /// Persist a new record, then bump the live-record counter.
    pub async fn create(state: &AppState, input: RecordInput) -> Result<Record, AppError> {
        let record = state.store.create(&input).await?;
        tracing::info!(id = %record.id, "record created");
        Self::adjust_counter(state, CounterOp::Increment, record.id).await?;
        Ok(record)
    }

    /// Overwrite the record with `id` from `input`. Returns the record as built from the
    /// input, with the store-assigned `updated_at` when a row matched.
    pub async fn update(state: &AppState, id: Uuid, input: RecordInput) -> Result<Record, AppError> {
        let mut record = Record::from_input(id, input);
        state.store.update(&mut record).await?;
        tracing::info!(id = %id, "record updated");
        Ok(record)
    }

    /// Remove the record, then decrement the counter. The counter is decremented even
    /// when no row matched.
    pub async fn delete(state: &AppState, id: Uuid) -> Result<(), AppError> {
        let removed = state.store.delete_by_id(id).await?;
        tracing::info!(id = %id, removed, "record deleted");
        Self::adjust_counter(state, CounterOp::Decrement, id).await?;
        Ok(())
    }

    /// Approximate number of live records, read from the counter.
    pub async fn count(state: &AppState) -> Result<i64, AppError> {
        state.cache.get(RECORDS_KEY).await
    }

    async fn adjust_counter(state: &AppState, op: CounterOp, id: Uuid) -> Result<(), AppError> {
        let result = match op {
            CounterOp::Increment => state.cache.increment(RECORDS_KEY).await,
            CounterOp::Decrement => state.cache.decrement(RECORDS_KEY).await,
        };
        match result {
            Ok(value) => {
                tracing::debug!(?op, value, "record counter adjusted");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(?op, id = %id, error = %e, "record change persisted but counter update failed");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CounterCache, MemoryCounterCache};
    use crate::store::{MemoryRecordStore, RecordStore};
    use std::sync::Arc;

    fn state() -> (AppState, Arc<MemoryRecordStore>, Arc<MemoryCounterCache>) {
        let store = Arc::new(MemoryRecordStore::new());
        let cache = Arc::new(MemoryCounterCache::new());
        (AppState::new(store.clone(), cache.clone()), store, cache)
    }

    #[tokio::test]
    async fn create_then_delete_keeps_counter_in_step() {
        let (state, store, cache) = state();
        let record = RecordService::create(&state, RecordInput::default()).await.unwrap();
        assert_eq!(cache.get(RECORDS_KEY).await.unwrap(), 1);
        RecordService::delete(&state, record.id).await.unwrap();
        assert_eq!(cache.get(RECORDS_KEY).await.unwrap(), 0);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn failed_store_write_skips_counter() {
        let (state, store, cache) = state();
        store.set_unavailable(true);
        let err = RecordService::create(&state, RecordInput::default()).await.unwrap_err();
        assert!(matches!(err, AppError::Persistence(_)));
        assert_eq!(cache.get(RECORDS_KEY).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn failed_counter_write_keeps_store_write() {
        let (state, store, cache) = state();
        cache.set_unavailable(true);
        let err = RecordService::create(&state, RecordInput::default()).await.unwrap_err();
        assert!(matches!(err, AppError::Cache(_)));
        assert_eq!(store.len(), 1);

        cache.set_unavailable(false);
        assert_eq!(cache.get(RECORDS_KEY).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn update_returns_record_built_from_input() {
        let (state, store, _) = state();
        let created = store.create(&RecordInput { data: "X".into(), ..RecordInput::default() }).await.unwrap();
        let input = RecordInput { data: "Y".into(), ..RecordInput::default() };
        let updated = RecordService::update(&state, created.id, input).await.unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.data, "Y");
        assert_eq!(store.find_by_id(created.id).await.unwrap().unwrap().data, "Y");
    }
}
