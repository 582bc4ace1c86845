//! Record store gateway: create, list, update and delete over the `records` table.

pub mod memory;
pub mod postgres;

pub use memory::MemoryRecordStore;
pub use postgres::PgRecordStore;

use crate::error::AppError;
use crate::model::{Record, RecordInput};
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert a new record with a freshly generated id. Returns the stored row.
    async fn create(&self, input: &RecordInput) -> Result<Record, AppError>;

    /// All records in insertion order. An empty table yields an empty vec.
    async fn find_all(&self) -> Result<Vec<Record>, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Record>, AppError>;

    /// Overwrite every payload field of the row matching `record.id` and write the new
    /// `updated_at` back into `record`. A missing row is a no-op.
    async fn update(&self, record: &mut Record) -> Result<(), AppError>;

    /// Remove the row with `id`. Returns the number of rows removed (0 when absent).
    async fn delete_by_id(&self, id: Uuid) -> Result<u64, AppError>;

    async fn ping(&self) -> Result<(), AppError>;
}
