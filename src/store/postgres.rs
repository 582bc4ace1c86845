//! PostgreSQL implementation of [`RecordStore`].

use super::RecordStore;
use crate::error::AppError;
use crate::model::{Record, RecordInput};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

const RECORD_COLUMNS: &str = "id, data, order_date, forward, location, created_at, updated_at";

#[derive(Clone)]
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn create(&self, input: &RecordInput) -> Result<Record, AppError> {
        let sql = format!(
            "INSERT INTO records (id, data, order_date, forward, location) VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            RECORD_COLUMNS
        );
        let record: Record = sqlx::query_as(&sql)
            .bind(Uuid::new_v4())
            .bind(&input.data)
            .bind(input.order_date)
            .bind(input.forward)
            .bind(&input.location)
            .fetch_one(&self.pool)
            .await?;
        Ok(record)
    }

    async fn find_all(&self) -> Result<Vec<Record>, AppError> {
        let sql = format!("SELECT {} FROM records ORDER BY created_at, id", RECORD_COLUMNS);
        let rows: Vec<Record> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Record>, AppError> {
        let sql = format!("SELECT {} FROM records WHERE id = $1", RECORD_COLUMNS);
        let row: Option<Record> = sqlx::query_as(&sql).bind(id).fetch_optional(&self.pool).await?;
        Ok(row)
    }

    async fn update(&self, record: &mut Record) -> Result<(), AppError> {
        let row: Option<(DateTime<Utc>,)> = sqlx::query_as(
            r#"
            UPDATE records
            SET data = $2, order_date = $3, forward = $4, location = $5, updated_at = clock_timestamp()
            WHERE id = $1
            RETURNING updated_at
            "#,
        )
        .bind(record.id)
        .bind(&record.data)
        .bind(record.order_date)
        .bind(record.forward)
        .bind(&record.location)
        .fetch_optional(&self.pool)
        .await?;
        match row {
            Some((updated_at,)) => record.updated_at = updated_at,
            None => tracing::debug!(id = %record.id, "update matched no record"),
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM records WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
