//! Record handlers: list, create, update, delete, count.

use crate::error::AppError;
use crate::extractors::ApiJson;
use crate::model::RecordInput;
use crate::response;
use crate::service::RecordService;
use crate::state::AppState;
use axum::extract::{Path, State};
use uuid::Uuid;

fn parse_id(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id).map_err(|e| AppError::Validation(format!("id invalid: {}", e)))
}

/// GET /records
pub async fn list(State(state): State<AppState>) -> Result<impl axum::response::IntoResponse, AppError> {
    let records = RecordService::list(&state).await?;
    Ok(response::ok(records))
}

/// POST /records
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<RecordInput>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let record = RecordService::create(&state, input).await?;
    Ok(response::created(record))
}

/// PUT /records/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(input): ApiJson<RecordInput>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let id = parse_id(&id)?;
    let record = RecordService::update(&state, id, input).await?;
    Ok(response::ok(record))
}

/// DELETE /records/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let id = parse_id(&id)?;
    RecordService::delete(&state, id).await?;
    Ok(response::message("record deleted"))
}

/// PUT/DELETE /records/count: `count` is not a record id.
pub async fn reject_count_id() -> Result<(), AppError> {
    parse_id("count").map(|_| ())
}

/// GET /records/count
pub async fn count(State(state): State<AppState>) -> Result<impl axum::response::IntoResponse, AppError> {
    let count = RecordService::count(&state).await?;
    Ok(response::ok(response::Count { count }))
}
