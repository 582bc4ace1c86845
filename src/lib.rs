//! Record service: REST CRUD over a PostgreSQL `records` table with a Redis live-record counter.

pub mod cache;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod response;
pub mod routes;
pub mod server;
pub mod service;
pub mod state;
pub mod store;

pub use cache::{CounterCache, MemoryCounterCache, RedisCounterCache};
pub use config::{HttpConfig, ServiceConfig};
pub use error::{AppError, ConfigError};
pub use migration::{apply_migrations, ensure_database_exists};
pub use model::{Record, RecordInput, RECORDS_KEY};
pub use routes::{app, common_routes_with_ready, record_routes};
pub use server::{serve, serve_with_shutdown, shutdown_signal};
pub use service::RecordService;
pub use state::AppState;
pub use store::{MemoryRecordStore, PgRecordStore, RecordStore};
