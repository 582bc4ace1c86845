//! Record server: loads config from env (and `.env`), connects to PostgreSQL and Redis,
//! ensures the `records` table exists, and serves the record routes until SIGINT/SIGTERM.
//!
//! Run from repo root: `cargo run -p record-server`

use record_service::{
    app,
    apply_migrations,
    ensure_database_exists,
    serve,
    AppState,
    PgRecordStore,
    RedisCounterCache,
    ServiceConfig,
};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("record_service=info,record_server=info,tower_http=info")),
        )
        .init();

    let config = ServiceConfig::from_env()?;

    ensure_database_exists(&config.pg_dsn).await?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.pg_max_connections)
        .connect(&config.pg_dsn)
        .await?;
    apply_migrations(&pool).await?;

    let cache = RedisCounterCache::connect(&config.redis_url, config.redis_db).await?;
    tracing::info!(db = config.redis_db, "connected to redis");

    let state = AppState::new(Arc::new(PgRecordStore::new(pool)), Arc::new(cache));
    let router = app(state, &config.http);

    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("server started on {}", listener.local_addr()?);
    serve(listener, router, config.shutdown_grace).await?;
    tracing::info!("server stopped");
    Ok(())
}
