//! Database bootstrap: create the target database if needed and the `records` table.

use crate::error::{AppError, ConfigError};
use sqlx::postgres::PgConnectOptions;
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

const RECORDS_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS records (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        data TEXT NOT NULL DEFAULT '',
        order_date TIMESTAMPTZ NOT NULL,
        forward BOOLEAN NOT NULL DEFAULT FALSE,
        location TEXT NOT NULL DEFAULT '',
        created_at TIMESTAMPTZ NOT NULL DEFAULT clock_timestamp(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT clock_timestamp()
    )
"#;

const RECORDS_ORDER_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS records_created_at_idx ON records (created_at, id)";

/// Create the `records` table and its ordering index. Idempotent.
pub async fn apply_migrations(pool: &PgPool) -> Result<(), AppError> {
    sqlx::query(RECORDS_DDL).execute(pool).await?;
    sqlx::query(RECORDS_ORDER_INDEX).execute(pool).await?;
    tracing::info!("records schema ready");
    Ok(())
}

/// Create the database named in `database_url` when it does not exist, via the `postgres` admin database.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let Some((admin, db_name)) = admin_target(database_url)? else {
        return Ok(());
    };
    let mut conn: sqlx::PgConnection = admin.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
        tracing::info!(database = %db_name, "created database");
    }
    Ok(())
}

/// Admin connection options and target database name, or `None` when the DSN names no
/// database other than `postgres`.
fn admin_target(database_url: &str) -> Result<Option<(PgConnectOptions, String)>, ConfigError> {
    let opts = PgConnectOptions::from_str(database_url).map_err(|e| ConfigError::Invalid {
        key: "PG_DSN",
        reason: e.to_string(),
    })?;
    let db_name = match opts.get_database() {
        Some(name) if !name.is_empty() && name != "postgres" => name.to_string(),
        _ => return Ok(None),
    };
    Ok(Some((opts.database("postgres"), db_name)))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_target_points_at_postgres_database() {
        let (admin, name) = admin_target("postgres://u:p@localhost:5432/records?sslmode=disable")
            .unwrap()
            .unwrap();
        assert_eq!(name, "records");
        assert_eq!(admin.get_database(), Some("postgres"));
        assert_eq!(admin.get_host(), "localhost");
        assert_eq!(admin.get_port(), 5432);
    }

    #[test]
    fn dsn_without_database_path_is_accepted() {
        assert!(admin_target("postgres://localhost").is_ok());
        assert!(admin_target("postgres://localhost/postgres").unwrap().is_none());
    }

    #[test]
    fn malformed_dsn_is_invalid_config() {
        let err = admin_target("not a dsn").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "PG_DSN", .. }));
    }

    #[test]
    fn identifiers_are_quoted() {
        assert_eq!(quote_ident(r#"we"ird"#), r#""we""ird""#);
    }
}
