//! Load [`ServiceConfig`] from environment variables (after `.env`, if any, has been applied).

use crate::config::types::*;
use crate::error::ConfigError;
use std::str::FromStr;
use std::time::Duration;

impl ServiceConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`. `PG_DSN` (or `DATABASE_URL`) and `REDIS_DB` are required.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let pg_dsn = get("PG_DSN")
            .or_else(|| get("DATABASE_URL"))
            .ok_or(ConfigError::Missing("PG_DSN"))?;
        let redis_db = get("REDIS_DB").ok_or(ConfigError::Missing("REDIS_DB"))?;
        let redis_db = parse("REDIS_DB", &redis_db)?;

        let pg_max_connections = match get("PG_MAX_CONNECTIONS") {
            Some(v) => parse("PG_MAX_CONNECTIONS", &v)?,
            None => DEFAULT_MAX_CONNECTIONS,
        };
        let body_limit = match get("BODY_LIMIT_BYTES") {
            Some(v) => parse("BODY_LIMIT_BYTES", &v)?,
            None => DEFAULT_BODY_LIMIT,
        };
        let shutdown_grace = match get("SHUTDOWN_GRACE_SECS") {
            Some(v) => Duration::from_secs(parse("SHUTDOWN_GRACE_SECS", &v)?),
            None => DEFAULT_SHUTDOWN_GRACE,
        };

        Ok(ServiceConfig {
            pg_dsn,
            pg_max_connections,
            redis_url: get("REDIS_URL").unwrap_or_else(|| DEFAULT_REDIS_URL.into()),
            redis_db,
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into()),
            shutdown_grace,
            http: HttpConfig { body_limit },
        })
    }
}

fn parse<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        reason: format!("{:?}: {}", value, e),
    })
}
