//! Process configuration types.

use std::time::Duration;

pub const DEFAULT_REDIS_URL: &str = "redis://localhost:6379";
pub const DEFAULT_BIND_ADDR: &str = "localhost:4000";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_SHUTDOWN_GRACE: Duration = Duration::from_secs(5);
pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

#[derive(Clone, Debug)]
pub struct ServiceConfig {
    /// PostgreSQL connection string.
    pub pg_dsn: String,
    pub pg_max_connections: u32,
    pub redis_url: String,
    /// Redis logical database index.
    pub redis_db: i64,
    pub bind_addr: String,
    /// How long in-flight requests may run after a shutdown signal.
    pub shutdown_grace: Duration,
    pub http: HttpConfig,
}

/// Transport limits applied to every route. There is no per-request timeout: a handler
/// always runs its store and cache calls to completion.
#[derive(Clone, Debug)]
pub struct HttpConfig {
    pub body_limit: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }
}
