//! Database connection pool management
//!
//! Uses a sqlx MySqlPool with an explicit connection limit. The pool is
//! built once at startup by [`initialize`] and handed to the router; nothing
//! looks it up globally.

use std::fmt;
use std::time::Duration;

use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};
use sqlx::MySqlPool;

use super::retry::{with_retry, RetryPolicy, StartupError};

/// Default maximum connections for the pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Default time to wait for a free connection before failing a query.
pub const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection parameters for the items database
#[derive(Clone)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    /// Pool capacity
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 3306,
            user: "root".to_string(),
            password: String::new(),
            database: "appdb".to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: DEFAULT_ACQUIRE_TIMEOUT,
        }
    }
}

// Hand-written so the password never reaches the logs.
impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"[redacted]")
            .field("database", &self.database)
            .field("max_connections", &self.max_connections)
            .field("acquire_timeout", &self.acquire_timeout)
            .finish()
    }
}

impl DbConfig {
    /// Driver-level connect options.
    pub fn connect_options(&self) -> MySqlConnectOptions {
        let options = MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .database(&self.database);

        if self.password.is_empty() {
            options
        } else {
            options.password(&self.password)
        }
    }
}

/// Build a pool and confirm it can serve a query.
///
/// Connections are opened lazily; the liveness probe forces the first one.
/// A pool whose probe fails is closed before the error is returned.
///
/// # Errors
///
/// Returns the driver error from the probe.
pub async fn create_pool(config: &DbConfig) -> Result<MySqlPool, sqlx::Error> {
    let pool = MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect_lazy_with(config.connect_options());

    if let Err(e) = probe(&pool).await {
        pool.close().await;
        return Err(e);
    }

    Ok(pool)
}

/// Run a no-op query against the pool.
pub async fn probe(pool: &MySqlPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Connect with bounded retries. The only way to obtain a ready pool.
///
/// # Example
///
/// ```ignore
/// let pool = initialize(&DbConfig::default(), &RetryPolicy::default()).await?;
/// ```
pub async fn initialize(config: &DbConfig, policy: &RetryPolicy) -> Result<MySqlPool, StartupError> {
    tracing::info!(
        host = %config.host,
        port = config.port,
        database = %config.database,
        max_connections = config.max_connections,
        max_attempts = policy.attempts(),
        "connecting to database"
    );

    let pool = with_retry(policy, |_| create_pool(config)).await?;

    tracing::info!("database pool ready");
    Ok(pool)
}
