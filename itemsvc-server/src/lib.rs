//! itemsvc-server: CRUD HTTP service over a pooled MySQL `items` table
//!
//! Startup is strictly ordered: the pool must pass its liveness probe
//! (with bounded retry) before the HTTP listener is bound.

pub mod db;
pub mod error;
pub mod http;
pub mod models;

pub use error::{Error, Result};
pub use db::{DbConfig, RetryPolicy};
pub use http::{AppState, ServerConfig};

/// Everything needed to start the service
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub server: ServerConfig,
    pub db: DbConfig,
    pub retry: RetryPolicy,
}

/// Connect to the database, then serve until shutdown.
///
/// Returns [`Error::Startup`] without binding a socket if the pool never
/// becomes ready.
pub async fn serve(config: Config) -> Result<()> {
    let pool = db::initialize(&config.db, &config.retry).await?;
    http::run_server(pool, config.server).await?;
    Ok(())
}
