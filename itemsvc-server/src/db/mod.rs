//! Database layer - startup pool manager and repositories
//!
//! # Design Principles
//!
//! - Pool built once at startup with bounded retry, then injected
//! - Connection pool (default 10 connections) - no Arc<Mutex<Connection>>
//! - Values are always bound as parameters

pub mod pool;
pub mod repos;
pub mod retry;

pub use pool::{create_pool, initialize, probe, DbConfig};
pub use repos::*;
pub use retry::{with_retry, RetryPolicy, StartupError};
