//! Bounded startup retry
//!
//! The database may come up after this service. Startup retries a fixed
//! number of times with a fixed delay, then gives up with a definite error.
//! Request handlers never retry.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use tracing::{info, warn};

/// Default number of connection attempts before startup fails
pub const DEFAULT_MAX_ATTEMPTS: u32 = 15;

/// Default pause between attempts
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Attempt budget for the startup sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first (0 is treated as 1)
    pub max_attempts: u32,
    /// Fixed delay between attempts
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            delay: DEFAULT_RETRY_DELAY,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self { max_attempts, delay }
    }

    /// Effective attempt count, never less than one.
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

/// Startup could not reach a ready state
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("could not connect to database after {attempts} attempts: {last_error}")]
    Exhausted { attempts: u32, last_error: String },
}

/// Run `attempt` until it succeeds or the policy is exhausted.
///
/// `attempt` receives the 1-based attempt index. Failed attempts are
/// logged and followed by `policy.delay`, except the last one.
pub async fn with_retry<T, E, F, Fut>(policy: &RetryPolicy, mut attempt: F) -> Result<T, StartupError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: fmt::Display,
{
    let max_attempts = policy.attempts();
    let mut last_error = String::new();

    for n in 1..=max_attempts {
        match attempt(n).await {
            Ok(value) => {
                if n > 1 {
                    info!(attempt = n, max_attempts, "connected after retry");
                }
                return Ok(value);
            }
            Err(e) => {
                warn!(
                    attempt = n,
                    max_attempts,
                    error = %e,
                    "database connection failed"
                );
                last_error = e.to_string();

                if n < max_attempts {
                    tokio::time::sleep(policy.delay).await;
                }
            }
        }
    }

    Err(StartupError::Exhausted {
        attempts: max_attempts,
        last_error,
    })
}
