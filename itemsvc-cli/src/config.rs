//! Command-line and environment configuration
//!
//! Every setting is a flag with an environment fallback and a default.
//! `.env` is loaded before parsing, so it feeds the same fallbacks.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use clap::Args;
use itemsvc_server::{DbConfig, RetryPolicy, ServerConfig};

/// Database connection and startup retry settings
#[derive(Args, Debug, Clone)]
pub struct DbArgs {
    /// Database host
    #[arg(long, env = "DB_HOST", default_value = "localhost")]
    pub db_host: String,

    /// Database port
    #[arg(long, env = "DB_PORT", default_value_t = 3306)]
    pub db_port: u16,

    /// Database user
    #[arg(long, env = "DB_USER", default_value = "root")]
    pub db_user: String,

    /// Database password
    #[arg(long, env = "DB_PASSWORD", default_value = "", hide_env_values = true, hide_default_value = true)]
    pub db_password: String,

    /// Database (schema) name
    #[arg(long, env = "DB_NAME", default_value = "appdb")]
    pub db_name: String,

    /// Maximum pooled connections
    #[arg(long, env = "DB_POOL_SIZE", default_value_t = 10)]
    pub pool_size: u32,

    /// Seconds a query waits for a free pooled connection
    #[arg(long, env = "DB_ACQUIRE_TIMEOUT_SECS", default_value_t = 30)]
    pub acquire_timeout_secs: u64,

    /// Connection attempts before startup gives up
    #[arg(long, env = "DB_CONNECT_RETRIES", default_value_t = 15)]
    pub connect_retries: u32,

    /// Milliseconds to wait between connection attempts
    #[arg(long, env = "DB_RETRY_DELAY_MS", default_value_t = 5000)]
    pub retry_delay_ms: u64,
}

impl DbArgs {
    pub fn db_config(&self) -> DbConfig {
        DbConfig {
            host: self.db_host.clone(),
            port: self.db_port,
            user: self.db_user.clone(),
            password: self.db_password.clone(),
            database: self.db_name.clone(),
            max_connections: self.pool_size,
            acquire_timeout: Duration::from_secs(self.acquire_timeout_secs),
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.connect_retries,
            Duration::from_millis(self.retry_delay_ms),
        )
    }
}

/// Listener settings
#[derive(Args, Debug, Clone)]
pub struct ListenArgs {
    /// Interface to bind the HTTP listener to
    #[arg(long, env = "HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to bind the HTTP listener to
    #[arg(long, short = 'p', env = "PORT", default_value_t = 5000)]
    pub port: u16,
}

impl ListenArgs {
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            bind_addr: SocketAddr::new(self.host, self.port),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        listen: ListenArgs,
        #[command(flatten)]
        db: DbArgs,
    }

    #[test]
    fn flags_map_onto_library_config() {
        let cli = TestCli::parse_from([
            "itemsvc",
            "--port",
            "8081",
            "--db-host",
            "mysql",
            "--db-password",
            "pw",
            "--pool-size",
            "4",
            "--connect-retries",
            "3",
            "--retry-delay-ms",
            "250",
        ]);

        assert_eq!(cli.listen.server_config().bind_addr.port(), 8081);

        let db = cli.db.db_config();
        assert_eq!(db.host, "mysql");
        assert_eq!(db.password, "pw");
        assert_eq!(db.max_connections, 4);

        let retry = cli.db.retry_policy();
        assert_eq!(retry.max_attempts, 3);
        assert_eq!(retry.delay, Duration::from_millis(250));
    }
}
