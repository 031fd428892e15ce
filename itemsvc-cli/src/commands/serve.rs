//! HTTP server command
//!
//! Runs the full lifecycle: database pool with bounded retry, then the
//! HTTP listener, then graceful shutdown.

use anyhow::{Context, Result};
use clap::Parser;

use crate::config::{DbArgs, ListenArgs};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    #[command(flatten)]
    pub listen: ListenArgs,

    #[command(flatten)]
    pub db: DbArgs,
}

/// Run the HTTP server (blocks until shutdown)
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = itemsvc_server::Config {
        server: args.listen.server_config(),
        db: args.db.db_config(),
        retry: args.db.retry_policy(),
    };

    tracing::info!(addr = %config.server.bind_addr, "Starting itemsvc");

    itemsvc_server::serve(config)
        .await
        .context("itemsvc stopped")?;

    Ok(())
}
