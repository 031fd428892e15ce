//! Database readiness probe
//!
//! Runs only the startup connection sequence and exits. Useful as a
//! container readiness check before starting the server.

use anyhow::{Context, Result};
use clap::Parser;

use crate::config::DbArgs;

/// Arguments for the probe command
#[derive(Parser, Debug)]
pub struct ProbeArgs {
    #[command(flatten)]
    pub db: DbArgs,
}

pub async fn run_probe(args: ProbeArgs) -> Result<()> {
    let pool = itemsvc_server::db::initialize(&args.db.db_config(), &args.db.retry_policy())
        .await
        .context("database is not ready")?;

    pool.close().await;
    println!("database ready");
    Ok(())
}
