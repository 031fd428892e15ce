//! itemsvc CLI - CRUD HTTP service over a MySQL `items` table
//!
//! - `serve`: connect to the database (bounded retry), then serve HTTP
//! - `probe`: run only the connection sequence, for readiness checks

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "itemsvc",
    author,
    version,
    about = "CRUD HTTP service for the items table",
    long_about = "Serves list/create/update/delete for a single MySQL table. The HTTP \
                  listener only opens once the database pool has answered a liveness probe."
)]
struct Cli {
    /// Debug logging (RUST_LOG overrides)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Connect to the database, then run the HTTP API
    Serve(commands::serve::ServeArgs),
    /// Check that the database accepts connections, then exit
    Probe(commands::probe::ProbeArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env feeds the env fallbacks of the flags below
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::Probe(args) => commands::run_probe(args).await?,
    }
    Ok(())
}
