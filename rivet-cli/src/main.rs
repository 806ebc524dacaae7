//! Rivet database CLI
//!
//! Administrative access to the Rivet storage engine: schema creation and
//! aggregate counts.

mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use rivet_database::{Driver, config::DEFAULT_COMPRESSION_LEVEL};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "rivet-db")]
#[command(about = "Rivet CI/CD database administration", long_about = None)]
struct Cli {
    /// Database driver (postgres or sqlite)
    #[arg(long, env = "RIVET_DATABASE_DRIVER", default_value = "sqlite")]
    driver: Driver,

    /// Database connection address
    #[arg(long, env = "RIVET_DATABASE_ADDR", default_value = "sqlite://rivet.db")]
    addr: String,

    /// zstd level applied to pipeline payloads
    #[arg(long, env = "RIVET_DATABASE_COMPRESSION_LEVEL", default_value_t = DEFAULT_COMPRESSION_LEVEL)]
    compression_level: i32,

    /// Skip creating tables and indexes on connect
    #[arg(long, env = "RIVET_DATABASE_SKIP_CREATION")]
    skip_creation: bool,

    /// Maximum number of pooled connections
    #[arg(long, env = "RIVET_DATABASE_MAX_CONNECTIONS", default_value_t = 10)]
    max_connections: u32,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rivet_database=info,rivet_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config {
        driver: cli.driver,
        address: cli.addr,
        compression_level: cli.compression_level,
        skip_creation: cli.skip_creation,
        max_connections: cli.max_connections,
    };

    handle_command(cli.command, &config).await
}
