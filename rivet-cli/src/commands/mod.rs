//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod count;
mod migrate;
mod worker;

pub use count::CountCommands;
pub use worker::WorkerCommands;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Create tables and indexes if they do not exist
    Migrate,
    /// Aggregate counts
    Count {
        #[command(subcommand)]
        command: CountCommands,
    },
    /// Worker registrations
    Worker {
        #[command(subcommand)]
        command: WorkerCommands,
    },
}

/// Route the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Migrate => migrate::handle_migrate(config).await,
        Commands::Count { command } => count::handle_count_command(command, config).await,
        Commands::Worker { command } => worker::handle_worker_command(command, config).await,
    }
}
