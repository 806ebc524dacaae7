//! Schema migration handler

use anyhow::Result;
use colored::*;

use crate::config::Config;

/// Apply the schema, ignoring any configured skip
pub async fn handle_migrate(config: &Config) -> Result<()> {
    let config = Config {
        skip_creation: false,
        ..config.clone()
    };

    let engine = config.connect().await?;
    engine.close().await;

    println!(
        "{}",
        format!("Schema is up to date ({} database).", config.driver).green()
    );

    Ok(())
}
