//! Worker command handlers

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use rivet_core::Worker;

use crate::config::Config;

/// Worker subcommands
#[derive(Subcommand)]
pub enum WorkerCommands {
    /// List all registered workers
    List,
}

pub async fn handle_worker_command(command: WorkerCommands, config: &Config) -> Result<()> {
    match command {
        WorkerCommands::List => list_workers(config).await,
    }
}

async fn list_workers(config: &Config) -> Result<()> {
    let engine = config.connect().await?;
    let workers = engine.list_workers().await?;
    engine.close().await;

    if workers.is_empty() {
        println!("{}", "No workers registered.".yellow());
    } else {
        println!(
            "{}",
            format!("Found {} registered worker(s):", workers.len()).bold()
        );
        println!();
        for worker in workers {
            print_worker(&worker);
        }
    }

    Ok(())
}

fn print_worker(worker: &Worker) {
    let status = if worker.active {
        "active".green()
    } else {
        "inactive".red()
    };
    let routes: Vec<&str> = worker.routes.iter().map(String::as_str).collect();

    println!("  {} Worker {}", "▸".cyan(), worker.hostname.bold());
    println!("    Address:      {}", worker.address);
    println!("    Status:       {}", status);
    println!("    Routes:       {}", routes.join(", ").dimmed());
    println!("    Build Limit:  {}", worker.build_limit);
    println!(
        "    Last Seen:    {}",
        format_checked_in(worker.last_checked_in).dimmed()
    );
    println!();
}

fn format_checked_in(timestamp: i64) -> String {
    if timestamp == 0 {
        return "never".to_string();
    }
    chrono::DateTime::from_timestamp(timestamp, 0)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| timestamp.to_string())
}
