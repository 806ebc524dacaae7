//! Count command handlers

use anyhow::{Result, bail};
use clap::Subcommand;
use colored::*;
use rivet_database::BuildFilter;

use crate::config::Config;

/// Count subcommands
#[derive(Subcommand)]
pub enum CountCommands {
    /// Count builds, optionally scoped to an org or repo
    Builds {
        /// Only count builds of repos owned by this org
        #[arg(long, conflicts_with = "repo_id")]
        org: Option<String>,

        /// Only count builds of the repo with this id
        #[arg(long)]
        repo_id: Option<i64>,

        /// Exact-match filter as key=value (status, event, branch, repo_id, since, before)
        #[arg(long = "filter", value_name = "KEY=VALUE")]
        filters: Vec<String>,
    },
    /// Count registered workers
    Workers,
}

pub async fn handle_count_command(command: CountCommands, config: &Config) -> Result<()> {
    match command {
        CountCommands::Builds {
            org,
            repo_id,
            filters,
        } => {
            let filter = parse_filters(&filters)?;
            count_builds(config, org.as_deref(), repo_id, &filter).await
        }
        CountCommands::Workers => count_workers(config).await,
    }
}

/// Split `key=value` arguments into a validated build filter
fn parse_filters(raw: &[String]) -> Result<BuildFilter> {
    let mut pairs = Vec::with_capacity(raw.len());
    for arg in raw {
        let Some((key, value)) = arg.split_once('=') else {
            bail!("filter '{arg}' must be in key=value form");
        };
        pairs.push((key.trim(), value.trim()));
    }

    Ok(BuildFilter::from_pairs(pairs)?)
}

async fn count_builds(
    config: &Config,
    org: Option<&str>,
    repo_id: Option<i64>,
    filter: &BuildFilter,
) -> Result<()> {
    let engine = config.connect().await?;

    let (scope, count) = match (org, repo_id) {
        (Some(org), _) => (
            format!("org {org}"),
            engine.count_builds_for_org(org, filter).await?,
        ),
        (None, Some(repo_id)) => {
            let repo = engine.get_repo(repo_id).await?;
            (
                format!("repo {}", repo.full_name()),
                engine.count_builds_for_repo(&repo, filter).await?,
            )
        }
        (None, None) => ("all repos".to_string(), engine.count_builds(filter).await?),
    };

    engine.close().await;

    println!("{} build(s) across {}", count.to_string().bold(), scope);
    Ok(())
}

async fn count_workers(config: &Config) -> Result<()> {
    let engine = config.connect().await?;
    let count = engine.count_workers().await?;
    engine.close().await;

    println!("{} worker(s) registered", count.to_string().bold());
    Ok(())
}
