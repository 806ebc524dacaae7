//! Repo operations

use rivet_core::Repo;

use super::{Engine, affected, found};
use crate::constants::TABLE_REPOS;
use crate::error::Result;
use crate::filter::CountQuery;
use crate::transform::{Validate, require_id};

impl Engine {
    /// Get a repo by id
    pub async fn get_repo(&self, id: i64) -> Result<Repo> {
        tracing::trace!(repo = id, "getting repo from the database");
        found("repo", id, self.store().get_repo(id).await?)
    }

    /// Get a repo by its `(org, name)` pair
    pub async fn get_repo_for_org(&self, org: &str, name: &str) -> Result<Repo> {
        tracing::trace!(org, repo = name, "getting repo from the database");
        let repo = self.store().get_repo_for_org(org, name).await?;
        found("repo", format!("{org}/{name}"), repo)
    }

    /// Store a repo, returning it with its assigned id
    pub async fn create_repo(&self, repo: &Repo) -> Result<Repo> {
        repo.validate()?;

        let id = self.store().create_repo(repo).await?;
        tracing::debug!(repo = %repo.full_name(), id, "created repo");

        Ok(Repo { id, ..repo.clone() })
    }

    /// Replace every column of an existing repo
    pub async fn update_repo(&self, repo: &Repo) -> Result<()> {
        require_id("repo", repo.id)?;
        repo.validate()?;

        let rows = self.store().update_repo(repo).await?;
        affected("repo", repo.id, rows)
    }

    /// Remove a repo by id
    pub async fn delete_repo(&self, id: i64) -> Result<()> {
        let rows = self.store().delete_repo(id).await?;
        affected("repo", id, rows)
    }

    /// Count all repos
    pub async fn count_repos(&self) -> Result<i64> {
        self.count(CountQuery::table(self.driver(), TABLE_REPOS)).await
    }
}
