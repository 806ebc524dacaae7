//! Build operations

use rivet_core::{Build, BuildStatus, Repo};

use super::{Engine, affected, found};
use crate::error::Result;
use crate::filter::{BuildFilter, BuildScope, CountQuery};
use crate::transform::{Validate, require_id};

impl Engine {
    /// Get a build by id
    pub async fn get_build(&self, id: i64) -> Result<Build> {
        tracing::trace!(build = id, "getting build from the database");
        found("build", id, self.store().get_build(id).await?)
    }

    /// Get a build by its per-repo number
    pub async fn get_build_for_repo(&self, repo_id: i64, number: i64) -> Result<Build> {
        tracing::trace!(repo = repo_id, number, "getting build from the database");
        let build = self.store().get_build_for_repo(repo_id, number).await?;
        found("build", format!("{repo_id}#{number}"), build)
    }

    /// List builds of a repo, newest number first
    pub async fn list_builds_for_repo(&self, repo_id: i64) -> Result<Vec<Build>> {
        self.store().list_builds_for_repo(repo_id).await
    }

    /// Store a build, returning it with its assigned id
    pub async fn create_build(&self, build: &Build) -> Result<Build> {
        build.validate()?;

        let id = self.store().create_build(build).await?;
        tracing::debug!(repo = build.repo_id, number = build.number, id, "created build");

        Ok(Build { id, ..build.clone() })
    }

    /// Replace every column of an existing build
    pub async fn update_build(&self, build: &Build) -> Result<()> {
        require_id("build", build.id)?;
        build.validate()?;

        let rows = self.store().update_build(build).await?;
        affected("build", build.id, rows)
    }

    /// Remove a build by id
    pub async fn delete_build(&self, id: i64) -> Result<()> {
        let rows = self.store().delete_build(id).await?;
        affected("build", id, rows)
    }

    /// Count builds matching `filter`
    pub async fn count_builds(&self, filter: &BuildFilter) -> Result<i64> {
        let query = CountQuery::builds(self.driver(), BuildScope::All, filter);
        self.count(query).await
    }

    /// Count builds in `status` across every repo
    pub async fn count_builds_by_status(&self, status: BuildStatus) -> Result<i64> {
        tracing::trace!(%status, "getting count of builds by status");
        self.count_builds(&BuildFilter::new().with_status(status))
            .await
    }

    /// Count builds of every repo owned by `org` that match `filter`
    pub async fn count_builds_for_org(&self, org: &str, filter: &BuildFilter) -> Result<i64> {
        tracing::trace!(org, "getting count of builds for org");
        let query = CountQuery::builds(self.driver(), BuildScope::Org(org), filter);
        self.count(query).await
    }

    /// Count builds of `repo` that match `filter`
    pub async fn count_builds_for_repo(&self, repo: &Repo, filter: &BuildFilter) -> Result<i64> {
        tracing::trace!(repo = %repo.full_name(), "getting count of builds for repo");
        let query = CountQuery::builds(self.driver(), BuildScope::Repo(repo.id), filter);
        self.count(query).await
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::Engine;
    use crate::engine::tests::{seed_repo, sqlite_engine};
    use crate::error::DatabaseError;
    use crate::filter::BuildFilter;
    use rivet_core::{Build, BuildStatus, Repo};

    async fn seed_builds(engine: &Engine, repo: &Repo, statuses: &[BuildStatus]) {
        let offset = engine.list_builds_for_repo(repo.id).await.unwrap().len() as i64;
        for (i, status) in statuses.iter().enumerate() {
            let mut build = Build::new(repo.id, offset + i as i64 + 1, *status);
            build.event = "push".to_string();
            build.branch = "main".to_string();
            engine.create_build(&build).await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_count_builds_by_status() {
        let engine = sqlite_engine().await;
        let repo = seed_repo(&engine, "github", "octocat").await;
        use BuildStatus::*;
        seed_builds(&engine, &repo, &[Success, Success, Success, Failed, Failed, Running]).await;

        let failed = BuildFilter::new().with_status(Failed);
        assert_eq!(engine.count_builds(&failed).await.unwrap(), 2);
        assert_eq!(engine.count_builds(&BuildFilter::new()).await.unwrap(), 6);
        assert_eq!(engine.count_builds_by_status(Pending).await.unwrap(), 0);
        assert_eq!(engine.count_builds_by_status(Success).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_count_builds_for_org() {
        let engine = sqlite_engine().await;
        let a1 = seed_repo(&engine, "a", "one").await;
        let a2 = seed_repo(&engine, "a", "two").await;
        let b1 = seed_repo(&engine, "b", "one").await;
        use BuildStatus::*;
        seed_builds(&engine, &a1, &[Success, Failed]).await;
        seed_builds(&engine, &a2, &[Success, Success, Running]).await;
        seed_builds(&engine, &b1, &[Success]).await;

        let all = BuildFilter::new();
        assert_eq!(engine.count_builds_for_org("a", &all).await.unwrap(), 5);
        assert_eq!(engine.count_builds_for_org("b", &all).await.unwrap(), 1);
        assert_eq!(engine.count_builds_for_org("c", &all).await.unwrap(), 0);

        let success = BuildFilter::new().with_status(Success);
        assert_eq!(engine.count_builds_for_org("a", &success).await.unwrap(), 3);
        assert_eq!(engine.count_builds_for_repo(&a2, &success).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_count_builds_from_caller_pairs() {
        let engine = sqlite_engine().await;
        let repo = seed_repo(&engine, "github", "octocat").await;
        seed_builds(&engine, &repo, &[BuildStatus::Success, BuildStatus::Killed]).await;

        let filter = BuildFilter::from_pairs([("status", "killed"), ("branch", "main")]).unwrap();
        assert_eq!(engine.count_builds(&filter).await.unwrap(), 1);

        let err = BuildFilter::from_pairs([("org", "github")]).unwrap_err();
        assert!(matches!(err, DatabaseError::UnknownFilter(_)));
    }

    #[tokio::test]
    async fn test_count_builds_created_between() {
        let engine = sqlite_engine().await;
        let repo = seed_repo(&engine, "github", "octocat").await;
        for (number, created) in [(1, 100), (2, 200), (3, 300)] {
            let mut build = Build::new(repo.id, number, BuildStatus::Success);
            build.created = created;
            engine.create_build(&build).await.unwrap();
        }

        let window = BuildFilter::new().created_between(100, 300);
        assert_eq!(engine.count_builds(&window).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_build_requires_existing_repo() {
        let engine = sqlite_engine().await;
        let err = engine
            .create_build(&Build::new(42, 1, BuildStatus::Pending))
            .await
            .unwrap_err();
        assert!(err.is_constraint_violation(), "got: {err}");
    }

    #[tokio::test]
    async fn test_update_build_replaces_every_column() {
        let engine = sqlite_engine().await;
        let repo = seed_repo(&engine, "github", "octocat").await;
        let mut build = engine
            .create_build(&Build::new(repo.id, 1, BuildStatus::Pending))
            .await
            .unwrap();

        build.status = BuildStatus::Running;
        build.started = 1_700_000_000;
        engine.update_build(&build).await.unwrap();

        assert_eq!(engine.get_build_for_repo(repo.id, 1).await.unwrap(), build);
    }

    #[tokio::test]
    async fn test_update_missing_build_is_not_found() {
        let engine = sqlite_engine().await;
        let repo = seed_repo(&engine, "github", "octocat").await;
        let mut build = Build::new(repo.id, 1, BuildStatus::Pending);
        build.id = 99;

        assert!(engine.update_build(&build).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_update_without_id_is_a_validation_error() {
        let engine = sqlite_engine().await;
        let build = Build::new(1, 1, BuildStatus::Pending);
        assert!(engine.update_build(&build).await.unwrap_err().is_validation());
    }
}
