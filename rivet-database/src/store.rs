//! Store trait definition.
//!
//! [`Store`] is the capability contract every dialect adapter implements.
//! Adapters only translate records to backend statements: validation,
//! compression and not-found handling live in the [`Engine`](crate::Engine).

use async_trait::async_trait;
use rivet_core::{Build, Log, Pipeline, Repo, Worker};

use crate::config::Driver;
use crate::error::Result;
use crate::filter::CountQuery;
use crate::schema::Schema;

/// Storage contract implemented once per backend.
///
/// `get_*` return `Ok(None)` when no row matches, `create_*` return the
/// generated id, and `update_*` / `delete_*` return the number of affected
/// rows.
#[async_trait]
pub trait Store: Send + Sync {
    fn driver(&self) -> Driver;

    /// DDL for this dialect
    fn schema(&self) -> &'static Schema;

    async fn execute_ddl(&self, ddl: &str) -> std::result::Result<(), sqlx::Error>;

    async fn count(&self, query: &CountQuery) -> Result<i64>;

    async fn close(&self);

    async fn get_repo(&self, id: i64) -> Result<Option<Repo>>;
    async fn get_repo_for_org(&self, org: &str, name: &str) -> Result<Option<Repo>>;
    async fn create_repo(&self, repo: &Repo) -> Result<i64>;
    async fn update_repo(&self, repo: &Repo) -> Result<u64>;
    async fn delete_repo(&self, id: i64) -> Result<u64>;

    async fn get_build(&self, id: i64) -> Result<Option<Build>>;
    async fn get_build_for_repo(&self, repo_id: i64, number: i64) -> Result<Option<Build>>;
    async fn list_builds_for_repo(&self, repo_id: i64) -> Result<Vec<Build>>;
    async fn create_build(&self, build: &Build) -> Result<i64>;
    async fn update_build(&self, build: &Build) -> Result<u64>;
    async fn delete_build(&self, id: i64) -> Result<u64>;

    async fn get_pipeline(&self, id: i64) -> Result<Option<Pipeline>>;
    async fn get_pipeline_for_repo(&self, repo_id: i64, commit: &str) -> Result<Option<Pipeline>>;
    async fn create_pipeline(&self, pipeline: &Pipeline) -> Result<i64>;
    async fn update_pipeline(&self, pipeline: &Pipeline) -> Result<u64>;
    async fn delete_pipeline(&self, id: i64) -> Result<u64>;

    async fn get_worker(&self, id: i64) -> Result<Option<Worker>>;
    async fn get_worker_by_hostname(&self, hostname: &str) -> Result<Option<Worker>>;
    async fn get_worker_by_address(&self, address: &str) -> Result<Option<Worker>>;
    async fn list_workers(&self) -> Result<Vec<Worker>>;
    async fn create_worker(&self, worker: &Worker) -> Result<i64>;
    async fn update_worker(&self, worker: &Worker) -> Result<u64>;
    async fn delete_worker(&self, id: i64) -> Result<u64>;

    async fn get_log(&self, id: i64) -> Result<Option<Log>>;
    async fn get_log_for_step(&self, step_id: i64) -> Result<Option<Log>>;
    async fn get_log_for_service(&self, service_id: i64) -> Result<Option<Log>>;
    async fn create_log(&self, log: &Log) -> Result<i64>;
    async fn update_log(&self, log: &Log) -> Result<u64>;
    async fn delete_log(&self, id: i64) -> Result<u64>;
}

/// Implement [`Store`] for an adapter struct holding a `pool` of `$db`.
///
/// The dialect supplies its statement text through the `$dml` module;
/// binding order, row decoding and result handling are shared.
macro_rules! impl_store {
    ($store:ident, $db:ty, $driver:expr, $schema:expr, $dml:ident) => {
        #[async_trait::async_trait]
        impl $crate::store::Store for $store {
            fn driver(&self) -> $crate::config::Driver {
                $driver
            }

            fn schema(&self) -> &'static $crate::schema::Schema {
                &$schema
            }

            async fn execute_ddl(&self, ddl: &str) -> ::std::result::Result<(), sqlx::Error> {
                sqlx::query(ddl).execute(&self.pool).await.map(|_| ())
            }

            async fn count(
                &self,
                query: &$crate::filter::CountQuery,
            ) -> $crate::error::Result<i64> {
                let mut statement = sqlx::query_scalar::<$db, i64>(query.sql());
                for value in query.binds() {
                    statement = match value {
                        $crate::filter::BindValue::Text(text) => statement.bind(text.as_str()),
                        $crate::filter::BindValue::Int(int) => statement.bind(*int),
                    };
                }

                Ok(statement.fetch_one(&self.pool).await?)
            }

            async fn close(&self) {
                self.pool.close().await;
            }

            // =================================================================
            // Repos
            // =================================================================

            async fn get_repo(&self, id: i64) -> $crate::error::Result<Option<rivet_core::Repo>> {
                let row = sqlx::query_as::<$db, $crate::rows::RepoRow>($dml::SELECT_REPO)
                    .bind(id)
                    .fetch_optional(&self.pool)
                    .await?;

                Ok(row.map(Into::into))
            }

            async fn get_repo_for_org(
                &self,
                org: &str,
                name: &str,
            ) -> $crate::error::Result<Option<rivet_core::Repo>> {
                let row = sqlx::query_as::<$db, $crate::rows::RepoRow>($dml::SELECT_REPO_FOR_ORG)
                    .bind(org)
                    .bind(name)
                    .fetch_optional(&self.pool)
                    .await?;

                Ok(row.map(Into::into))
            }

            async fn create_repo(&self, repo: &rivet_core::Repo) -> $crate::error::Result<i64> {
                let id = sqlx::query_scalar::<$db, i64>($dml::INSERT_REPO)
                    .bind(repo.org.as_str())
                    .bind(repo.name.as_str())
                    .bind(repo.active)
                    .fetch_one(&self.pool)
                    .await?;

                Ok(id)
            }

            async fn update_repo(&self, repo: &rivet_core::Repo) -> $crate::error::Result<u64> {
                let result = sqlx::query($dml::UPDATE_REPO)
                    .bind(repo.org.as_str())
                    .bind(repo.name.as_str())
                    .bind(repo.active)
                    .bind(repo.id)
                    .execute(&self.pool)
                    .await?;

                Ok(result.rows_affected())
            }

            async fn delete_repo(&self, id: i64) -> $crate::error::Result<u64> {
                let result = sqlx::query($dml::DELETE_REPO)
                    .bind(id)
                    .execute(&self.pool)
                    .await?;

                Ok(result.rows_affected())
            }

            // =================================================================
            // Builds
            // =================================================================

            async fn get_build(&self, id: i64) -> $crate::error::Result<Option<rivet_core::Build>> {
                let row = sqlx::query_as::<$db, $crate::rows::BuildRow>($dml::SELECT_BUILD)
                    .bind(id)
                    .fetch_optional(&self.pool)
                    .await?;

                row.map(TryInto::try_into).transpose()
            }

            async fn get_build_for_repo(
                &self,
                repo_id: i64,
                number: i64,
            ) -> $crate::error::Result<Option<rivet_core::Build>> {
                let row = sqlx::query_as::<$db, $crate::rows::BuildRow>($dml::SELECT_BUILD_FOR_REPO)
                    .bind(repo_id)
                    .bind(number)
                    .fetch_optional(&self.pool)
                    .await?;

                row.map(TryInto::try_into).transpose()
            }

            async fn list_builds_for_repo(
                &self,
                repo_id: i64,
            ) -> $crate::error::Result<Vec<rivet_core::Build>> {
                let rows = sqlx::query_as::<$db, $crate::rows::BuildRow>($dml::LIST_BUILDS_FOR_REPO)
                    .bind(repo_id)
                    .fetch_all(&self.pool)
                    .await?;

                rows.into_iter().map(TryInto::try_into).collect()
            }

            async fn create_build(&self, build: &rivet_core::Build) -> $crate::error::Result<i64> {
                let id = sqlx::query_scalar::<$db, i64>($dml::INSERT_BUILD)
                    .bind(build.repo_id)
                    .bind(build.number)
                    .bind(build.status.as_str())
                    .bind(build.event.as_str())
                    .bind(build.branch.as_str())
                    .bind(build.created)
                    .bind(build.started)
                    .bind(build.finished)
                    .fetch_one(&self.pool)
                    .await?;

                Ok(id)
            }

            async fn update_build(&self, build: &rivet_core::Build) -> $crate::error::Result<u64> {
                let result = sqlx::query($dml::UPDATE_BUILD)
                    .bind(build.repo_id)
                    .bind(build.number)
                    .bind(build.status.as_str())
                    .bind(build.event.as_str())
                    .bind(build.branch.as_str())
                    .bind(build.created)
                    .bind(build.started)
                    .bind(build.finished)
                    .bind(build.id)
                    .execute(&self.pool)
                    .await?;

                Ok(result.rows_affected())
            }

            async fn delete_build(&self, id: i64) -> $crate::error::Result<u64> {
                let result = sqlx::query($dml::DELETE_BUILD)
                    .bind(id)
                    .execute(&self.pool)
                    .await?;

                Ok(result.rows_affected())
            }

            // =================================================================
            // Pipelines
            // =================================================================

            async fn get_pipeline(
                &self,
                id: i64,
            ) -> $crate::error::Result<Option<rivet_core::Pipeline>> {
                let row = sqlx::query_as::<$db, $crate::rows::PipelineRow>($dml::SELECT_PIPELINE)
                    .bind(id)
                    .fetch_optional(&self.pool)
                    .await?;

                Ok(row.map(Into::into))
            }

            async fn get_pipeline_for_repo(
                &self,
                repo_id: i64,
                commit: &str,
            ) -> $crate::error::Result<Option<rivet_core::Pipeline>> {
                let row =
                    sqlx::query_as::<$db, $crate::rows::PipelineRow>($dml::SELECT_PIPELINE_FOR_REPO)
                        .bind(repo_id)
                        .bind(commit)
                        .fetch_optional(&self.pool)
                        .await?;

                Ok(row.map(Into::into))
            }

            async fn create_pipeline(
                &self,
                pipeline: &rivet_core::Pipeline,
            ) -> $crate::error::Result<i64> {
                let id = sqlx::query_scalar::<$db, i64>($dml::INSERT_PIPELINE)
                    .bind(pipeline.repo_id)
                    .bind(pipeline.commit.as_str())
                    .bind(pipeline.compressed)
                    .bind(pipeline.compression_level)
                    .bind(pipeline.data.as_slice())
                    .fetch_one(&self.pool)
                    .await?;

                Ok(id)
            }

            async fn update_pipeline(
                &self,
                pipeline: &rivet_core::Pipeline,
            ) -> $crate::error::Result<u64> {
                let result = sqlx::query($dml::UPDATE_PIPELINE)
                    .bind(pipeline.repo_id)
                    .bind(pipeline.commit.as_str())
                    .bind(pipeline.compressed)
                    .bind(pipeline.compression_level)
                    .bind(pipeline.data.as_slice())
                    .bind(pipeline.id)
                    .execute(&self.pool)
                    .await?;

                Ok(result.rows_affected())
            }

            async fn delete_pipeline(&self, id: i64) -> $crate::error::Result<u64> {
                let result = sqlx::query($dml::DELETE_PIPELINE)
                    .bind(id)
                    .execute(&self.pool)
                    .await?;

                Ok(result.rows_affected())
            }

            // =================================================================
            // Workers
            // =================================================================

            async fn get_worker(&self, id: i64) -> $crate::error::Result<Option<rivet_core::Worker>> {
                let row = sqlx::query_as::<$db, $crate::rows::WorkerRow>($dml::SELECT_WORKER)
                    .bind(id)
                    .fetch_optional(&self.pool)
                    .await?;

                row.map(TryInto::try_into).transpose()
            }

            async fn get_worker_by_hostname(
                &self,
                hostname: &str,
            ) -> $crate::error::Result<Option<rivet_core::Worker>> {
                let row =
                    sqlx::query_as::<$db, $crate::rows::WorkerRow>($dml::SELECT_WORKER_BY_HOSTNAME)
                        .bind(hostname)
                        .fetch_optional(&self.pool)
                        .await?;

                row.map(TryInto::try_into).transpose()
            }

            async fn get_worker_by_address(
                &self,
                address: &str,
            ) -> $crate::error::Result<Option<rivet_core::Worker>> {
                let row =
                    sqlx::query_as::<$db, $crate::rows::WorkerRow>($dml::SELECT_WORKER_BY_ADDRESS)
                        .bind(address)
                        .fetch_optional(&self.pool)
                        .await?;

                row.map(TryInto::try_into).transpose()
            }

            async fn list_workers(&self) -> $crate::error::Result<Vec<rivet_core::Worker>> {
                let rows = sqlx::query_as::<$db, $crate::rows::WorkerRow>($dml::LIST_WORKERS)
                    .fetch_all(&self.pool)
                    .await?;

                rows.into_iter().map(TryInto::try_into).collect()
            }

            async fn create_worker(&self, worker: &rivet_core::Worker) -> $crate::error::Result<i64> {
                let routes = $crate::rows::encode_routes(&worker.routes)?;

                let id = sqlx::query_scalar::<$db, i64>($dml::INSERT_WORKER)
                    .bind(worker.hostname.as_str())
                    .bind(worker.address.as_str())
                    .bind(routes)
                    .bind(worker.active)
                    .bind(worker.last_checked_in)
                    .bind(worker.build_limit)
                    .fetch_one(&self.pool)
                    .await?;

                Ok(id)
            }

            async fn update_worker(&self, worker: &rivet_core::Worker) -> $crate::error::Result<u64> {
                let routes = $crate::rows::encode_routes(&worker.routes)?;

                let result = sqlx::query($dml::UPDATE_WORKER)
                    .bind(worker.hostname.as_str())
                    .bind(worker.address.as_str())
                    .bind(routes)
                    .bind(worker.active)
                    .bind(worker.last_checked_in)
                    .bind(worker.build_limit)
                    .bind(worker.id)
                    .execute(&self.pool)
                    .await?;

                Ok(result.rows_affected())
            }

            async fn delete_worker(&self, id: i64) -> $crate::error::Result<u64> {
                let result = sqlx::query($dml::DELETE_WORKER)
                    .bind(id)
                    .execute(&self.pool)
                    .await?;

                Ok(result.rows_affected())
            }

            // =================================================================
            // Logs
            // =================================================================

            async fn get_log(&self, id: i64) -> $crate::error::Result<Option<rivet_core::Log>> {
                let row = sqlx::query_as::<$db, $crate::rows::LogRow>($dml::SELECT_LOG)
                    .bind(id)
                    .fetch_optional(&self.pool)
                    .await?;

                Ok(row.map(Into::into))
            }

            async fn get_log_for_step(
                &self,
                step_id: i64,
            ) -> $crate::error::Result<Option<rivet_core::Log>> {
                let row = sqlx::query_as::<$db, $crate::rows::LogRow>($dml::SELECT_LOG_FOR_STEP)
                    .bind(step_id)
                    .fetch_optional(&self.pool)
                    .await?;

                Ok(row.map(Into::into))
            }

            async fn get_log_for_service(
                &self,
                service_id: i64,
            ) -> $crate::error::Result<Option<rivet_core::Log>> {
                let row = sqlx::query_as::<$db, $crate::rows::LogRow>($dml::SELECT_LOG_FOR_SERVICE)
                    .bind(service_id)
                    .fetch_optional(&self.pool)
                    .await?;

                Ok(row.map(Into::into))
            }

            async fn create_log(&self, log: &rivet_core::Log) -> $crate::error::Result<i64> {
                let id = sqlx::query_scalar::<$db, i64>($dml::INSERT_LOG)
                    .bind(log.build_id)
                    .bind(log.repo_id)
                    .bind(log.service_id)
                    .bind(log.step_id)
                    .bind(log.data.as_slice())
                    .fetch_one(&self.pool)
                    .await?;

                Ok(id)
            }

            async fn update_log(&self, log: &rivet_core::Log) -> $crate::error::Result<u64> {
                let result = sqlx::query($dml::UPDATE_LOG)
                    .bind(log.build_id)
                    .bind(log.repo_id)
                    .bind(log.service_id)
                    .bind(log.step_id)
                    .bind(log.data.as_slice())
                    .bind(log.id)
                    .execute(&self.pool)
                    .await?;

                Ok(result.rows_affected())
            }

            async fn delete_log(&self, id: i64) -> $crate::error::Result<u64> {
                let result = sqlx::query($dml::DELETE_LOG)
                    .bind(id)
                    .execute(&self.pool)
                    .await?;

                Ok(result.rows_affected())
            }
        }
    };
}

pub(crate) use impl_store;
