//! Pipeline operations
//!
//! Pipeline payloads are compressed at the configured level on the way in
//! and decompressed on the way out, so callers only ever see raw bytes.
//! Rows written uncompressed are read back unchanged.

use rivet_core::Pipeline;

use super::{Engine, affected, found};
use crate::constants::TABLE_PIPELINES;
use crate::error::Result;
use crate::filter::{BindValue, CountQuery};
use crate::transform::{Compress, Validate, require_id};

impl Engine {
    /// Get a pipeline by id with its payload decompressed
    pub async fn get_pipeline(&self, id: i64) -> Result<Pipeline> {
        tracing::trace!(pipeline = id, "getting pipeline from the database");

        let mut pipeline = found("pipeline", id, self.store().get_pipeline(id).await?)?;
        pipeline.decompress()?;

        Ok(pipeline)
    }

    /// Get the pipeline captured for `commit` of a repo
    pub async fn get_pipeline_for_repo(&self, repo_id: i64, commit: &str) -> Result<Pipeline> {
        tracing::trace!(repo = repo_id, commit, "getting pipeline from the database");

        let pipeline = self.store().get_pipeline_for_repo(repo_id, commit).await?;
        let mut pipeline = found("pipeline", commit, pipeline)?;
        pipeline.decompress()?;

        Ok(pipeline)
    }

    /// Store a pipeline, returning it with its assigned id and raw payload
    pub async fn create_pipeline(&self, pipeline: &Pipeline) -> Result<Pipeline> {
        pipeline.validate()?;

        let (raw, mut stored) = self.prepare_pipeline(pipeline)?;
        stored.id = self.store().create_pipeline(&stored).await?;
        tracing::debug!(
            repo = stored.repo_id,
            commit = %stored.commit,
            id = stored.id,
            "created pipeline"
        );

        Ok(Pipeline {
            id: stored.id,
            compression_level: stored.compression_level,
            ..raw
        })
    }

    /// Replace every column of an existing pipeline
    pub async fn update_pipeline(&self, pipeline: &Pipeline) -> Result<()> {
        require_id("pipeline", pipeline.id)?;
        pipeline.validate()?;

        tracing::trace!(commit = %pipeline.commit, "updating pipeline in the database");

        let (_, stored) = self.prepare_pipeline(pipeline)?;
        let rows = self.store().update_pipeline(&stored).await?;
        affected("pipeline", pipeline.id, rows)
    }

    /// Split a caller's pipeline into its raw form and the row to write.
    ///
    /// Payloads already flagged as compressed are decoded first; bytes that
    /// do not decode never reach the store.
    fn prepare_pipeline(&self, pipeline: &Pipeline) -> Result<(Pipeline, Pipeline)> {
        let mut raw = pipeline.clone();
        raw.decompress()?;

        let mut stored = raw.clone();
        stored.compress(self.config.compression_level)?;

        Ok((raw, stored))
    }

    /// Remove a pipeline by id
    pub async fn delete_pipeline(&self, id: i64) -> Result<()> {
        let rows = self.store().delete_pipeline(id).await?;
        affected("pipeline", id, rows)
    }

    /// Count pipelines captured for a repo
    pub async fn count_pipelines_for_repo(&self, repo_id: i64) -> Result<i64> {
        let mut query = CountQuery::table(self.driver(), TABLE_PIPELINES);
        query.push("repo_id", "=", BindValue::Int(repo_id));
        self.count(query).await
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{Driver, EngineConfig};
    use crate::db::create_memory_pool;
    use crate::engine::Engine;
    use crate::engine::tests::{seed_repo, sqlite_engine};
    use crate::error::DatabaseError;
    use crate::transform::compress;
    use rivet_core::Pipeline;

    const COMMIT: &str = "48afb5bdc41ad69bf22588491333f7cf71135163";

    fn config_bytes() -> Vec<u8> {
        b"version: \"1\"\nsteps:\n  - name: build\n    image: rust:latest\n    commands:\n      - cargo build\n"
            .repeat(50)
    }

    async fn stored_bytes(pool: &sqlx::SqlitePool, id: i64) -> (bool, i32, Vec<u8>) {
        sqlx::query_as("SELECT compressed, compression_level, data FROM pipelines WHERE id = ?")
            .bind(id)
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_pipeline_is_stored_compressed_and_read_back_raw() {
        let pool = create_memory_pool().await.unwrap();
        let config = EngineConfig::new(Driver::Sqlite).with_compression_level(9);
        let engine = Engine::new(config, pool.clone()).await.unwrap();
        let repo = seed_repo(&engine, "github", "octocat").await;

        let created = engine
            .create_pipeline(&Pipeline::new(repo.id, COMMIT, config_bytes()))
            .await
            .unwrap();
        assert_eq!(created.data, config_bytes());
        assert!(!created.compressed);
        assert_eq!(created.compression_level, 9);

        let (compressed, level, data) = stored_bytes(&pool, created.id).await;
        assert!(compressed);
        assert_eq!(level, 9);
        assert!(data.len() < config_bytes().len());

        let fetched = engine.get_pipeline_for_repo(repo.id, COMMIT).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(engine.get_pipeline(created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn test_uncompressed_rows_are_read_unchanged() {
        let pool = create_memory_pool().await.unwrap();
        let engine = Engine::new(EngineConfig::new(Driver::Sqlite), pool.clone())
            .await
            .unwrap();
        let repo = seed_repo(&engine, "github", "octocat").await;

        sqlx::query("INSERT INTO pipelines (repo_id, \"commit\", data) VALUES (?, ?, ?)")
            .bind(repo.id)
            .bind(COMMIT)
            .bind(b"legacy".as_slice())
            .execute(&pool)
            .await
            .unwrap();

        let pipeline = engine.get_pipeline_for_repo(repo.id, COMMIT).await.unwrap();
        assert_eq!(pipeline.data, b"legacy");
        assert!(!pipeline.compressed);
    }

    #[tokio::test]
    async fn test_corrupt_payload_is_an_integrity_error() {
        let pool = create_memory_pool().await.unwrap();
        let engine = Engine::new(EngineConfig::new(Driver::Sqlite), pool.clone())
            .await
            .unwrap();
        let repo = seed_repo(&engine, "github", "octocat").await;

        sqlx::query(
            "INSERT INTO pipelines (repo_id, \"commit\", compressed, compression_level, data) \
             VALUES (?, ?, 1, 3, ?)",
        )
        .bind(repo.id)
        .bind(COMMIT)
        .bind([1u8, 2, 3, 4].as_slice())
        .execute(&pool)
        .await
        .unwrap();

        let err = engine
            .get_pipeline_for_repo(repo.id, COMMIT)
            .await
            .unwrap_err();
        assert!(
            matches!(err, crate::error::DatabaseError::Integrity { entity: "pipeline", .. }),
            "got: {err}"
        );
    }

    #[tokio::test]
    async fn test_update_pipeline_recompresses() {
        let engine = sqlite_engine().await;
        let repo = seed_repo(&engine, "github", "octocat").await;
        let mut pipeline = engine
            .create_pipeline(&Pipeline::new(repo.id, COMMIT, config_bytes()))
            .await
            .unwrap();

        pipeline.data = b"version: \"2\"".to_vec();
        engine.update_pipeline(&pipeline).await.unwrap();

        let fetched = engine.get_pipeline(pipeline.id).await.unwrap();
        assert_eq!(fetched.data, b"version: \"2\"");
        assert_eq!(engine.count_pipelines_for_repo(repo.id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_empty_commit_fails_before_any_statement() {
        let engine = sqlite_engine().await;
        engine.close().await;

        let err = engine
            .create_pipeline(&Pipeline::new(1, "", b"data".to_vec()))
            .await
            .unwrap_err();
        assert!(err.is_validation(), "got: {err}");
    }

    #[tokio::test]
    async fn test_duplicate_commit_is_a_constraint_violation() {
        let engine = sqlite_engine().await;
        let repo = seed_repo(&engine, "github", "octocat").await;
        let pipeline = Pipeline::new(repo.id, COMMIT, config_bytes());

        engine.create_pipeline(&pipeline).await.unwrap();
        assert!(
            engine
                .create_pipeline(&pipeline)
                .await
                .unwrap_err()
                .is_constraint_violation()
        );
    }

    #[tokio::test]
    async fn test_delete_pipeline() {
        let engine = sqlite_engine().await;
        let repo = seed_repo(&engine, "github", "octocat").await;
        let pipeline = engine
            .create_pipeline(&Pipeline::new(repo.id, COMMIT, config_bytes()))
            .await
            .unwrap();

        engine.delete_pipeline(pipeline.id).await.unwrap();
        assert!(engine.get_pipeline(pipeline.id).await.unwrap_err().is_not_found());
        assert_eq!(engine.count_pipelines_for_repo(repo.id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_flagged_payload_that_does_not_decode_is_never_stored() {
        let engine = sqlite_engine().await;
        let repo = seed_repo(&engine, "github", "octocat").await;

        let mut flagged = Pipeline::new(repo.id, COMMIT, b"raw yaml, not zstd".to_vec());
        flagged.compressed = true;

        let err = engine.create_pipeline(&flagged).await.unwrap_err();
        assert!(
            matches!(err, DatabaseError::Integrity { entity: "pipeline", .. }),
            "got: {err}"
        );
        assert_eq!(engine.count_pipelines_for_repo(repo.id).await.unwrap(), 0);

        // nothing was written, so the same commit can still be created
        let created = engine
            .create_pipeline(&Pipeline::new(repo.id, COMMIT, config_bytes()))
            .await
            .unwrap();

        let err = engine
            .update_pipeline(&Pipeline {
                id: created.id,
                ..flagged
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::Integrity { .. }), "got: {err}");
        assert_eq!(engine.get_pipeline(created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn test_precompressed_payload_is_recompressed_at_configured_level() {
        let pool = create_memory_pool().await.unwrap();
        let config = EngineConfig::new(Driver::Sqlite).with_compression_level(7);
        let engine = Engine::new(config, pool.clone()).await.unwrap();
        let repo = seed_repo(&engine, "github", "octocat").await;

        let mut pipeline = Pipeline::new(repo.id, COMMIT, compress(&config_bytes(), 1).unwrap());
        pipeline.compressed = true;
        pipeline.compression_level = 1;

        let created = engine.create_pipeline(&pipeline).await.unwrap();
        assert_eq!(created.data, config_bytes());
        assert!(!created.compressed);

        let (compressed, level, _) = stored_bytes(&pool, created.id).await;
        assert!(compressed);
        assert_eq!(level, 7);

        let mut updated = created.clone();
        updated.data = compress(b"version: \"2\"", 22).unwrap();
        updated.compressed = true;
        engine.update_pipeline(&updated).await.unwrap();

        let (_, level, _) = stored_bytes(&pool, created.id).await;
        assert_eq!(level, 7);
        assert_eq!(engine.get_pipeline(created.id).await.unwrap().data, b"version: \"2\"");
    }
}
