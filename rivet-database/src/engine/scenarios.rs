//! Storage scenarios run against every backend
//!
//! Each scenario only touches rows it creates under fresh names, so the
//! same checks run on a throwaway SQLite database and on a shared
//! PostgreSQL one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use rivet_core::{Build, BuildStatus, Log, Pipeline, Repo, Worker};

use crate::engine::Engine;
use crate::filter::BuildFilter;

static NEXT: AtomicU64 = AtomicU64::new(0);

fn unique_id() -> i64 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos() as i64;
    nanos + NEXT.fetch_add(1, Ordering::Relaxed) as i64
}

fn unique(prefix: &str) -> String {
    format!("{prefix}-{}", unique_id())
}

async fn repo(engine: &Engine, org: &str) -> Repo {
    engine.create_repo(&Repo::new(org, unique("repo"))).await.unwrap()
}

async fn builds(engine: &Engine, repo: &Repo, statuses: &[BuildStatus]) -> Vec<Build> {
    let mut created = Vec::with_capacity(statuses.len());
    for (i, status) in statuses.iter().enumerate() {
        let mut build = Build::new(repo.id, i as i64 + 1, *status);
        build.event = if *status == BuildStatus::Success { "push" } else { "pull_request" }.to_string();
        build.branch = "main".to_string();
        created.push(engine.create_build(&build).await.unwrap());
    }
    created
}

/// Status counts over `{success: 3, failed: 2, running: 1}`
pub(crate) async fn build_counts(engine: &Engine) {
    use BuildStatus::*;

    let before = [
        engine.count_builds_by_status(Success).await.unwrap(),
        engine.count_builds_by_status(Failed).await.unwrap(),
        engine.count_builds_by_status(Running).await.unwrap(),
    ];

    let repo = repo(engine, &unique("org")).await;
    builds(engine, &repo, &[Success, Success, Success, Failed, Failed, Running]).await;

    let in_repo = |status| BuildFilter::new().with_status(status);
    assert_eq!(engine.count_builds_for_repo(&repo, &in_repo(Success)).await.unwrap(), 3);
    assert_eq!(engine.count_builds_for_repo(&repo, &in_repo(Failed)).await.unwrap(), 2);
    assert_eq!(engine.count_builds_for_repo(&repo, &in_repo(Running)).await.unwrap(), 1);
    assert_eq!(engine.count_builds_for_repo(&repo, &in_repo(Killed)).await.unwrap(), 0);
    assert_eq!(engine.count_builds_for_repo(&repo, &BuildFilter::new()).await.unwrap(), 6);

    let by_repo_id = BuildFilter::new().with_repo_id(repo.id);
    assert_eq!(engine.count_builds(&by_repo_id).await.unwrap(), 6);
    let pushes = by_repo_id.with_event("push").with_branch("main");
    assert_eq!(engine.count_builds(&pushes).await.unwrap(), 3);

    let after = [
        engine.count_builds_by_status(Success).await.unwrap(),
        engine.count_builds_by_status(Failed).await.unwrap(),
        engine.count_builds_by_status(Running).await.unwrap(),
    ];
    assert_eq!(
        [after[0] - before[0], after[1] - before[1], after[2] - before[2]],
        [3, 2, 1]
    );
}

/// Org-scoped counts resolved through the repos join
pub(crate) async fn org_build_counts(engine: &Engine) {
    use BuildStatus::*;

    let (org, other) = (unique("org"), unique("org"));
    let first = repo(engine, &org).await;
    let second = repo(engine, &org).await;
    let elsewhere = repo(engine, &other).await;
    builds(engine, &first, &[Success, Failed]).await;
    builds(engine, &second, &[Success, Success, Running]).await;
    builds(engine, &elsewhere, &[Success]).await;

    let all = BuildFilter::new();
    assert_eq!(engine.count_builds_for_org(&org, &all).await.unwrap(), 5);
    assert_eq!(engine.count_builds_for_org(&other, &all).await.unwrap(), 1);
    assert_eq!(engine.count_builds_for_org(&unique("org"), &all).await.unwrap(), 0);

    let success = BuildFilter::new().with_status(Success);
    assert_eq!(engine.count_builds_for_org(&org, &success).await.unwrap(), 3);
}

/// Payload bytes survive compression on write and decompression on read
pub(crate) async fn pipeline_roundtrip(engine: &Engine) {
    let repo = repo(engine, &unique("org")).await;
    let commit = unique("commit");
    let data: Vec<u8> = (0..=255u8).cycle().take(8192).collect();

    let created = engine
        .create_pipeline(&Pipeline::new(repo.id, commit.clone(), data.clone()))
        .await
        .unwrap();
    assert_eq!(created.data, data);
    assert_eq!(created.compression_level, engine.config().compression_level);

    assert_eq!(engine.get_pipeline(created.id).await.unwrap(), created);
    assert_eq!(engine.get_pipeline_for_repo(repo.id, &commit).await.unwrap(), created);

    let mut updated = created.clone();
    updated.data = b"version: \"2\"".to_vec();
    engine.update_pipeline(&updated).await.unwrap();
    assert_eq!(engine.get_pipeline(created.id).await.unwrap(), updated);
    assert_eq!(engine.count_pipelines_for_repo(repo.id).await.unwrap(), 1);

    engine.delete_pipeline(created.id).await.unwrap();
    assert!(engine.get_pipeline(created.id).await.unwrap_err().is_not_found());
}

/// Step and service logs found by their optional owner ids
pub(crate) async fn log_lookups(engine: &Engine) {
    let repo = repo(engine, &unique("org")).await;
    let build = builds(engine, &repo, &[BuildStatus::Running]).await.remove(0);
    let (step_id, service_id) = (unique_id(), unique_id());

    let mut step = Log::for_step(build.id, repo.id, step_id);
    step.append(b"$ cargo test\n");
    let step = engine.create_log(&step).await.unwrap();
    let service = engine
        .create_log(&Log::for_service(build.id, repo.id, service_id))
        .await
        .unwrap();

    assert_eq!(engine.get_log_for_step(step_id).await.unwrap(), step);
    assert_eq!(engine.get_log_for_service(service_id).await.unwrap(), service);
    assert_eq!(engine.count_logs_for_build(build.id).await.unwrap(), 2);
    assert!(
        engine
            .create_log(&Log::for_step(build.id, repo.id, step_id))
            .await
            .unwrap_err()
            .is_constraint_violation()
    );
}

/// Full-row updates, hostname uniqueness and not-found on missing ids
pub(crate) async fn update_semantics(engine: &Engine) {
    let hostname = unique("worker");
    let mut worker = Worker::new(hostname.clone(), unique("10.0.0.1"));
    worker.routes = ["vela".to_string(), "large".to_string()].into();
    let created = engine.create_worker(&worker).await.unwrap();

    let duplicate = Worker::new(hostname.clone(), unique("10.0.0.2"));
    assert!(
        engine
            .create_worker(&duplicate)
            .await
            .unwrap_err()
            .is_constraint_violation()
    );
    assert_eq!(engine.get_worker_by_hostname(&hostname).await.unwrap(), created);

    let mut updated = created.clone();
    updated.active = false;
    updated.check_in();
    engine.update_worker(&updated).await.unwrap();
    assert_eq!(engine.get_worker(created.id).await.unwrap(), updated);
    assert_eq!(
        engine.get_worker_by_address(&created.address).await.unwrap(),
        updated
    );

    let missing = Worker {
        id: i64::MAX,
        ..Worker::new(unique("worker"), unique("10.0.0.3"))
    };
    assert!(engine.update_worker(&missing).await.unwrap_err().is_not_found());

    engine.delete_worker(created.id).await.unwrap();
    assert!(engine.get_worker(created.id).await.unwrap_err().is_not_found());
    assert!(engine.delete_worker(created.id).await.unwrap_err().is_not_found());
}

/// Every lookup on an absent key is a not-found error
pub(crate) async fn missing_keys(engine: &Engine) {
    assert!(engine.get_repo(i64::MAX).await.unwrap_err().is_not_found());
    assert!(engine.get_build(i64::MAX).await.unwrap_err().is_not_found());
    assert!(engine.get_build_for_repo(i64::MAX, 1).await.unwrap_err().is_not_found());
    assert!(engine.get_pipeline(i64::MAX).await.unwrap_err().is_not_found());
    assert!(engine.get_log(i64::MAX).await.unwrap_err().is_not_found());
    assert!(
        engine
            .get_worker_by_hostname(&unique("worker"))
            .await
            .unwrap_err()
            .is_not_found()
    );
}
