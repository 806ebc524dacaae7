//! Worker operations

use rivet_core::Worker;

use super::{Engine, affected, found};
use crate::constants::TABLE_WORKERS;
use crate::error::Result;
use crate::filter::CountQuery;
use crate::transform::{Validate, require_id};

impl Engine {
    /// Get a worker by id
    pub async fn get_worker(&self, id: i64) -> Result<Worker> {
        tracing::trace!(worker = id, "getting worker from the database");
        found("worker", id, self.store().get_worker(id).await?)
    }

    /// Get the worker registered under `hostname`
    pub async fn get_worker_by_hostname(&self, hostname: &str) -> Result<Worker> {
        tracing::trace!(hostname, "getting worker from the database");
        let worker = self.store().get_worker_by_hostname(hostname).await?;
        found("worker", hostname, worker)
    }

    /// Get the worker listening on `address`
    pub async fn get_worker_by_address(&self, address: &str) -> Result<Worker> {
        tracing::trace!(address, "getting worker from the database");
        let worker = self.store().get_worker_by_address(address).await?;
        found("worker", address, worker)
    }

    /// List all workers ordered by hostname
    pub async fn list_workers(&self) -> Result<Vec<Worker>> {
        self.store().list_workers().await
    }

    /// Register a worker, returning it with its assigned id
    pub async fn create_worker(&self, worker: &Worker) -> Result<Worker> {
        worker.validate()?;

        let id = self.store().create_worker(worker).await?;
        tracing::debug!(hostname = %worker.hostname, id, "created worker");

        Ok(Worker {
            id,
            ..worker.clone()
        })
    }

    /// Replace every column of an existing worker
    pub async fn update_worker(&self, worker: &Worker) -> Result<()> {
        require_id("worker", worker.id)?;
        worker.validate()?;

        tracing::trace!(hostname = %worker.hostname, "updating worker in the database");

        let rows = self.store().update_worker(worker).await?;
        affected("worker", worker.id, rows)
    }

    /// Remove a worker by id
    pub async fn delete_worker(&self, id: i64) -> Result<()> {
        let rows = self.store().delete_worker(id).await?;
        affected("worker", id, rows)
    }

    /// Count registered workers
    pub async fn count_workers(&self) -> Result<i64> {
        self.count(CountQuery::table(self.driver(), TABLE_WORKERS))
            .await
    }
}
