//! Log operations

use rivet_core::Log;

use super::{Engine, affected, found};
use crate::constants::TABLE_LOGS;
use crate::error::Result;
use crate::filter::{BindValue, CountQuery};
use crate::transform::{Validate, require_id};

impl Engine {
    /// Get a log by id
    pub async fn get_log(&self, id: i64) -> Result<Log> {
        tracing::trace!(log = id, "getting log from the database");
        found("log", id, self.store().get_log(id).await?)
    }

    /// Get the log written by a step
    pub async fn get_log_for_step(&self, step_id: i64) -> Result<Log> {
        tracing::trace!(step = step_id, "getting log from the database");
        let log = self.store().get_log_for_step(step_id).await?;
        found("log", format!("step {step_id}"), log)
    }

    /// Get the log written by a service
    pub async fn get_log_for_service(&self, service_id: i64) -> Result<Log> {
        tracing::trace!(service = service_id, "getting log from the database");
        let log = self.store().get_log_for_service(service_id).await?;
        found("log", format!("service {service_id}"), log)
    }

    /// Store a log, returning it with its assigned id
    pub async fn create_log(&self, log: &Log) -> Result<Log> {
        log.validate()?;

        let id = self.store().create_log(log).await?;
        tracing::debug!(build = log.build_id, id, bytes = log.data.len(), "created log");

        Ok(Log { id, ..log.clone() })
    }

    /// Replace the data and owners of an existing log
    pub async fn update_log(&self, log: &Log) -> Result<()> {
        require_id("log", log.id)?;
        log.validate()?;

        let rows = self.store().update_log(log).await?;
        affected("log", log.id, rows)
    }

    /// Remove a log by id
    pub async fn delete_log(&self, id: i64) -> Result<()> {
        let rows = self.store().delete_log(id).await?;
        affected("log", id, rows)
    }

    /// Count logs attached to a build
    pub async fn count_logs_for_build(&self, build_id: i64) -> Result<i64> {
        let mut query = CountQuery::table(self.driver(), TABLE_LOGS);
        query.push("build_id", "=", BindValue::Int(build_id));
        self.count(query).await
    }
}
