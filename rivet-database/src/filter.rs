//! Count Aggregator
//!
//! Translates an enumerated filter descriptor into a parameterized
//! `COUNT(*)` statement for the active dialect. Values never reach the
//! statement text; they travel alongside it as [`BindValue`]s.

use rivet_core::BuildStatus;

use crate::config::Driver;
use crate::constants::{TABLE_BUILDS, TABLE_REPOS};
use crate::error::{DatabaseError, Result};

/// Keys accepted by [`BuildFilter::from_pairs`]
pub const BUILD_FILTER_KEYS: [&str; 6] = ["status", "event", "branch", "repo_id", "since", "before"];

/// Exact-match predicates for counting builds
///
/// `since` is inclusive and `before` exclusive, both compared against the
/// build's `created` time in Unix seconds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildFilter {
    pub status: Option<BuildStatus>,
    pub event: Option<String>,
    pub branch: Option<String>,
    pub repo_id: Option<i64>,
    pub since: Option<i64>,
    pub before: Option<i64>,
}

impl BuildFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: BuildStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_event(mut self, event: impl Into<String>) -> Self {
        self.event = Some(event.into());
        self
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    pub fn with_repo_id(mut self, repo_id: i64) -> Self {
        self.repo_id = Some(repo_id);
        self
    }

    pub fn created_between(mut self, since: i64, before: i64) -> Self {
        self.since = Some(since);
        self.before = Some(before);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Build a filter from caller-supplied `key=value` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::UnknownFilter`] for a key outside
    /// [`BUILD_FILTER_KEYS`] and [`DatabaseError::InvalidFilter`] for a value
    /// that does not parse or a key given twice.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut filter = Self::default();
        let mut seen: Vec<String> = Vec::new();

        for (key, value) in pairs {
            let (key, value) = (key.as_ref(), value.as_ref());
            let invalid = || DatabaseError::InvalidFilter {
                key: key.to_string(),
                value: value.to_string(),
            };

            if seen.iter().any(|k| k == key) {
                return Err(invalid());
            }
            seen.push(key.to_string());

            match key {
                "status" => filter.status = Some(value.parse().map_err(|_| invalid())?),
                "event" => filter.event = Some(value.to_string()),
                "branch" => filter.branch = Some(value.to_string()),
                "repo_id" => filter.repo_id = Some(value.parse().map_err(|_| invalid())?),
                "since" => filter.since = Some(value.parse().map_err(|_| invalid())?),
                "before" => filter.before = Some(value.parse().map_err(|_| invalid())?),
                _ => return Err(DatabaseError::UnknownFilter(key.to_string())),
            }
        }

        Ok(filter)
    }
}

/// Set of builds a count is scoped to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildScope<'a> {
    All,
    /// Builds of every repo owned by the org, resolved through a join on `repos`
    Org(&'a str),
    Repo(i64),
}

/// Parameter value bound out-of-band from the statement text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindValue {
    Text(String),
    Int(i64),
}

/// Parameterized counting statement for one dialect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountQuery {
    driver: Driver,
    sql: String,
    binds: Vec<BindValue>,
}

impl CountQuery {
    /// Unfiltered count over `table`
    pub fn table(driver: Driver, table: &str) -> Self {
        Self {
            driver,
            sql: format!("SELECT COUNT(*) FROM {table}"),
            binds: Vec::new(),
        }
    }

    pub fn builds(driver: Driver, scope: BuildScope<'_>, filter: &BuildFilter) -> Self {
        let mut query = Self::table(driver, TABLE_BUILDS);

        match scope {
            BuildScope::All => {}
            BuildScope::Org(org) => {
                query.sql.push_str(&format!(
                    " JOIN {TABLE_REPOS} ON {TABLE_BUILDS}.repo_id = {TABLE_REPOS}.id"
                ));
                query.push("repos.org", "=", BindValue::Text(org.to_string()));
            }
            BuildScope::Repo(repo_id) => query.push("builds.repo_id", "=", BindValue::Int(repo_id)),
        }

        if let Some(status) = filter.status {
            query.push("builds.status", "=", BindValue::Text(status.as_str().to_string()));
        }
        if let Some(event) = &filter.event {
            query.push("builds.event", "=", BindValue::Text(event.clone()));
        }
        if let Some(branch) = &filter.branch {
            query.push("builds.branch", "=", BindValue::Text(branch.clone()));
        }
        if let Some(repo_id) = filter.repo_id {
            query.push("builds.repo_id", "=", BindValue::Int(repo_id));
        }
        if let Some(since) = filter.since {
            query.push("builds.created", ">=", BindValue::Int(since));
        }
        if let Some(before) = filter.before {
            query.push("builds.created", "<", BindValue::Int(before));
        }

        query
    }

    /// Conjoin `column op <placeholder>` onto the statement
    pub fn push(&mut self, column: &str, op: &str, value: BindValue) {
        self.sql
            .push_str(if self.binds.is_empty() { " WHERE " } else { " AND " });
        self.binds.push(value);
        let placeholder = self.driver.placeholder(self.binds.len());
        self.sql.push_str(&format!("{column} {op} {placeholder}"));
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn binds(&self) -> &[BindValue] {
        &self.binds
    }
}
