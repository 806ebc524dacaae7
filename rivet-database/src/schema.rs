//! Schema Manager
//!
//! Brings the backing store up to the required shape at engine startup.
//! Every statement uses a `CREATE ... IF NOT EXISTS` form, so applying the
//! schema on every process start is a no-op once it exists.

use crate::error::{DatabaseError, Result};
use crate::store::Store;

/// Idempotent `CREATE TABLE` statement and the tables it references
#[derive(Debug)]
pub struct TableDef {
    pub name: &'static str,
    pub references: &'static [&'static str],
    pub ddl: &'static str,
}

/// Idempotent `CREATE INDEX` statement
#[derive(Debug)]
pub struct IndexDef {
    pub name: &'static str,
    pub table: &'static str,
    pub ddl: &'static str,
}

/// Full set of DDL for one dialect
#[derive(Debug)]
pub struct Schema {
    pub tables: &'static [TableDef],
    pub indexes: &'static [IndexDef],
}

/// One DDL statement in execution order
#[derive(Debug, Clone, Copy)]
pub enum Step<'a> {
    Table(&'a TableDef),
    Index(&'a IndexDef),
}

impl Step<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            Step::Table(table) => table.name,
            Step::Index(index) => index.name,
        }
    }
}

pub struct SchemaManager<'a> {
    store: &'a dyn Store,
}

impl<'a> SchemaManager<'a> {
    pub fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    /// Order `schema` so that referenced tables come before referencing
    /// ones and every index follows all tables. Declaration order is kept
    /// wherever the dependencies allow it.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::SchemaPlan`] for a reference to an undeclared
    /// table, an index on an undeclared table, or a reference cycle.
    pub fn plan(schema: &Schema) -> Result<Vec<Step<'_>>> {
        let declared = |name: &str| schema.tables.iter().any(|t| t.name == name);

        for table in schema.tables {
            if let Some(missing) = table.references.iter().find(|r| !declared(**r)) {
                return Err(DatabaseError::SchemaPlan(format!(
                    "table {} references undeclared table {}",
                    table.name, missing
                )));
            }
        }
        for index in schema.indexes {
            if !declared(index.table) {
                return Err(DatabaseError::SchemaPlan(format!(
                    "index {} is on undeclared table {}",
                    index.name, index.table
                )));
            }
        }

        let mut created: Vec<&str> = Vec::with_capacity(schema.tables.len());
        let mut steps = Vec::with_capacity(schema.tables.len() + schema.indexes.len());

        while created.len() < schema.tables.len() {
            let ready = schema.tables.iter().find(|t| {
                !created.contains(&t.name)
                    && t
                        .references
                        .iter()
                        .all(|r| *r == t.name || created.contains(r))
            });

            match ready {
                Some(table) => {
                    created.push(table.name);
                    steps.push(Step::Table(table));
                }
                None => {
                    let pending: Vec<&str> = schema
                        .tables
                        .iter()
                        .map(|t| t.name)
                        .filter(|name| !created.contains(name))
                        .collect();
                    return Err(DatabaseError::SchemaPlan(format!(
                        "reference cycle between tables {}",
                        pending.join(", ")
                    )));
                }
            }
        }

        steps.extend(schema.indexes.iter().map(Step::Index));
        Ok(steps)
    }

    pub async fn create_table(&self, table: &TableDef) -> Result<()> {
        tracing::trace!(table = table.name, "creating table");

        self.store
            .execute_ddl(table.ddl)
            .await
            .map_err(|source| DatabaseError::Schema {
                object: format!("table {}", table.name),
                source,
            })
    }

    pub async fn create_index(&self, index: &IndexDef) -> Result<()> {
        tracing::trace!(index = index.name, table = index.table, "creating index");

        self.store
            .execute_ddl(index.ddl)
            .await
            .map_err(|source| DatabaseError::Schema {
                object: format!("index {}", index.name),
                source,
            })
    }

    /// Create every table and index of the store's dialect.
    ///
    /// Stops at the first failing statement.
    pub async fn apply(&self) -> Result<()> {
        let schema = self.store.schema();

        for step in Self::plan(schema)? {
            match step {
                Step::Table(table) => self.create_table(table).await?,
                Step::Index(index) => self.create_index(index).await?,
            }
        }

        tracing::info!(
            driver = %self.store.driver(),
            tables = schema.tables.len(),
            indexes = schema.indexes.len(),
            "database schema ready"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const fn table(
        name: &'static str,
        references: &'static [&'static str],
    ) -> TableDef {
        TableDef {
            name,
            references,
            ddl: "",
        }
    }

    fn names(steps: &[Step<'_>]) -> Vec<&'static str> {
        steps.iter().map(Step::name).collect()
    }

    #[test]
    fn test_plan_orders_referenced_tables_first() {
        static TABLES: [TableDef; 3] = [
            table("logs", &["builds", "repos"]),
            table("builds", &["repos"]),
            table("repos", &[]),
        ];
        static INDEXES: [IndexDef; 1] = [IndexDef {
            name: "logs_build_id",
            table: "logs",
            ddl: "",
        }];
        let schema = Schema {
            tables: &TABLES,
            indexes: &INDEXES,
        };

        let steps = SchemaManager::plan(&schema).unwrap();
        assert_eq!(names(&steps), ["repos", "builds", "logs", "logs_build_id"]);
    }

    #[test]
    fn test_plan_keeps_declaration_order_without_references() {
        static TABLES: [TableDef; 2] = [table("workers", &[]), table("repos", &[])];
        let schema = Schema {
            tables: &TABLES,
            indexes: &[],
        };

        let steps = SchemaManager::plan(&schema).unwrap();
        assert_eq!(names(&steps), ["workers", "repos"]);
    }

    #[test]
    fn test_plan_rejects_undeclared_reference() {
        static TABLES: [TableDef; 1] = [table("builds", &["repos"])];
        let schema = Schema {
            tables: &TABLES,
            indexes: &[],
        };

        let err = SchemaManager::plan(&schema).unwrap_err();
        assert!(matches!(err, DatabaseError::SchemaPlan(_)));
    }

    #[test]
    fn test_plan_rejects_index_on_undeclared_table() {
        static INDEXES: [IndexDef; 1] = [IndexDef {
            name: "builds_repo_id",
            table: "builds",
            ddl: "",
        }];
        let schema = Schema {
            tables: &[],
            indexes: &INDEXES,
        };

        assert!(SchemaManager::plan(&schema).is_err());
    }

    #[test]
    fn test_plan_rejects_cycle() {
        static TABLES: [TableDef; 2] = [table("a", &["b"]), table("b", &["a"])];
        let schema = Schema {
            tables: &TABLES,
            indexes: &[],
        };

        let err = SchemaManager::plan(&schema).unwrap_err();
        assert!(err.to_string().contains("cycle"), "got: {err}");
    }

    #[test]
    fn test_dialect_schemas_plan_cleanly() {
        for schema in [&crate::postgres::SCHEMA, &crate::sqlite::SCHEMA] {
            let steps = SchemaManager::plan(schema).unwrap();
            assert_eq!(steps.len(), schema.tables.len() + schema.indexes.len());

            let position = |name: &str| steps.iter().position(|s| s.name() == name).unwrap();
            assert!(position("repos") < position("builds"));
            assert!(position("builds") < position("logs"));
            assert!(position("repos") < position("pipelines"));
        }
    }
}
