//! Schema Provisioner
//!
//! Runs once before ingestion:
//! 1. Ensure the `verses` table exists, creating it (and its index) on first run
//! 2. Probe that the connection may create and write tables, using a
//!    temporary table that disappears with the connection
//!
//! Any error here is fatal to the ingestion run.

use crate::{Error, Result};
use crate::storage::{VerseStore, schema};

/// What `ensure_schema` found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionOutcome {
    Created,
    AlreadyExists,
}

pub struct SchemaProvisioner<'a> {
    store: &'a VerseStore,
}

impl<'a> SchemaProvisioner<'a> {
    pub fn new(store: &'a VerseStore) -> Self {
        Self { store }
    }

    /// Ensure schema, then check permissions
    pub fn run(&self) -> Result<ProvisionOutcome> {
        let outcome = self.ensure_schema()?;
        self.check_permissions()?;
        Ok(outcome)
    }

    /// Create the verses table if it is missing. Safe to call repeatedly.
    pub fn ensure_schema(&self) -> Result<ProvisionOutcome> {
        let exists = self
            .store
            .table_exists(schema::VERSES_TABLE)
            .map_err(|e| schema_error("failed to check if table exists", e))?;

        if exists {
            tracing::info!("{} table already exists", schema::VERSES_TABLE);
            return Ok(ProvisionOutcome::AlreadyExists);
        }

        for stmt in schema::create_statements() {
            self.store
                .execute_batch(stmt)
                .map_err(|e| schema_error("failed to create table", e))?;
        }
        tracing::info!("Created {} table", schema::VERSES_TABLE);
        Ok(ProvisionOutcome::Created)
    }

    /// Confirm DDL and DML rights with a throwaway temporary table
    pub fn check_permissions(&self) -> Result<()> {
        self.store
            .execute_batch(schema::CREATE_PERMISSION_PROBE)
            .map_err(|e| schema_error("failed to create temporary table", e))?;
        self.store
            .execute_batch(schema::INSERT_PERMISSION_PROBE)
            .map_err(|e| schema_error("failed to insert into temporary table", e))?;

        tracing::info!("Database permissions verified successfully");
        Ok(())
    }
}

fn schema_error(context: &'static str, err: Error) -> Error {
    match err {
        Error::Storage(source) => Error::Schema { context, source },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verse::ParsedVerse;

    #[test]
    fn test_ensure_schema_is_idempotent() {
        let store = VerseStore::open_in_memory().unwrap();
        let provisioner = SchemaProvisioner::new(&store);

        assert_eq!(provisioner.ensure_schema().unwrap(), ProvisionOutcome::Created);
        assert!(store.table_exists(schema::VERSES_TABLE).unwrap());

        let mut writer = store.insert_statement("KJV").unwrap();
        writer.insert(&ParsedVerse::new("Genesis", 1, 1, "In the beginning")).unwrap();
        drop(writer);

        assert_eq!(provisioner.ensure_schema().unwrap(), ProvisionOutcome::AlreadyExists);
        assert_eq!(store.count_verses().unwrap(), 1);
    }

    #[test]
    fn test_run_twice_on_same_connection() {
        let store = VerseStore::open_in_memory().unwrap();
        let provisioner = SchemaProvisioner::new(&store);

        assert_eq!(provisioner.run().unwrap(), ProvisionOutcome::Created);
        assert_eq!(provisioner.run().unwrap(), ProvisionOutcome::AlreadyExists);
    }

    #[test]
    fn test_probe_table_is_temporary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("verses.db");

        {
            let store = VerseStore::open(&path).unwrap();
            SchemaProvisioner::new(&store).run().unwrap();
        }

        let store = VerseStore::open(&path).unwrap();
        assert!(store.table_exists(schema::VERSES_TABLE).unwrap());
        assert!(!store.table_exists("temp_test").unwrap());
    }

    #[test]
    fn test_query_only_connection_fails_probe() {
        let store = VerseStore::open_in_memory().unwrap();
        store.execute_batch("PRAGMA query_only = ON").unwrap();

        let err = SchemaProvisioner::new(&store).check_permissions().unwrap_err();
        assert!(matches!(err, Error::Schema { context: "failed to create temporary table", .. }));
    }
}
