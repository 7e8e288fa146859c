use super::models::{Run, RunFields};
use super::{RunStore, StoreError, StoreResult};
use crate::schema::run;
use anyhow::{anyhow, Context, Result};
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use log::debug;
use std::path::Path;
use std::time::Duration;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

pub struct SqliteRunStore {
    connection: SqliteConnection,
}

impl SqliteRunStore {
    /// Open the SQLite database at a path, creating it and its tables if necessary
    pub fn open(db_path: &Path, busy_timeout: Duration) -> Result<Self> {
        let connection = SqliteConnection::establish(&db_path.to_string_lossy())
            .with_context(|| format!("Failed to open SQLite database {}", db_path.display()))?;
        let mut store = Self { connection };
        store.init(busy_timeout)?;
        Ok(store)
    }

    /// Open a private database that only lives as long as the store
    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self> {
        Self::open(Path::new(":memory:"), Duration::from_secs(1))
    }

    /// Configure the connection and bring the schema up to date
    fn init(&mut self, busy_timeout: Duration) -> Result<()> {
        // Concurrent writers wait up to the busy timeout instead of failing immediately
        self.connection
            .batch_execute(&format!(
                "PRAGMA journal_mode = WAL; PRAGMA busy_timeout = {};",
                busy_timeout.as_millis()
            ))
            .context("Failed to configure SQLite connection")?;

        let applied = self
            .connection
            .run_pending_migrations(MIGRATIONS)
            .map_err(|err| anyhow!(err))
            .context("Failed to run SQLite migrations")?;
        for migration in applied {
            debug!("Applied migration {migration}");
        }

        Ok(())
    }
}

impl RunStore for SqliteRunStore {
    fn create(&mut self, fields: RunFields) -> StoreResult<Run> {
        fields.validate()?;
        let run = diesel::insert_into(run::table)
            .values(&fields)
            .get_result::<Run>(&mut self.connection)?;
        Ok(run)
    }

    fn get(&mut self, id: i32) -> StoreResult<Run> {
        run::table
            .find(id)
            .first::<Run>(&mut self.connection)
            .optional()?
            .ok_or(StoreError::NotFound(id))
    }

    fn list(&mut self) -> StoreResult<Vec<Run>> {
        let runs = run::table
            .order(run::dsl::id.asc())
            .load::<Run>(&mut self.connection)?;
        Ok(runs)
    }

    fn update(&mut self, id: i32, fields: RunFields) -> StoreResult<Run> {
        self.get(id)?;
        fields.validate()?;
        diesel::update(run::table.find(id))
            .set(&fields)
            .get_result::<Run>(&mut self.connection)
            .optional()?
            .ok_or(StoreError::NotFound(id))
    }

    fn delete(&mut self, id: i32) -> StoreResult<()> {
        let deleted = diesel::delete(run::table.find(id)).execute(&mut self.connection)?;
        if deleted == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}
