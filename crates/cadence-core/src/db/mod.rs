//! SQLite storage for recurrence patterns and task instances.
//!
//! [`Database`] owns one connection and implements
//! [`RecurrenceStore`](crate::store::RecurrenceStore). Pattern queries live
//! in `pattern_queries`, instance queries in `instance_queries`.

use std::{collections::BTreeSet, path::Path, time::Duration};

use jiff::civil::Date;
use rusqlite::Connection;

use crate::{
    error::{DatabaseResultExt, Result},
    models::{
        InstanceFilter, NewPattern, NewTaskInstance, PatternFilter, PatternSummary,
        RecurrencePattern, TaskInstance, UpdateInstanceRequest,
    },
    store::{InsertOutcome, RecurrenceStore},
};

pub mod instance_queries;
pub mod migrations;
pub mod pattern_queries;
mod utils;

/// Default time a connection waits on a locked database before failing.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Opens (or creates) the database at `path` and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::with_busy_timeout(path, DEFAULT_BUSY_TIMEOUT)
    }

    /// Opens the database with an explicit busy timeout.
    ///
    /// Concurrent writers wait up to `timeout` for the write lock before the
    /// operation fails with a database error.
    pub fn with_busy_timeout<P: AsRef<Path>>(path: P, timeout: Duration) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;
        connection
            .busy_timeout(timeout)
            .db_context("Failed to set busy timeout")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}

impl RecurrenceStore for Database {
    fn insert_pattern(&mut self, pattern: &NewPattern) -> Result<RecurrencePattern> {
        self.create_pattern(pattern)
    }

    fn get_pattern(&self, id: u64) -> Result<Option<RecurrencePattern>> {
        self.fetch_pattern(id)
    }

    fn list_patterns(&self, filter: &PatternFilter) -> Result<Vec<RecurrencePattern>> {
        self.query_patterns(filter)
    }

    fn save_pattern(&mut self, pattern: &RecurrencePattern) -> Result<Option<RecurrencePattern>> {
        self.update_pattern_row(pattern)
    }

    fn set_pattern_active(
        &mut self,
        id: u64,
        active: bool,
    ) -> Result<Option<RecurrencePattern>> {
        self.update_pattern_active(id, active)
    }

    fn delete_pattern(&mut self, id: u64) -> Result<Option<RecurrencePattern>> {
        self.remove_pattern(id)
    }

    fn pattern_summaries(&self, filter: &PatternFilter) -> Result<Vec<PatternSummary>> {
        self.query_pattern_summaries(filter)
    }

    fn instance_due_dates(&self, pattern_id: u64) -> Result<BTreeSet<Date>> {
        self.query_due_dates(pattern_id)
    }

    fn insert_instances(&mut self, instances: &[NewTaskInstance]) -> Result<Vec<InsertOutcome>> {
        self.insert_instance_batch(instances)
    }

    fn get_instance(&self, id: u64) -> Result<Option<TaskInstance>> {
        self.fetch_instance(id)
    }

    fn list_instances(&self, filter: &InstanceFilter) -> Result<Vec<TaskInstance>> {
        self.query_instances(filter)
    }

    fn update_instance(
        &mut self,
        id: u64,
        request: &UpdateInstanceRequest,
    ) -> Result<Option<TaskInstance>> {
        self.update_instance_row(id, request)
    }
}
