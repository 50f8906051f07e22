//! Database schema initialization and migrations.

use crate::error::{CadenceError, DatabaseResultExt, Result};

const HAS_RULE_EFFECTIVE_FROM_SQL: &str =
    "SELECT COUNT(*) FROM pragma_table_info('recurrence_patterns') WHERE name = 'rule_effective_from'";
const ADD_RULE_EFFECTIVE_FROM_SQL: &str =
    "ALTER TABLE recurrence_patterns ADD COLUMN rule_effective_from TEXT";

impl super::Database {
    /// Initializes the database schema using the embedded SQL file.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        // Foreign keys are per-connection in SQLite; instance cascade depends on it
        self.connection
            .execute("PRAGMA foreign_keys = ON", [])
            .db_context("Failed to enable foreign keys")?;

        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        self.apply_migrations()?;

        Ok(())
    }

    /// Apply database migrations for existing databases
    fn apply_migrations(&self) -> Result<()> {
        let has_effective_from: bool = self
            .connection
            .query_row(HAS_RULE_EFFECTIVE_FROM_SQL, [], |row| row.get(0))
            .map(|count: i64| count > 0)
            .unwrap_or(false);

        if !has_effective_from {
            log::debug!("Adding rule_effective_from column to recurrence_patterns");
            self.connection
                .execute(ADD_RULE_EFFECTIVE_FROM_SQL, [])
                .map_err(|e| {
                    CadenceError::database("Failed to add rule_effective_from column")
                        .with_source(e)
                })?;
        }

        Ok(())
    }
}
