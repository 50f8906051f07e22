//! Builder for creating and configuring Planner instances.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use jiff::civil::Date;

use super::Planner;
use crate::{
    db::{Database, DEFAULT_BUSY_TIMEOUT},
    error::{CadenceError, Result},
    params::{validate_days_ahead, DEFAULT_DAYS_AHEAD},
};

/// Builder for creating and configuring Planner instances.
#[derive(Debug, Clone)]
pub struct PlannerBuilder {
    database_path: Option<PathBuf>,
    default_days_ahead: u32,
    busy_timeout: Duration,
    today: Option<Date>,
}

impl PlannerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            database_path: None,
            default_days_ahead: DEFAULT_DAYS_AHEAD,
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
            today: None,
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses the XDG Base Directory specification:
    /// `$XDG_DATA_HOME/cadence/cadence.db` or
    /// `~/.local/share/cadence/cadence.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.database_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the horizon used when a generate call does not give one.
    pub fn with_default_days_ahead(mut self, days_ahead: u32) -> Self {
        self.default_days_ahead = days_ahead;
        self
    }

    /// Sets how long a connection waits for another writer's lock.
    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Pins "today" instead of reading the system clock.
    pub fn with_today(mut self, today: Date) -> Self {
        self.today = Some(today);
        self
    }

    /// Builds the configured planner instance, creating the database file
    /// and schema if needed.
    ///
    /// # Errors
    ///
    /// Returns `CadenceError::InvalidInput` if the default horizon is out of
    /// range, `CadenceError::FileSystem` if the database directory cannot be
    /// created, and `CadenceError::Database` if schema initialization fails.
    pub async fn build(self) -> Result<Planner> {
        validate_days_ahead(self.default_days_ahead)?;

        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| CadenceError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let planner = Planner::new(
            db_path,
            self.busy_timeout,
            self.default_days_ahead,
            self.today,
        );

        // Open once up front so schema errors surface at build time
        planner.with_database(|_db: &mut Database| Ok(())).await?;

        log::debug!("Using database at {}", planner.database_path().display());
        Ok(planner)
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("cadence")
            .place_data_file("cadence.db")
            .map_err(|e| CadenceError::XdgDirectory(e.to_string()))
    }
}

impl Default for PlannerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
