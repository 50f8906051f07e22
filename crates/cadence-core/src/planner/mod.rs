//! High-level async API over the recurrence engine.
//!
//! [`Planner`] is what interface layers talk to. Every call validates its
//! params, then opens a connection on the blocking thread pool and runs the
//! generator or lifecycle logic against it:
//!
//! ```text
//! Planner (params, spawn_blocking)
//!     ├─▶ PatternLifecycle ─┐
//!     └─▶ InstanceGenerator ┴─▶ RecurrenceStore ─▶ Database (SQLite)
//! ```
//!
//! - [`builder`]: configuration (database path, default horizon, clock)
//! - [`pattern_ops`]: pattern CRUD and activation
//! - [`instance_ops`]: listing and completing instances
//! - [`generate_ops`]: generation and dry-run previews
//!
//! # Examples
//!
//! ```rust,no_run
//! use cadence_core::{
//!     models::RecurrenceType,
//!     params::{CreatePattern, GenerateInstances},
//!     PlannerBuilder,
//! };
//! use jiff::civil::date;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = PlannerBuilder::new()
//!     .with_database_path("cadence.db")
//!     .build()
//!     .await?;
//!
//! let mut params = CreatePattern::new("Water plants", RecurrenceType::Daily, date(2024, 1, 1));
//! params.interval_value = 2;
//! let pattern = planner.create_pattern(&params).await?;
//!
//! let report = planner
//!     .generate_pattern_instances(&GenerateInstances::with_days_ahead(pattern.id, 10))
//!     .await?;
//! println!("{report}");
//! # Ok(())
//! # }
//! ```

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use jiff::{civil::Date, Zoned};
use tokio::task;

use crate::{
    db::Database,
    error::{CadenceError, Result},
};

pub mod builder;
pub mod generate_ops;
pub mod instance_ops;
pub mod pattern_ops;


pub use builder::PlannerBuilder;

/// Main interface for managing patterns and generating their instances.
#[derive(Debug, Clone)]
pub struct Planner {
    pub(crate) db_path: PathBuf,
    busy_timeout: Duration,
    default_days_ahead: u32,
    fixed_today: Option<Date>,
}

impl Planner {
    pub(crate) fn new(
        db_path: PathBuf,
        busy_timeout: Duration,
        default_days_ahead: u32,
        fixed_today: Option<Date>,
    ) -> Self {
        Self {
            db_path,
            busy_timeout,
            default_days_ahead,
            fixed_today,
        }
    }

    /// Path of the SQLite database file.
    pub fn database_path(&self) -> &Path {
        &self.db_path
    }

    /// Horizon used when a caller does not specify one.
    pub fn default_days_ahead(&self) -> u32 {
        self.default_days_ahead
    }

    /// The date generation treats as today: the pinned date if one was
    /// configured, otherwise the current date in the system time zone.
    pub fn today(&self) -> Date {
        self.fixed_today.unwrap_or_else(|| Zoned::now().date())
    }

    /// Runs `op` against a fresh connection on the blocking thread pool.
    pub(crate) async fn with_database<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();
        let busy_timeout = self.busy_timeout;

        task::spawn_blocking(move || {
            let mut db = Database::with_busy_timeout(&db_path, busy_timeout)?;
            op(&mut db)
        })
        .await
        .map_err(|e| CadenceError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}
