//! Core library for Cadence, a recurring-task engine.
//!
//! A recurrence pattern pairs a task template with a rule (daily, weekly,
//! monthly or yearly, with an interval, optional weekday or day-of-month
//! constraints, and start/end/count bounds). Generation expands the rule
//! over a rolling horizon and materializes one task instance per occurrence
//! date, idempotently: re-running it never duplicates an instance, and
//! concurrent runs are reconciled by the store's uniqueness constraint.
//!
//! # Layers
//!
//! - [`occurrence`]: the pure date expansion, no I/O
//! - [`generator`] and [`lifecycle`]: business rules over a
//!   [`store::RecurrenceStore`]
//! - [`db`]: the SQLite store
//! - [`planner`]: the async facade interface layers use
//! - [`display`]: markdown rendering of models and results
//!
//! # Quick Start
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
//!     .with_database_path("test.db")
//!     .build()
//!     .await?;
//!
//! let mut params = CreatePattern::new("Team sync", RecurrenceType::Weekly, date(2024, 1, 1));
//! params.days_of_week = vec![1, 3, 5];
//! let pattern = planner.create_pattern(&params).await?;
//!
//! let report = planner
//!     .generate_pattern_instances(&GenerateInstances::with_days_ahead(pattern.id, 14))
//!     .await?;
//! println!("{report}");
//! # Ok(())
//! # }
//! ```

pub mod db;
pub mod display;
pub mod error;
pub mod generator;
pub mod lifecycle;
pub mod models;
pub mod occurrence;
pub mod params;
pub mod planner;
pub mod store;

// Re-export commonly used types
pub use db::Database;
pub use display::{
    CreateResult, DeleteResult, GenerationReports, Instances, OperationStatus, PatternSummaries,
    UpcomingDates, UpdateResult,
};
pub use error::{CadenceError, Result};
pub use generator::{GenerationReport, InstanceGenerator};
pub use lifecycle::PatternLifecycle;
pub use models::{
    CompletionFilter, Priority, RecurrencePattern, RecurrenceRule, RecurrenceType, TaskInstance,
    TaskTemplate,
};
pub use params::{
    CreatePattern, DeletePattern, GenerateInstances, Id, ListInstances, ListPatterns, SetActive,
    UpdateInstance, UpdatePattern,
};
pub use planner::{Planner, PlannerBuilder};
pub use store::{InsertOutcome, RecurrenceStore};
