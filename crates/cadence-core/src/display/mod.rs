//! Display formatting for models and operation results.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! collections and operation outcomes are wrapped in newtypes so the same
//! data can be rendered differently per context. Everything renders as
//! markdown, which the CLI passes through its terminal renderer.
//!
//! ```rust
//! use cadence_core::display::OperationStatus;
//!
//! let status = OperationStatus::success("Pattern 3 activated".to_string());
//! assert_eq!(status.to_string(), "Success: Pattern 3 activated\n");
//! ```
//!
//! - [`collections`]: PatternSummaries, Instances, UpcomingDates,
//!   GenerationReports
//! - [`results`]: CreateResult, UpdateResult, DeleteResult and the
//!   generation report
//! - [`status`]: OperationStatus
//! - [`datetime`]: LocalDateTime, DueDate

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{GenerationReports, Instances, PatternSummaries, UpcomingDates};
pub use datetime::{DueDate, LocalDateTime};
pub use results::{CreateResult, DeleteResult, UpdateResult};
pub use status::OperationStatus;
