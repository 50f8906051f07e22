//! Data models for recurrence patterns and task instances.
//!
//! A [`RecurrencePattern`] pairs a [`TaskTemplate`] with a
//! [`RecurrenceRule`]. Generation copies the template onto each
//! [`TaskInstance`] as a snapshot, so later edits to the pattern never
//! rewrite instances that already exist.
//!
//! Display implementations for these models live in
//! [`crate::display::models`].

pub mod filters;
pub mod instance;
pub mod pattern;
pub mod recurrence;
pub mod requests;
pub mod summary;
pub mod template;

#[cfg(test)]
mod tests;

pub use filters::{CompletionFilter, InstanceFilter, PatternFilter};
pub use instance::{NewTaskInstance, TaskInstance};
pub use pattern::{NewPattern, RecurrencePattern};
pub use recurrence::{parse_weekday, RecurrenceRule, RecurrenceType, WEEKDAY_NAMES};
pub use requests::{UpdateInstanceRequest, UpdatePatternRequest};
pub use summary::PatternSummary;
pub use template::{Priority, TaskTemplate};
