//! Result wrapper types for displaying operation outcomes.

use std::fmt;

use super::datetime::DueDate;
use crate::{
    generator::GenerationReport,
    models::{RecurrencePattern, TaskInstance},
};

/// Wrapper type for displaying the result of create operations.
///
/// # Examples
///
/// ```rust
/// use cadence_core::{
///     display::CreateResult,
///     models::{RecurrencePattern, RecurrenceRule, RecurrenceType, TaskTemplate},
/// };
/// use jiff::{civil::date, Timestamp};
///
/// let pattern = RecurrencePattern {
///     id: 1,
///     owner_id: String::new(),
///     template: TaskTemplate::titled("Pay rent"),
///     rule: RecurrenceRule::new(RecurrenceType::Monthly, date(2024, 1, 31)),
///     rule_effective_from: None,
///     is_active: true,
///     created_at: Timestamp::now(),
///     updated_at: Timestamp::now(),
/// };
///
/// let output = CreateResult::new(pattern).to_string();
/// assert!(output.contains("Created pattern with ID: 1"));
/// assert!(output.contains("every month on day 31"));
/// ```
#[derive(Debug)]
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    /// Create a new CreateResult wrapper.
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<RecurrencePattern> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created pattern with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of update operations, with the
/// list of changes that were applied.
#[derive(Debug)]
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    /// Create a new UpdateResult wrapper.
    pub fn new(resource: T) -> Self {
        Self {
            resource,
            changes: Vec::new(),
        }
    }

    /// Create an UpdateResult with a list of changes made.
    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }

    fn fmt_changes(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.changes.is_empty() {
            writeln!(f)?;
            writeln!(f, "No changes made.")?;
        } else {
            writeln!(f)?;
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }
        writeln!(f)
    }
}

impl fmt::Display for UpdateResult<RecurrencePattern> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated pattern with ID: {}", self.resource.id)?;
        self.fmt_changes(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for UpdateResult<TaskInstance> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated instance with ID: {}", self.resource.id)?;
        self.fmt_changes(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of delete operations.
#[derive(Debug)]
pub struct DeleteResult<T> {
    pub resource: T,
}

impl<T> DeleteResult<T> {
    /// Create a new DeleteResult wrapper.
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for DeleteResult<RecurrencePattern> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted pattern '{}' (ID: {}) and its instances",
            self.resource.template.title, self.resource.id
        )
    }
}

impl fmt::Display for GenerationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.inactive {
            return writeln!(
                f,
                "Pattern {} is inactive; no instances generated.",
                self.pattern_id
            );
        }

        write!(
            f,
            "Generated {} instance(s) for pattern {}",
            self.created_count(),
            self.pattern_id
        )?;
        if let Some(end) = self.horizon_end {
            write!(f, " (horizon: before {end})")?;
        }
        writeln!(f)?;

        if self.skipped_conflicts > 0 {
            writeln!(
                f,
                "Skipped {} date(s) already created by another run.",
                self.skipped_conflicts
            )?;
        }

        if !self.created.is_empty() {
            writeln!(f)?;
            for instance in &self.created {
                writeln!(f, "- {} (ID: {})", DueDate(&instance.due_date), instance.id)?;
            }
        }
        Ok(())
    }
}
