//! The datastore seam consumed by the generator and lifecycle operations.
//!
//! [`crate::db::Database`] is the SQLite implementation. Anything that can
//! fetch patterns, report existing due dates and insert instances with
//! per-row conflict signaling can stand in for it.

use std::collections::BTreeSet;

use jiff::civil::Date;

use crate::{
    error::Result,
    models::{
        InstanceFilter, NewPattern, NewTaskInstance, PatternFilter, PatternSummary,
        RecurrencePattern, TaskInstance, UpdateInstanceRequest,
    },
};

/// Result of inserting one instance in a batch.
#[derive(Debug, Clone, PartialEq)]
pub enum InsertOutcome {
    /// The row was inserted.
    Created(TaskInstance),
    /// An instance for the same pattern and due date already exists.
    Conflict { pattern_id: u64, due_date: Date },
}

impl InsertOutcome {
    /// Returns true if the row was inserted.
    pub fn is_created(&self) -> bool {
        matches!(self, InsertOutcome::Created(_))
    }
}

/// CRUD and query primitives over patterns and their instances.
pub trait RecurrenceStore {
    /// Persists a validated pattern and returns it with its assigned id.
    fn insert_pattern(&mut self, pattern: &NewPattern) -> Result<RecurrencePattern>;

    /// Fetches a pattern by id.
    fn get_pattern(&self, id: u64) -> Result<Option<RecurrencePattern>>;

    /// Lists patterns matching `filter` in creation order.
    fn list_patterns(&self, filter: &PatternFilter) -> Result<Vec<RecurrencePattern>>;

    /// Writes every mutable field of `pattern` back and bumps `updated_at`.
    ///
    /// Returns None if the pattern no longer exists.
    fn save_pattern(&mut self, pattern: &RecurrencePattern) -> Result<Option<RecurrencePattern>>;

    /// Flips the active flag. Returns None if the pattern does not exist.
    fn set_pattern_active(&mut self, id: u64, active: bool)
        -> Result<Option<RecurrencePattern>>;

    /// Deletes a pattern together with its instances.
    ///
    /// Returns the deleted pattern, or None if it did not exist.
    fn delete_pattern(&mut self, id: u64) -> Result<Option<RecurrencePattern>>;

    /// Patterns with instance counts.
    fn pattern_summaries(&self, filter: &PatternFilter) -> Result<Vec<PatternSummary>>;

    /// Due dates of every instance the pattern has produced.
    fn instance_due_dates(&self, pattern_id: u64) -> Result<BTreeSet<Date>>;

    /// Inserts instances in order, reporting a uniqueness collision per row
    /// instead of failing the batch.
    fn insert_instances(&mut self, instances: &[NewTaskInstance]) -> Result<Vec<InsertOutcome>>;

    /// Fetches an instance by id.
    fn get_instance(&self, id: u64) -> Result<Option<TaskInstance>>;

    /// Lists instances matching `filter` in due-date order.
    fn list_instances(&self, filter: &InstanceFilter) -> Result<Vec<TaskInstance>>;

    /// Updates an instance's own fields. Returns None if it does not exist.
    fn update_instance(
        &mut self,
        id: u64,
        request: &UpdateInstanceRequest,
    ) -> Result<Option<TaskInstance>>;
}

#[cfg(test)]
pub(crate) mod memory;
