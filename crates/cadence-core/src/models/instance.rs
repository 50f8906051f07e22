//! Task instance model definition.

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

use super::TaskTemplate;

/// One concrete, dated task materialized from a pattern.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskInstance {
    /// Unique identifier for the instance
    pub id: u64,

    /// ID of the pattern that generated this instance
    pub pattern_id: u64,

    /// Template snapshot taken at generation time
    #[serde(flatten)]
    pub template: TaskTemplate,

    /// Concrete occurrence date
    pub due_date: Date,

    /// Whether the task has been completed
    #[serde(default)]
    pub completed: bool,

    /// Actual time spent in minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_time: Option<u32>,

    /// When the instance was marked complete (UTC)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<Timestamp>,

    /// Timestamp when the instance was generated (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the instance was last updated (UTC)
    pub updated_at: Timestamp,
}

/// An instance that has been planned but not yet persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTaskInstance {
    pub pattern_id: u64,
    pub template: TaskTemplate,
    pub due_date: Date,
}

impl NewTaskInstance {
    /// Snapshot `template` for the occurrence on `due_date`.
    pub fn new(pattern_id: u64, template: &TaskTemplate, due_date: Date) -> Self {
        Self {
            pattern_id,
            template: template.clone(),
            due_date,
        }
    }
}
