//! Recurrence pattern model definition.

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

use super::{RecurrenceRule, TaskTemplate};

/// A recurring-task definition: the template copied onto every instance plus
/// the rule that decides when instances occur.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecurrencePattern {
    /// Unique identifier for the pattern
    pub id: u64,

    /// Owner of the pattern (opaque to the core)
    #[serde(default)]
    pub owner_id: String,

    /// Template fields snapshotted onto generated instances
    #[serde(flatten)]
    pub template: TaskTemplate,

    /// Recurrence rule and bounds
    #[serde(flatten)]
    pub rule: RecurrenceRule,

    /// First date the current rule applies to, set when the rule is edited
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_effective_from: Option<Date>,

    /// Inactive patterns keep their instances but generate no new ones
    pub is_active: bool,

    /// Timestamp when the pattern was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the pattern was last modified (UTC)
    pub updated_at: Timestamp,
}

impl RecurrencePattern {
    /// Earliest date generation may produce for this pattern.
    pub fn generation_floor(&self) -> Date {
        match self.rule_effective_from {
            Some(from) if from > self.rule.start_date => from,
            _ => self.rule.start_date,
        }
    }
}

/// A validated pattern payload that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPattern {
    pub owner_id: String,
    pub template: TaskTemplate,
    pub rule: RecurrenceRule,
    pub is_active: bool,
}
