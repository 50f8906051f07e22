//! Pattern summary types and functionality.

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

use super::{RecurrencePattern, RecurrenceRule};

/// Summary information about a pattern with instance statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternSummary {
    /// Pattern ID
    pub id: u64,
    /// Title of the pattern
    pub title: String,
    /// Recurrence rule, for describing the cadence
    pub rule: RecurrenceRule,
    /// Whether the pattern still generates instances
    pub is_active: bool,
    /// Last update timestamp
    pub updated_at: Timestamp,
    /// Total number of generated instances
    pub total_instances: u32,
    /// Number of completed instances
    pub completed_instances: u32,
    /// Latest due date among generated instances
    pub last_due_date: Option<Date>,
}

impl PatternSummary {
    /// Create a PatternSummary from a pattern and its instance statistics
    pub fn from_pattern(
        pattern: RecurrencePattern,
        total_instances: u32,
        completed_instances: u32,
        last_due_date: Option<Date>,
    ) -> Self {
        Self {
            id: pattern.id,
            title: pattern.template.title,
            rule: pattern.rule,
            is_active: pattern.is_active,
            updated_at: pattern.updated_at,
            total_instances,
            completed_instances,
            last_due_date,
        }
    }

    /// Number of instances not yet completed.
    pub fn pending_instances(&self) -> u32 {
        self.total_instances.saturating_sub(self.completed_instances)
    }
}
