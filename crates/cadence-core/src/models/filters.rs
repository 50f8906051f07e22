//! Filter types for querying patterns and instances.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

/// Filter options for querying patterns.
#[derive(Debug, Clone, Default)]
pub struct PatternFilter {
    /// Filter by the active flag; None returns both
    pub is_active: Option<bool>,

    /// Filter by owner
    pub owner_id: Option<String>,

    /// Filter by pattern title (case-insensitive partial match)
    pub title_contains: Option<String>,
}

impl PatternFilter {
    /// Only patterns that can still generate instances.
    pub fn active() -> Self {
        Self {
            is_active: Some(true),
            ..Default::default()
        }
    }
}

/// Completion status filter options for instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionFilter {
    /// Instances marked complete
    Completed,

    /// Instances not yet complete
    Pending,
}

/// Filter options for querying instances.
#[derive(Debug, Clone, Default)]
pub struct InstanceFilter {
    /// Restrict to one pattern
    pub pattern_id: Option<u64>,

    /// Restrict by completion
    pub completion: Option<CompletionFilter>,

    /// Inclusive lower bound on due date
    pub due_from: Option<Date>,

    /// Inclusive upper bound on due date
    pub due_until: Option<Date>,
}

impl InstanceFilter {
    /// All instances of one pattern.
    pub fn for_pattern(pattern_id: u64) -> Self {
        Self {
            pattern_id: Some(pattern_id),
            ..Default::default()
        }
    }
}

impl From<&crate::params::ListPatterns> for PatternFilter {
    fn from(params: &crate::params::ListPatterns) -> Self {
        Self {
            is_active: Some(!params.inactive),
            owner_id: params.owner_id.clone(),
            ..Default::default()
        }
    }
}

impl From<&crate::params::ListInstances> for InstanceFilter {
    fn from(params: &crate::params::ListInstances) -> Self {
        Self {
            pattern_id: Some(params.pattern_id),
            completion: params.completion,
            due_from: params.due_from,
            due_until: params.due_until,
        }
    }
}
