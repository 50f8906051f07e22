//! Task template fields shared by patterns and their instances.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CadenceError, Result};

/// Type-safe enumeration of task priorities.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" | "normal" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "urgent" => Ok(Priority::Urgent),
            _ => Err(format!("Invalid priority: {s}")),
        }
    }
}

impl Priority {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }
}

/// Fields copied from a pattern onto every instance it generates.
///
/// Instances hold a snapshot taken at generation time; editing the pattern
/// later never rewrites instances that already exist.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct TaskTemplate {
    /// Title of the task
    pub title: String,

    /// Detailed description of the task
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Category the task is filed under
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<u64>,

    /// Task priority
    #[serde(default)]
    pub priority: Priority,

    /// Estimated duration in minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_duration: Option<u32>,

    /// Free-form tags
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Free-form notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl TaskTemplate {
    /// Creates a template with just a title and default priority.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Checks the template invariants.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(CadenceError::invalid_input("title").with_reason("Title cannot be empty"));
        }

        if let Some(tag) = self.tags.iter().find(|t| t.trim().is_empty()) {
            return Err(CadenceError::invalid_input("tags")
                .with_reason(format!("Tags cannot be blank (got {tag:?})")));
        }

        Ok(())
    }
}
