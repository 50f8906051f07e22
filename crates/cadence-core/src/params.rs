//! Parameter structures for Cadence operations
//!
//! These structures are shared by every interface (the CLI today) and carry no
//! framework-specific derives beyond serde. Interface layers define their own
//! argument types and convert into these with `From` impls:
//!
//! ```text
//! CLI Args (clap) ──▶ Core Params (serde) ──▶ validate() ──▶ Planner
//! ```
//!
//! Enumerated values (recurrence type, priority) travel as strings and are
//! parsed by the `validate` methods, so every interface reports the same
//! validation errors.

use std::{collections::BTreeSet, str::FromStr};

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::{
    error::{CadenceError, Result},
    models::{
        CompletionFilter, NewPattern, Priority, RecurrenceRule, RecurrenceType, TaskTemplate,
        UpdateInstanceRequest, UpdatePatternRequest,
    },
};

/// Default generation horizon in days.
pub const DEFAULT_DAYS_AHEAD: u32 = 30;

/// Largest accepted generation horizon in days (about ten years).
pub const MAX_DAYS_AHEAD: u32 = 3660;

/// Generic parameters for operations requiring just an ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: u64,
}

/// Parameters for creating a recurrence pattern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePattern {
    /// Owner of the pattern
    #[serde(default)]
    pub owner_id: String,
    /// Title copied onto every instance (required)
    pub title: String,
    pub description: Option<String>,
    pub category_id: Option<u64>,
    /// 'low', 'medium', 'high' or 'urgent'; defaults to 'medium'
    pub priority: Option<String>,
    /// Estimated duration in minutes
    pub estimated_duration: Option<u32>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub notes: Option<String>,
    /// 'daily', 'weekly', 'monthly' or 'yearly'
    pub recurrence_type: String,
    /// Every N units; defaults to 1
    #[serde(default = "default_interval")]
    pub interval_value: u32,
    /// Weekday numbers, 0 = Sunday (weekly only)
    #[serde(default)]
    pub days_of_week: Vec<u8>,
    /// Day of month 1-31 (monthly/yearly only)
    pub day_of_month: Option<u8>,
    pub start_date: Date,
    pub end_date: Option<Date>,
    pub max_occurrences: Option<u32>,
    /// Whether the pattern starts active; defaults to true
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_interval() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

impl CreatePattern {
    /// Creates parameters for a pattern with the given title, type and start.
    pub fn new(
        title: impl Into<String>,
        recurrence_type: RecurrenceType,
        start_date: Date,
    ) -> Self {
        Self {
            owner_id: String::new(),
            title: title.into(),
            description: None,
            category_id: None,
            priority: None,
            estimated_duration: None,
            tags: Vec::new(),
            notes: None,
            recurrence_type: recurrence_type.as_str().to_string(),
            interval_value: 1,
            days_of_week: Vec::new(),
            day_of_month: None,
            start_date,
            end_date: None,
            max_occurrences: None,
            is_active: true,
        }
    }

    /// Validate the payload and convert it into a persistable pattern.
    ///
    /// # Errors
    ///
    /// * `CadenceError::InvalidInput` - unknown recurrence type or priority,
    ///   or any template/rule invariant violation
    pub fn validate(&self) -> Result<NewPattern> {
        let recurrence_type = parse_recurrence_type(&self.recurrence_type)?;
        let priority = self
            .priority
            .as_deref()
            .map(parse_priority)
            .transpose()?
            .unwrap_or_default();

        let template = TaskTemplate {
            title: self.title.trim().to_string(),
            description: non_blank(self.description.as_deref()),
            category_id: self.category_id,
            priority,
            estimated_duration: self.estimated_duration,
            tags: self.tags.iter().map(|t| t.trim().to_string()).collect(),
            notes: non_blank(self.notes.as_deref()),
        };
        template.validate()?;

        let rule = RecurrenceRule {
            recurrence_type,
            interval_value: self.interval_value,
            days_of_week: self.days_of_week.iter().copied().collect(),
            day_of_month: self.day_of_month,
            start_date: self.start_date,
            end_date: self.end_date,
            max_occurrences: self.max_occurrences,
        };
        rule.validate()?;

        Ok(NewPattern {
            owner_id: self.owner_id.clone(),
            template,
            rule,
            is_active: self.is_active,
        })
    }
}

/// Parameters for updating an existing pattern.
///
/// Only provided fields change. Empty strings clear description and notes;
/// the `clear_*` flags remove optional bounds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePattern {
    /// Pattern ID to update (required)
    pub id: u64,
    pub title: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<u64>,
    pub priority: Option<String>,
    pub estimated_duration: Option<u32>,
    pub tags: Option<Vec<String>>,
    pub notes: Option<String>,
    pub recurrence_type: Option<String>,
    pub interval_value: Option<u32>,
    pub days_of_week: Option<Vec<u8>>,
    pub day_of_month: Option<u8>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub max_occurrences: Option<u32>,
    #[serde(default)]
    pub clear_end_date: bool,
    #[serde(default)]
    pub clear_max_occurrences: bool,
}

impl UpdatePattern {
    /// Validate field formats and convert into an update request.
    ///
    /// Invariants spanning several fields (end before start, for instance)
    /// are checked against the merged pattern by the lifecycle layer.
    pub fn validate(&self) -> Result<UpdatePatternRequest> {
        if self.end_date.is_some() && self.clear_end_date {
            return Err(CadenceError::invalid_input("end_date")
                .with_reason("Cannot both set and clear the end date"));
        }
        if self.max_occurrences.is_some() && self.clear_max_occurrences {
            return Err(CadenceError::invalid_input("max_occurrences")
                .with_reason("Cannot both set and clear the occurrence limit"));
        }

        let end_date = if self.clear_end_date {
            Some(None)
        } else {
            self.end_date.map(Some)
        };
        let max_occurrences = if self.clear_max_occurrences {
            Some(None)
        } else {
            self.max_occurrences.map(Some)
        };

        Ok(UpdatePatternRequest {
            title: self.title.as_ref().map(|t| t.trim().to_string()),
            description: self.description.as_deref().map(|d| non_blank(Some(d))),
            category_id: self.category_id.map(Some),
            priority: self.priority.as_deref().map(parse_priority).transpose()?,
            estimated_duration: self.estimated_duration.map(Some),
            tags: self
                .tags
                .as_ref()
                .map(|tags| tags.iter().map(|t| t.trim().to_string()).collect()),
            notes: self.notes.as_deref().map(|n| non_blank(Some(n))),
            recurrence_type: self
                .recurrence_type
                .as_deref()
                .map(parse_recurrence_type)
                .transpose()?,
            interval_value: self.interval_value,
            days_of_week: self
                .days_of_week
                .as_ref()
                .map(|days| days.iter().copied().collect::<BTreeSet<u8>>()),
            day_of_month: self.day_of_month.map(Some),
            start_date: self.start_date,
            end_date,
            max_occurrences,
        })
    }
}

/// Parameters for permanently deleting a pattern.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeletePattern {
    /// ID of the pattern to delete
    pub id: u64,
    /// Must be true; deletion also removes every generated instance
    #[serde(default)]
    pub confirmed: bool,
}

/// Parameters for activating or deactivating a pattern.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SetActive {
    pub id: u64,
    pub active: bool,
}

/// Parameters for listing patterns.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListPatterns {
    /// Show inactive patterns instead of active ones
    #[serde(default)]
    pub inactive: bool,
    /// Restrict to one owner
    pub owner_id: Option<String>,
}

/// Parameters for generating instances of one pattern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateInstances {
    pub pattern_id: u64,
    /// Horizon length in days from today (exclusive)
    #[serde(default = "default_days_ahead")]
    pub days_ahead: u32,
}

fn default_days_ahead() -> u32 {
    DEFAULT_DAYS_AHEAD
}

impl GenerateInstances {
    /// Generation parameters using the default horizon.
    pub fn new(pattern_id: u64) -> Self {
        Self {
            pattern_id,
            days_ahead: DEFAULT_DAYS_AHEAD,
        }
    }

    /// Generation parameters with an explicit horizon.
    pub fn with_days_ahead(pattern_id: u64, days_ahead: u32) -> Self {
        Self {
            pattern_id,
            days_ahead,
        }
    }

    /// Validate the horizon length.
    pub fn validate(&self) -> Result<()> {
        validate_days_ahead(self.days_ahead)
    }
}

/// Checks that a horizon length is within the accepted range.
pub fn validate_days_ahead(days_ahead: u32) -> Result<()> {
    if days_ahead > MAX_DAYS_AHEAD {
        return Err(CadenceError::invalid_input("days_ahead").with_reason(format!(
            "Horizon of {days_ahead} days exceeds the maximum of {MAX_DAYS_AHEAD}"
        )));
    }
    Ok(())
}

/// Parameters for listing the instances of a pattern.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListInstances {
    pub pattern_id: u64,
    pub completion: Option<CompletionFilter>,
    pub due_from: Option<Date>,
    pub due_until: Option<Date>,
}

/// Parameters for updating an instance's own fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateInstance {
    pub id: u64,
    pub completed: Option<bool>,
    /// Actual time spent in minutes
    pub actual_time: Option<u32>,
}

impl UpdateInstance {
    /// Validate the update and convert it into a request.
    pub fn validate(&self) -> Result<UpdateInstanceRequest> {
        if self.completed.is_none() && self.actual_time.is_none() {
            return Err(CadenceError::invalid_input("completed")
                .with_reason("Nothing to update: provide 'completed' or 'actual_time'"));
        }
        Ok(UpdateInstanceRequest {
            completed: self.completed,
            actual_time: self.actual_time.map(Some),
        })
    }
}

fn parse_recurrence_type(value: &str) -> Result<RecurrenceType> {
    RecurrenceType::from_str(value).map_err(|_| {
        CadenceError::invalid_input("recurrence_type").with_reason(format!(
            "Invalid recurrence type: {value}. Must be 'daily', 'weekly', 'monthly', or 'yearly'"
        ))
    })
}

fn parse_priority(value: &str) -> Result<Priority> {
    Priority::from_str(value).map_err(|_| {
        CadenceError::invalid_input("priority").with_reason(format!(
            "Invalid priority: {value}. Must be 'low', 'medium', 'high', or 'urgent'"
        ))
    })
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}
