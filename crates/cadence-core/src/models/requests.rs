//! Request types for updating models.

use jiff::civil::Date;
use std::collections::BTreeSet;

use super::{Priority, RecurrencePattern, RecurrenceType};

/// Partial update of a pattern.
///
/// Nullable fields use `Option<Option<T>>`: the outer `None` leaves the field
/// untouched, `Some(None)` clears it.
#[derive(Debug, Default, Clone)]
pub struct UpdatePatternRequest {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub category_id: Option<Option<u64>>,
    pub priority: Option<Priority>,
    pub estimated_duration: Option<Option<u32>>,
    pub tags: Option<Vec<String>>,
    pub notes: Option<Option<String>>,
    pub recurrence_type: Option<RecurrenceType>,
    pub interval_value: Option<u32>,
    pub days_of_week: Option<BTreeSet<u8>>,
    pub day_of_month: Option<Option<u8>>,
    pub start_date: Option<Date>,
    pub end_date: Option<Option<Date>>,
    pub max_occurrences: Option<Option<u32>>,
}

impl UpdatePatternRequest {
    /// Returns true if the request changes nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.category_id.is_none()
            && self.priority.is_none()
            && self.estimated_duration.is_none()
            && self.tags.is_none()
            && self.notes.is_none()
            && self.recurrence_type.is_none()
            && self.interval_value.is_none()
            && self.days_of_week.is_none()
            && self.day_of_month.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.max_occurrences.is_none()
    }

    /// Applies the request to `pattern` in place and returns a description
    /// of each field that actually changed.
    pub fn apply_to(&self, pattern: &mut RecurrencePattern) -> Vec<String> {
        let mut changes = Vec::new();
        let template = &mut pattern.template;
        let rule = &mut pattern.rule;

        if let Some(title) = &self.title {
            if *title != template.title {
                template.title = title.clone();
                changes.push("Updated title".to_string());
            }
        }
        if let Some(description) = &self.description {
            if *description != template.description {
                template.description = description.clone();
                changes.push("Updated description".to_string());
            }
        }
        if let Some(category_id) = self.category_id {
            if category_id != template.category_id {
                template.category_id = category_id;
                changes.push("Updated category".to_string());
            }
        }
        if let Some(priority) = self.priority {
            if priority != template.priority {
                template.priority = priority;
                changes.push(format!("Changed priority to {}", priority.as_str()));
            }
        }
        if let Some(duration) = self.estimated_duration {
            if duration != template.estimated_duration {
                template.estimated_duration = duration;
                changes.push("Updated estimated duration".to_string());
            }
        }
        if let Some(tags) = &self.tags {
            if *tags != template.tags {
                template.tags = tags.clone();
                changes.push("Updated tags".to_string());
            }
        }
        if let Some(notes) = &self.notes {
            if *notes != template.notes {
                template.notes = notes.clone();
                changes.push("Updated notes".to_string());
            }
        }
        if let Some(recurrence_type) = self.recurrence_type {
            if recurrence_type != rule.recurrence_type {
                rule.recurrence_type = recurrence_type;
                changes.push(format!("Changed recurrence to {}", recurrence_type.as_str()));
            }
        }
        if let Some(interval) = self.interval_value {
            if interval != rule.interval_value {
                rule.interval_value = interval;
                changes.push(format!("Changed interval to {interval}"));
            }
        }
        if let Some(days) = &self.days_of_week {
            if *days != rule.days_of_week {
                rule.days_of_week = days.clone();
                changes.push("Updated days of week".to_string());
            }
        }
        if let Some(day) = self.day_of_month {
            if day != rule.day_of_month {
                rule.day_of_month = day;
                changes.push("Updated day of month".to_string());
            }
        }
        if let Some(start) = self.start_date {
            if start != rule.start_date {
                rule.start_date = start;
                changes.push(format!("Moved start date to {start}"));
            }
        }
        if let Some(end) = self.end_date {
            if end != rule.end_date {
                rule.end_date = end;
                changes.push(match end {
                    Some(end) => format!("Set end date to {end}"),
                    None => "Removed end date".to_string(),
                });
            }
        }
        if let Some(max) = self.max_occurrences {
            if max != rule.max_occurrences {
                rule.max_occurrences = max;
                changes.push(match max {
                    Some(max) => format!("Limited to {max} occurrences"),
                    None => "Removed occurrence limit".to_string(),
                });
            }
        }

        changes
    }
}

/// Partial update of an instance's own mutable fields.
#[derive(Debug, Default, Clone)]
pub struct UpdateInstanceRequest {
    pub completed: Option<bool>,
    pub actual_time: Option<Option<u32>>,
}
