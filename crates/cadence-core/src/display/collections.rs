//! Collection wrapper types for displaying groups of domain objects.
//!
//! Each wrapper renders its items one after another and prints a short
//! message when empty.

use std::{fmt, ops::Index};

use jiff::civil::Date;

use super::datetime::DueDate;
use crate::{
    generator::GenerationReport,
    models::{PatternSummary, TaskInstance},
};

/// Newtype wrapper for displaying collections of pattern summaries.
///
/// # Examples
///
/// ```rust
/// use cadence_core::{
///     display::PatternSummaries,
///     models::{PatternSummary, RecurrenceRule, RecurrenceType},
/// };
/// use jiff::{civil::date, Timestamp};
///
/// let summary = PatternSummary {
///     id: 1,
///     title: "Water plants".to_string(),
///     rule: RecurrenceRule::new(RecurrenceType::Daily, date(2024, 1, 1)),
///     is_active: true,
///     updated_at: Timestamp::now(),
///     total_instances: 5,
///     completed_instances: 2,
///     last_due_date: Some(date(2024, 1, 9)),
/// };
///
/// let output = PatternSummaries(vec![summary]).to_string();
/// assert!(output.contains("Water plants"));
/// assert!(output.contains("every day"));
/// ```
#[derive(Debug)]
pub struct PatternSummaries(pub Vec<PatternSummary>);

impl PatternSummaries {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of pattern summaries in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Get an iterator over the pattern summaries.
    pub fn iter(&self) -> std::slice::Iter<'_, PatternSummary> {
        self.0.iter()
    }
}

impl Index<usize> for PatternSummaries {
    type Output = PatternSummary;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a PatternSummaries {
    type Item = &'a PatternSummary;
    type IntoIter = std::slice::Iter<'a, PatternSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for PatternSummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No recurrence patterns found.")
        } else {
            for summary in &self.0 {
                write!(f, "{summary}")?;
            }
            Ok(())
        }
    }
}

/// Newtype wrapper for displaying task instances in due-date order.
#[derive(Debug)]
pub struct Instances(pub Vec<TaskInstance>);

impl Instances {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of instances in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Get an iterator over the instances.
    pub fn iter(&self) -> std::slice::Iter<'_, TaskInstance> {
        self.0.iter()
    }
}

impl Index<usize> for Instances {
    type Output = TaskInstance;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a Instances {
    type Item = &'a TaskInstance;
    type IntoIter = std::slice::Iter<'a, TaskInstance>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Instances {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No instances found.")
        } else {
            for instance in &self.0 {
                write!(f, "{instance}")?;
            }
            Ok(())
        }
    }
}

/// Occurrence dates a pattern would produce, without creating anything.
#[derive(Debug)]
pub struct UpcomingDates {
    pub pattern_id: u64,
    pub title: String,
    pub dates: Vec<Date>,
}

impl fmt::Display for UpcomingDates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Upcoming for {} (ID: {})", self.title, self.pattern_id)?;
        writeln!(f)?;
        if self.dates.is_empty() {
            return writeln!(f, "No occurrences in range.");
        }
        for date in &self.dates {
            writeln!(f, "- {}", DueDate(date))?;
        }
        Ok(())
    }
}

/// Reports from generating several patterns at once.
#[derive(Debug)]
pub struct GenerationReports(pub Vec<GenerationReport>);

impl GenerationReports {
    /// Total instances created across all reports.
    pub fn total_created(&self) -> usize {
        self.0.iter().map(GenerationReport::created_count).sum()
    }
}

impl fmt::Display for GenerationReports {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No active patterns.");
        }

        writeln!(
            f,
            "Generated {} instance(s) across {} pattern(s)",
            self.total_created(),
            self.0.len()
        )?;
        writeln!(f)?;
        for report in &self.0 {
            write!(f, "- Pattern {}: {} created", report.pattern_id, report.created_count())?;
            if report.skipped_conflicts > 0 {
                write!(f, ", {} already present", report.skipped_conflicts)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
