//! Display implementations for domain models.
//!
//! Everything renders as markdown for the terminal renderer. Rules render as
//! a short English phrase, e.g. "every 2 weeks on Mon, Wed, Fri".

use std::fmt;

use super::datetime::{DueDate, LocalDateTime};
use crate::models::{
    PatternSummary, Priority, RecurrencePattern, RecurrenceRule, RecurrenceType, TaskInstance,
    TaskTemplate, WEEKDAY_NAMES,
};

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for RecurrenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl RecurrenceRule {
    fn fmt_cadence(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = self.recurrence_type.unit();
        match self.interval_value {
            1 => write!(f, "every {unit}")?,
            n => write!(f, "every {n} {unit}s")?,
        }

        let day = self.day_of_month.map_or(i16::from(self.start_date.day()), i16::from);
        match self.recurrence_type {
            RecurrenceType::Daily => Ok(()),
            RecurrenceType::Weekly if self.days_of_week.is_empty() => {
                write!(f, " on {}", self.start_date.strftime("%a"))
            }
            RecurrenceType::Weekly => {
                let names: Vec<&str> = self
                    .days_of_week
                    .iter()
                    .filter_map(|&d| WEEKDAY_NAMES.get(usize::from(d)).copied())
                    .collect();
                write!(f, " on {}", names.join(", "))
            }
            RecurrenceType::Monthly => write!(f, " on day {day}"),
            RecurrenceType::Yearly => {
                write!(f, " on {} {day}", self.start_date.strftime("%b"))
            }
        }
    }
}

impl fmt::Display for RecurrenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_cadence(f)?;
        write!(f, ", from {}", self.start_date)?;
        if let Some(end) = self.end_date {
            write!(f, " until {end}")?;
        }
        if let Some(max) = self.max_occurrences {
            write!(f, ", at most {max} times")?;
        }
        Ok(())
    }
}

impl TaskTemplate {
    /// Metadata bullet lines shared by patterns and instances.
    fn fmt_metadata(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "- Priority: {}", self.priority)?;
        if let Some(category) = self.category_id {
            writeln!(f, "- Category: {category}")?;
        }
        if let Some(minutes) = self.estimated_duration {
            writeln!(f, "- Estimate: {minutes} min")?;
        }
        if !self.tags.is_empty() {
            writeln!(f, "- Tags: {}", self.tags.join(", "))?;
        }
        Ok(())
    }

    fn fmt_body(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(desc) = &self.description {
            writeln!(f)?;
            writeln!(f, "{desc}")?;
        }
        if let Some(notes) = &self.notes {
            writeln!(f)?;
            writeln!(f, "#### Notes")?;
            writeln!(f)?;
            writeln!(f, "{notes}")?;
        }
        Ok(())
    }
}

impl fmt::Display for RecurrencePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.template.title)?;
        writeln!(f)?;

        writeln!(f, "- Schedule: {}", self.rule)?;
        writeln!(
            f,
            "- Status: {}",
            if self.is_active { "active" } else { "inactive" }
        )?;
        if let Some(from) = self.rule_effective_from {
            writeln!(f, "- Current schedule since: {from}")?;
        }
        self.template.fmt_metadata(f)?;
        if !self.owner_id.is_empty() {
            writeln!(f, "- Owner: {}", self.owner_id)?;
        }
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        self.template.fmt_body(f)
    }
}

impl fmt::Display for TaskInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let check = if self.completed { "[x]" } else { "[ ]" };
        writeln!(
            f,
            "### {check} {}. {} ({})",
            self.id,
            self.template.title,
            DueDate(&self.due_date)
        )?;
        writeln!(f)?;

        writeln!(f, "- Pattern: {}", self.pattern_id)?;
        self.template.fmt_metadata(f)?;
        if let Some(minutes) = self.actual_time {
            writeln!(f, "- Actual time: {minutes} min")?;
        }
        if let Some(done) = &self.completed_at {
            writeln!(f, "- Completed: {}", LocalDateTime(done))?;
        }

        self.template.fmt_body(f)?;
        writeln!(f)
    }
}

impl fmt::Display for PatternSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let paused = if self.is_active { "" } else { " [inactive]" };
        writeln!(f, "## {} (ID: {}){paused}", self.title, self.id)?;
        writeln!(f)?;

        writeln!(f, "- **Schedule**: {}", self.rule)?;
        if self.total_instances > 0 {
            writeln!(
                f,
                "- **Instances**: {} generated, {} completed, {} pending",
                self.total_instances,
                self.completed_instances,
                self.pending_instances()
            )?;
        } else {
            writeln!(f, "- **Instances**: none generated yet")?;
        }
        if let Some(last) = &self.last_due_date {
            writeln!(f, "- **Generated through**: {}", DueDate(last))?;
        }
        writeln!(f)
    }
}
