//! Recurrence rule definition and validation.

use std::{collections::BTreeSet, str::FromStr};

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::error::{CadenceError, Result};

/// Weekday names indexed by their Sunday-zero number.
pub const WEEKDAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Type-safe enumeration of recurrence frequencies.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceType {
    /// Every N days
    #[default]
    Daily,

    /// Every N weeks, optionally on a set of weekdays
    Weekly,

    /// Every N months on a fixed day of the month
    Monthly,

    /// Every N years on a fixed month and day
    Yearly,
}

impl FromStr for RecurrenceType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" => Ok(RecurrenceType::Daily),
            "weekly" => Ok(RecurrenceType::Weekly),
            "monthly" => Ok(RecurrenceType::Monthly),
            "yearly" | "annually" => Ok(RecurrenceType::Yearly),
            _ => Err(format!("Invalid recurrence type: {s}")),
        }
    }
}

impl RecurrenceType {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            RecurrenceType::Daily => "daily",
            RecurrenceType::Weekly => "weekly",
            RecurrenceType::Monthly => "monthly",
            RecurrenceType::Yearly => "yearly",
        }
    }

    /// Singular unit name used when describing the rule.
    pub fn unit(&self) -> &'static str {
        match self {
            RecurrenceType::Daily => "day",
            RecurrenceType::Weekly => "week",
            RecurrenceType::Monthly => "month",
            RecurrenceType::Yearly => "year",
        }
    }
}

/// The recurrence rule of a pattern: frequency, constraints and bounds.
///
/// `days_of_week` uses Sunday-zero numbering (0 = Sunday, 6 = Saturday) and
/// is only consulted for weekly rules. `day_of_month` is only consulted for
/// monthly and yearly rules.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecurrenceRule {
    /// Frequency of the rule
    pub recurrence_type: RecurrenceType,

    /// Every N units (always at least 1)
    pub interval_value: u32,

    /// Weekdays for weekly rules
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub days_of_week: BTreeSet<u8>,

    /// Day of month for monthly/yearly rules (1-31)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_month: Option<u8>,

    /// First possible occurrence
    pub start_date: Date,

    /// Inclusive upper bound on occurrence dates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<Date>,

    /// Cap on the total number of instances ever generated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_occurrences: Option<u32>,
}

impl RecurrenceRule {
    /// Creates a rule with interval 1 and no constraints or bounds.
    pub fn new(recurrence_type: RecurrenceType, start_date: Date) -> Self {
        Self {
            recurrence_type,
            interval_value: 1,
            days_of_week: BTreeSet::new(),
            day_of_month: None,
            start_date,
            end_date: None,
            max_occurrences: None,
        }
    }

    /// Checks every rule invariant.
    ///
    /// # Errors
    ///
    /// Returns `CadenceError::InvalidInput` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.interval_value < 1 {
            return Err(CadenceError::invalid_input("interval_value")
                .with_reason("Interval must be at least 1"));
        }

        if let Some(end) = self.end_date {
            if end < self.start_date {
                return Err(CadenceError::invalid_input("end_date").with_reason(format!(
                    "End date {end} is before start date {}",
                    self.start_date
                )));
            }
        }

        if let Some(day) = self.day_of_month {
            if !(1..=31).contains(&day) {
                return Err(CadenceError::invalid_input("day_of_month")
                    .with_reason(format!("Day of month {day} is outside 1-31")));
            }
        }

        if let Some(&day) = self.days_of_week.iter().find(|&&d| d > 6) {
            return Err(CadenceError::invalid_input("days_of_week").with_reason(format!(
                "Weekday {day} is outside 0-6 (0 = Sunday)"
            )));
        }

        if self.max_occurrences == Some(0) {
            return Err(CadenceError::invalid_input("max_occurrences")
                .with_reason("Maximum occurrences must be at least 1 when set"));
        }

        Ok(())
    }

    /// Returns true when the cadence (not just the bounds) of `other` differs.
    ///
    /// End date and occurrence cap changes only narrow or widen the series;
    /// everything else changes which dates the rule produces.
    pub fn cadence_differs(&self, other: &RecurrenceRule) -> bool {
        self.recurrence_type != other.recurrence_type
            || self.interval_value != other.interval_value
            || self.days_of_week != other.days_of_week
            || self.day_of_month != other.day_of_month
            || self.start_date != other.start_date
    }
}

/// Parses a weekday token: a number 0-6 or an English name/abbreviation.
pub fn parse_weekday(token: &str) -> Result<u8> {
    let token = token.trim();
    if let Ok(n) = token.parse::<u8>() {
        if n <= 6 {
            return Ok(n);
        }
    }

    let lower = token.to_lowercase();
    WEEKDAY_NAMES
        .iter()
        .position(|name| lower.starts_with(&name.to_lowercase()))
        .map(|i| i as u8)
        .ok_or_else(|| {
            CadenceError::invalid_input("days_of_week")
                .with_reason(format!("Unrecognized weekday: {token}"))
        })
}
