//! Pure occurrence-date expansion.
//!
//! Nothing in this module touches the datastore: given a [`RecurrenceRule`]
//! and a [`Window`], [`expand`] yields the ordered occurrence dates and
//! [`pending_occurrences`] diffs them against dates that already have an
//! instance. The same inputs always produce the same dates, which is what
//! makes re-running generation idempotent.
//!
//! # Expansion rules
//!
//! | type      | candidates in period `k`                                         |
//! |-----------|------------------------------------------------------------------|
//! | daily     | `start + k * interval` days                                      |
//! | weekly    | `start + k * interval` weeks, or each listed weekday of the week |
//! |           | (Sunday-first) `k * interval` weeks after the start week         |
//! | monthly   | `day_of_month` (or the start day) of month `start + k * interval`|
//! | yearly    | start month, `day_of_month` (or the start day), every `interval` |
//!
//! Monthly and yearly days past the end of a short month clamp to its last
//! day rather than skipping the month.
//!
//! # Examples
//!
//! ```rust
//! use cadence_core::{
//!     models::{RecurrenceRule, RecurrenceType},
//!     occurrence::{expand, Window},
//! };
//! use jiff::civil::date;
//!
//! let mut rule = RecurrenceRule::new(RecurrenceType::Daily, date(2024, 1, 1));
//! rule.interval_value = 2;
//!
//! let window = Window::new(date(2024, 1, 1), date(2024, 1, 11));
//! let dates = expand(&rule, window).collect::<Vec<_>>();
//! assert_eq!(
//!     dates,
//!     vec![
//!         date(2024, 1, 1),
//!         date(2024, 1, 3),
//!         date(2024, 1, 5),
//!         date(2024, 1, 7),
//!         date(2024, 1, 9),
//!     ]
//! );
//! ```

use std::collections::BTreeSet;

use jiff::{civil::Date, Span};

use crate::{
    error::{CadenceError, Result},
    models::{RecurrenceRule, RecurrenceType},
};

/// Half-open date range `[from, until)` that expansion is restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    /// First date that may be produced
    pub from: Date,
    /// First date that may not be produced
    pub until: Date,
}

impl Window {
    /// Creates a window covering `[from, until)`.
    pub fn new(from: Date, until: Date) -> Self {
        Self { from, until }
    }

    /// The generation window for a horizon of `days_ahead` days from `today`.
    ///
    /// The window starts at `floor` (the pattern's start date or the date its
    /// current rule took effect) and ends, exclusively, at
    /// `today + days_ahead`.
    pub fn horizon(floor: Date, today: Date, days_ahead: u32) -> Result<Self> {
        let until = add_days(today, i64::from(days_ahead)).ok_or_else(|| {
            CadenceError::invalid_input("days_ahead").with_reason(format!(
                "Horizon of {days_ahead} days from {today} is outside the supported date range"
            ))
        })?;
        Ok(Self::new(floor, until))
    }

    /// Returns true if the window cannot contain any date.
    pub fn is_empty(&self) -> bool {
        self.from >= self.until
    }
}

/// Iterator over the occurrence dates of a rule inside a window.
///
/// Created by [`expand`]. Dates are strictly ascending.
#[derive(Debug, Clone)]
pub struct Occurrences<'a> {
    rule: &'a RecurrenceRule,
    anchor: Date,
    offsets: Vec<i64>,
    lower: Date,
    upper: Date,
    period: i64,
    slot: usize,
    exhausted: bool,
}

/// Expands `rule` into its occurrence dates within `window`.
///
/// The rule's own bounds apply on top of the window: nothing before
/// `start_date`, nothing after the inclusive `end_date`. The occurrence cap is
/// not applied here since it depends on what has already been materialized;
/// see [`pending_occurrences`].
pub fn expand(rule: &RecurrenceRule, window: Window) -> Occurrences<'_> {
    Occurrences::new(rule, window)
}

/// Occurrence dates in `window` that have no instance yet, capped so that
/// `existing.len()` plus the result never exceeds `max_occurrences`.
///
/// The cap counts every instance the pattern has ever produced, so the
/// number of new dates is limited to `max_occurrences - existing.len()`.
/// The earliest missing dates win.
pub fn pending_occurrences(
    rule: &RecurrenceRule,
    window: Window,
    existing: &BTreeSet<Date>,
) -> Vec<Date> {
    let remaining = match rule.max_occurrences {
        Some(max) => usize::try_from(max)
            .unwrap_or(usize::MAX)
            .saturating_sub(existing.len()),
        None => usize::MAX,
    };

    expand(rule, window)
        .filter(|date| !existing.contains(date))
        .take(remaining)
        .collect()
}

impl<'a> Occurrences<'a> {
    fn new(rule: &'a RecurrenceRule, window: Window) -> Self {
        let start = rule.start_date;
        let lower = window.from.max(start);
        let upper = match rule.end_date.and_then(|end| end.tomorrow().ok()) {
            Some(end_exclusive) => window.until.min(end_exclusive),
            None => window.until,
        };

        let by_weekday =
            rule.recurrence_type == RecurrenceType::Weekly && !rule.days_of_week.is_empty();
        let (anchor, offsets) = if by_weekday {
            let week_start = add_days(
                start,
                -i64::from(start.weekday().to_sunday_zero_offset()),
            )
            .unwrap_or(start);
            let offsets = rule.days_of_week.iter().map(|&d| i64::from(d)).collect();
            (week_start, offsets)
        } else {
            (start, vec![0])
        };

        let mut occurrences = Self {
            rule,
            anchor,
            offsets,
            lower,
            upper,
            period: 0,
            slot: 0,
            exhausted: lower >= upper || rule.interval_value == 0,
        };
        occurrences.period = occurrences.first_relevant_period();
        occurrences
    }

    /// Skips whole periods that end before the lower bound.
    fn first_relevant_period(&self) -> i64 {
        if self.exhausted {
            return 0;
        }

        let interval = i64::from(self.rule.interval_value);
        let elapsed_units = match self.rule.recurrence_type {
            RecurrenceType::Daily => days_between(self.anchor, self.lower),
            RecurrenceType::Weekly => days_between(self.anchor, self.lower) / 7,
            RecurrenceType::Monthly => month_index(self.lower) - month_index(self.anchor),
            RecurrenceType::Yearly => {
                i64::from(self.lower.year()) - i64::from(self.anchor.year())
            }
        };

        (elapsed_units / interval).max(0)
    }

    /// The candidate date for a period and weekday slot, or None once the
    /// arithmetic leaves the supported calendar range.
    fn candidate(&self, period: i64) -> Option<Date> {
        let step = period.checked_mul(i64::from(self.rule.interval_value))?;

        match self.rule.recurrence_type {
            RecurrenceType::Daily => add_days(self.anchor, step),
            RecurrenceType::Weekly => {
                let days = step.checked_mul(7)?.checked_add(self.offsets[self.slot])?;
                add_days(self.anchor, days)
            }
            RecurrenceType::Monthly => {
                let index = month_index(self.anchor).checked_add(step)?;
                let year = i16::try_from(index.div_euclid(12)).ok()?;
                let month = i8::try_from(index.rem_euclid(12) + 1).ok()?;
                clamped_date(year, month, self.target_day())
            }
            RecurrenceType::Yearly => {
                let year = i64::from(self.anchor.year()).checked_add(step)?;
                let year = i16::try_from(year).ok()?;
                clamped_date(year, self.anchor.month(), self.target_day())
            }
        }
    }

    fn target_day(&self) -> i8 {
        self.rule
            .day_of_month
            .and_then(|d| i8::try_from(d).ok())
            .unwrap_or_else(|| self.anchor.day())
    }

    fn advance(&mut self) {
        self.slot += 1;
        if self.slot >= self.offsets.len() {
            self.slot = 0;
            self.period += 1;
        }
    }
}

impl Iterator for Occurrences<'_> {
    type Item = Date;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.exhausted {
            let Some(date) = self.candidate(self.period) else {
                self.exhausted = true;
                break;
            };
            self.advance();

            if date >= self.upper {
                self.exhausted = true;
            } else if date >= self.lower {
                return Some(date);
            }
        }
        None
    }
}

fn add_days(date: Date, days: i64) -> Option<Date> {
    let span = Span::new().try_days(days).ok()?;
    date.checked_add(span).ok()
}

fn days_between(from: Date, to: Date) -> i64 {
    from.until(to)
        .map(|span| i64::from(span.get_days()))
        .unwrap_or(0)
}

fn month_index(date: Date) -> i64 {
    i64::from(date.year()) * 12 + i64::from(date.month()) - 1
}

fn clamped_date(year: i16, month: i8, day: i8) -> Option<Date> {
    let first = Date::new(year, month, 1).ok()?;
    let day = day.min(first.days_in_month());
    Date::new(year, month, day).ok()
}
