//! Materializes missing instances of a pattern up to a rolling horizon.
//!
//! [`InstanceGenerator::generate`] loads the pattern, reads the due dates it
//! has already produced, expands the rule over
//! `[generation floor, today + days_ahead)` and inserts only the dates that
//! are missing. Running it twice with the same inputs creates nothing the
//! second time.
//!
//! A uniqueness collision on a single row means another writer created that
//! instance first; it is counted in
//! [`GenerationReport::skipped_conflicts`] and the batch keeps going. Every
//! other store error propagates unchanged.

use jiff::civil::Date;
use serde::Serialize;

use crate::{
    error::{CadenceError, Result},
    models::{NewTaskInstance, PatternFilter, TaskInstance},
    occurrence::{pending_occurrences, Window},
    store::{InsertOutcome, RecurrenceStore},
};

/// Outcome of one generation run for one pattern.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationReport {
    /// Pattern the run was for
    pub pattern_id: u64,
    /// Instances inserted by this run, in due-date order
    pub created: Vec<TaskInstance>,
    /// Dates another writer materialized first
    pub skipped_conflicts: usize,
    /// Exclusive end of the generation window; None when nothing was expanded
    pub horizon_end: Option<Date>,
    /// True when the pattern is inactive and generation was skipped
    pub inactive: bool,
}

impl GenerationReport {
    /// Report for a pattern that is inactive and therefore left untouched.
    pub fn inactive(pattern_id: u64) -> Self {
        Self {
            pattern_id,
            created: Vec::new(),
            skipped_conflicts: 0,
            horizon_end: None,
            inactive: true,
        }
    }

    /// Number of instances inserted by this run.
    pub fn created_count(&self) -> usize {
        self.created.len()
    }
}

/// Runs generation against a [`RecurrenceStore`].
pub struct InstanceGenerator<'a, S: RecurrenceStore + ?Sized> {
    store: &'a mut S,
}

impl<'a, S: RecurrenceStore + ?Sized> InstanceGenerator<'a, S> {
    pub fn new(store: &'a mut S) -> Self {
        Self { store }
    }

    /// Generates the missing instances of one pattern.
    ///
    /// # Errors
    ///
    /// Returns `CadenceError::PatternNotFound` for an unknown id,
    /// `CadenceError::InvalidInput` if the horizon leaves the supported
    /// calendar range, and any store error as-is.
    pub fn generate(
        &mut self,
        pattern_id: u64,
        days_ahead: u32,
        today: Date,
    ) -> Result<GenerationReport> {
        let pattern = self
            .store
            .get_pattern(pattern_id)?
            .ok_or(CadenceError::PatternNotFound { id: pattern_id })?;

        if !pattern.is_active {
            log::debug!("Pattern {pattern_id} is inactive, skipping generation");
            return Ok(GenerationReport::inactive(pattern_id));
        }

        let window = Window::horizon(pattern.generation_floor(), today, days_ahead)?;
        let existing = self.store.instance_due_dates(pattern_id)?;
        let dates = pending_occurrences(&pattern.rule, window, &existing);

        log::debug!(
            "Pattern {pattern_id}: {} existing, {} pending in [{}, {})",
            existing.len(),
            dates.len(),
            window.from,
            window.until
        );

        let mut report = GenerationReport {
            pattern_id,
            created: Vec::with_capacity(dates.len()),
            skipped_conflicts: 0,
            horizon_end: Some(window.until),
            inactive: false,
        };

        if dates.is_empty() {
            return Ok(report);
        }

        let batch: Vec<NewTaskInstance> = dates
            .into_iter()
            .map(|due| NewTaskInstance::new(pattern_id, &pattern.template, due))
            .collect();

        for outcome in self.store.insert_instances(&batch)? {
            match outcome {
                InsertOutcome::Created(instance) => report.created.push(instance),
                InsertOutcome::Conflict { .. } => report.skipped_conflicts += 1,
            }
        }

        if report.skipped_conflicts > 0 {
            log::warn!(
                "Pattern {pattern_id}: {} date(s) were generated concurrently and skipped",
                report.skipped_conflicts
            );
        }
        log::info!(
            "Generated {} instance(s) for pattern {pattern_id} up to {}",
            report.created_count(),
            window.until
        );

        Ok(report)
    }

    /// Generates for every active pattern, in creation order.
    pub fn generate_all_active(
        &mut self,
        days_ahead: u32,
        today: Date,
    ) -> Result<Vec<GenerationReport>> {
        let patterns = self.store.list_patterns(&PatternFilter::active())?;

        patterns
            .iter()
            .map(|pattern| self.generate(pattern.id, days_ahead, today))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use jiff::civil::date;

    use super::*;
    use crate::{
        models::{NewPattern, RecurrenceRule, RecurrenceType, TaskTemplate},
        store::memory::MemoryStore,
    };

    fn seed(store: &mut MemoryStore, rule: RecurrenceRule) -> u64 {
        store
            .insert_pattern(&NewPattern {
                owner_id: "owner".into(),
                template: TaskTemplate::titled("Water plants"),
                rule,
                is_active: true,
            })
            .unwrap()
            .id
    }

    fn every_other_day() -> RecurrenceRule {
        let mut rule = RecurrenceRule::new(RecurrenceType::Daily, date(2024, 1, 1));
        rule.interval_value = 2;
        rule
    }

    #[test]
    fn test_generates_daily_scenario() {
        let mut store = MemoryStore::default();
        let id = seed(&mut store, every_other_day());

        let report = InstanceGenerator::new(&mut store)
            .generate(id, 10, date(2024, 1, 1))
            .unwrap();

        let dates: Vec<_> = report.created.iter().map(|i| i.due_date).collect();
        assert_eq!(
            dates,
            vec![
                date(2024, 1, 1),
                date(2024, 1, 3),
                date(2024, 1, 5),
                date(2024, 1, 7),
                date(2024, 1, 9),
            ]
        );
        assert_eq!(report.horizon_end, Some(date(2024, 1, 11)));
        assert!(report.created.iter().all(|i| i.template.title == "Water plants"));
    }

    #[test]
    fn test_second_run_is_noop() {
        let mut store = MemoryStore::default();
        let id = seed(&mut store, every_other_day());

        let mut generator = InstanceGenerator::new(&mut store);
        assert_eq!(generator.generate(id, 10, date(2024, 1, 1)).unwrap().created_count(), 5);

        let again = generator.generate(id, 10, date(2024, 1, 1)).unwrap();
        assert_eq!(again.created_count(), 0);
        assert_eq!(again.skipped_conflicts, 0);

        // Nothing pending means no insert round-trip at all
        assert_eq!(store.insert_calls, 1);
    }

    #[test]
    fn test_extending_horizon_only_adds_new_dates() {
        let mut store = MemoryStore::default();
        let id = seed(&mut store, every_other_day());

        let mut generator = InstanceGenerator::new(&mut store);
        generator.generate(id, 4, date(2024, 1, 1)).unwrap();
        let later = generator.generate(id, 10, date(2024, 1, 1)).unwrap();

        let dates: Vec<_> = later.created.iter().map(|i| i.due_date).collect();
        assert_eq!(dates, vec![date(2024, 1, 5), date(2024, 1, 7), date(2024, 1, 9)]);
        assert_eq!(store.instance_count(), 5);
    }

    #[test]
    fn test_conflicts_are_skipped_and_counted() {
        let mut store = MemoryStore::default();
        let id = seed(&mut store, every_other_day());
        let template = TaskTemplate::titled("Water plants");
        store.racing = vec![
            NewTaskInstance::new(id, &template, date(2024, 1, 3)),
            NewTaskInstance::new(id, &template, date(2024, 1, 7)),
        ];

        let report = InstanceGenerator::new(&mut store)
            .generate(id, 10, date(2024, 1, 1))
            .unwrap();

        assert_eq!(report.created_count(), 3);
        assert_eq!(report.skipped_conflicts, 2);
        assert_eq!(store.instance_count(), 5);
    }

    #[test]
    fn test_store_errors_propagate() {
        let mut store = MemoryStore::default();
        let id = seed(&mut store, every_other_day());
        store.fail_next_insert = true;

        let err = InstanceGenerator::new(&mut store)
            .generate(id, 10, date(2024, 1, 1))
            .unwrap_err();
        assert!(matches!(err, CadenceError::Database { .. }));
        assert_eq!(store.instance_count(), 0);

        // Retrying after a transient failure completes the work
        let report = InstanceGenerator::new(&mut store)
            .generate(id, 10, date(2024, 1, 1))
            .unwrap();
        assert_eq!(report.created_count(), 5);
    }

    #[test]
    fn test_unknown_pattern() {
        let mut store = MemoryStore::default();
        let err = InstanceGenerator::new(&mut store)
            .generate(42, 30, date(2024, 1, 1))
            .unwrap_err();
        assert!(matches!(err, CadenceError::PatternNotFound { id: 42 }));
    }

    #[test]
    fn test_inactive_pattern_is_noop() {
        let mut store = MemoryStore::default();
        let id = seed(&mut store, every_other_day());
        store.set_pattern_active(id, false).unwrap();

        let report = InstanceGenerator::new(&mut store)
            .generate(id, 10, date(2024, 1, 1))
            .unwrap();
        assert!(report.inactive);
        assert_eq!(report.created_count(), 0);
        assert_eq!(store.insert_calls, 0);
    }

    #[test]
    fn test_cap_counts_all_generated_instances() {
        let mut rule = RecurrenceRule::new(RecurrenceType::Daily, date(2024, 1, 1));
        rule.max_occurrences = Some(4);

        let mut store = MemoryStore::default();
        let id = seed(&mut store, rule);

        let mut generator = InstanceGenerator::new(&mut store);
        assert_eq!(generator.generate(id, 3, date(2024, 1, 1)).unwrap().created_count(), 3);
        assert_eq!(generator.generate(id, 30, date(2024, 1, 1)).unwrap().created_count(), 1);
        assert_eq!(generator.generate(id, 90, date(2024, 1, 1)).unwrap().created_count(), 0);
        assert_eq!(store.instance_count(), 4);
    }

    #[test]
    fn test_respects_rule_effective_from() {
        let mut store = MemoryStore::default();
        let id = seed(&mut store, every_other_day());

        let mut pattern = store.get_pattern(id).unwrap().unwrap();
        pattern.rule_effective_from = Some(date(2024, 1, 6));
        store.save_pattern(&pattern).unwrap();

        let report = InstanceGenerator::new(&mut store)
            .generate(id, 10, date(2024, 1, 1))
            .unwrap();
        let dates: Vec<_> = report.created.iter().map(|i| i.due_date).collect();
        assert_eq!(dates, vec![date(2024, 1, 7), date(2024, 1, 9)]);
    }

    #[test]
    fn test_generate_all_active_skips_inactive() {
        let mut store = MemoryStore::default();
        let first = seed(&mut store, every_other_day());
        let second = seed(
            &mut store,
            RecurrenceRule::new(RecurrenceType::Weekly, date(2024, 1, 1)),
        );
        let paused = seed(&mut store, every_other_day());
        store.set_pattern_active(paused, false).unwrap();

        let reports = InstanceGenerator::new(&mut store)
            .generate_all_active(14, date(2024, 1, 1))
            .unwrap();

        let ids: BTreeSet<_> = reports.iter().map(|r| r.pattern_id).collect();
        assert_eq!(ids, [first, second].into_iter().collect());
        assert_eq!(
            reports.iter().map(GenerationReport::created_count).sum::<usize>(),
            7 + 2
        );
        assert!(store.instance_due_dates(paused).unwrap().is_empty());
    }
}
