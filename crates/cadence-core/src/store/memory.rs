//! In-memory store used by unit tests of the generator and lifecycle code.

use std::collections::{BTreeMap, BTreeSet};

use jiff::{civil::Date, Timestamp};
use rusqlite::ffi;

use super::{InsertOutcome, RecurrenceStore};
use crate::{
    error::{CadenceError, Result},
    models::{
        CompletionFilter, InstanceFilter, NewPattern, NewTaskInstance, PatternFilter,
        PatternSummary, RecurrencePattern, TaskInstance, UpdateInstanceRequest,
    },
};

#[derive(Debug, Default)]
pub(crate) struct MemoryStore {
    patterns: BTreeMap<u64, RecurrencePattern>,
    instances: BTreeMap<u64, TaskInstance>,
    next_id: u64,
    /// Rows a competing writer lands between the due-date read and the batch
    pub racing: Vec<NewTaskInstance>,
    /// Fail the next batch insert as if the database were locked
    pub fail_next_insert: bool,
    pub insert_calls: usize,
}

impl MemoryStore {
    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn insert_one(&mut self, instance: &NewTaskInstance) -> InsertOutcome {
        let taken = self
            .instances
            .values()
            .any(|i| i.pattern_id == instance.pattern_id && i.due_date == instance.due_date);
        if taken {
            return InsertOutcome::Conflict {
                pattern_id: instance.pattern_id,
                due_date: instance.due_date,
            };
        }

        let now = Timestamp::now();
        let stored = TaskInstance {
            id: self.allocate_id(),
            pattern_id: instance.pattern_id,
            template: instance.template.clone(),
            due_date: instance.due_date,
            completed: false,
            actual_time: None,
            completed_at: None,
            created_at: now,
            updated_at: now,
        };
        self.instances.insert(stored.id, stored.clone());
        InsertOutcome::Created(stored)
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }
}

fn matches_pattern(filter: &PatternFilter, pattern: &RecurrencePattern) -> bool {
    filter.is_active.map_or(true, |active| pattern.is_active == active)
        && filter
            .owner_id
            .as_ref()
            .map_or(true, |owner| &pattern.owner_id == owner)
        && filter.title_contains.as_ref().map_or(true, |needle| {
            pattern
                .template
                .title
                .to_lowercase()
                .contains(&needle.to_lowercase())
        })
}

impl RecurrenceStore for MemoryStore {
    fn insert_pattern(&mut self, pattern: &NewPattern) -> Result<RecurrencePattern> {
        let now = Timestamp::now();
        let stored = RecurrencePattern {
            id: self.allocate_id(),
            owner_id: pattern.owner_id.clone(),
            template: pattern.template.clone(),
            rule: pattern.rule.clone(),
            rule_effective_from: None,
            is_active: pattern.is_active,
            created_at: now,
            updated_at: now,
        };
        self.patterns.insert(stored.id, stored.clone());
        Ok(stored)
    }

    fn get_pattern(&self, id: u64) -> Result<Option<RecurrencePattern>> {
        Ok(self.patterns.get(&id).cloned())
    }

    fn list_patterns(&self, filter: &PatternFilter) -> Result<Vec<RecurrencePattern>> {
        Ok(self
            .patterns
            .values()
            .filter(|p| matches_pattern(filter, p))
            .cloned()
            .collect())
    }

    fn save_pattern(&mut self, pattern: &RecurrencePattern) -> Result<Option<RecurrencePattern>> {
        Ok(self.patterns.get_mut(&pattern.id).map(|stored| {
            *stored = RecurrencePattern {
                updated_at: Timestamp::now(),
                ..pattern.clone()
            };
            stored.clone()
        }))
    }

    fn set_pattern_active(
        &mut self,
        id: u64,
        active: bool,
    ) -> Result<Option<RecurrencePattern>> {
        Ok(self.patterns.get_mut(&id).map(|stored| {
            stored.is_active = active;
            stored.updated_at = Timestamp::now();
            stored.clone()
        }))
    }

    fn delete_pattern(&mut self, id: u64) -> Result<Option<RecurrencePattern>> {
        let removed = self.patterns.remove(&id);
        if removed.is_some() {
            self.instances.retain(|_, i| i.pattern_id != id);
        }
        Ok(removed)
    }

    fn pattern_summaries(&self, filter: &PatternFilter) -> Result<Vec<PatternSummary>> {
        Ok(self
            .list_patterns(filter)?
            .into_iter()
            .map(|pattern| {
                let mine: Vec<_> = self
                    .instances
                    .values()
                    .filter(|i| i.pattern_id == pattern.id)
                    .collect();
                let completed = mine.iter().filter(|i| i.completed).count() as u32;
                let last_due = mine.iter().map(|i| i.due_date).max();
                PatternSummary::from_pattern(pattern, mine.len() as u32, completed, last_due)
            })
            .collect())
    }

    fn instance_due_dates(&self, pattern_id: u64) -> Result<BTreeSet<Date>> {
        Ok(self
            .instances
            .values()
            .filter(|i| i.pattern_id == pattern_id)
            .map(|i| i.due_date)
            .collect())
    }

    fn insert_instances(&mut self, instances: &[NewTaskInstance]) -> Result<Vec<InsertOutcome>> {
        self.insert_calls += 1;

        if std::mem::take(&mut self.fail_next_insert) {
            return Err(CadenceError::database("Failed to begin transaction").with_source(
                rusqlite::Error::SqliteFailure(ffi::Error::new(ffi::SQLITE_BUSY), None),
            ));
        }

        for racer in std::mem::take(&mut self.racing) {
            self.insert_one(&racer);
        }

        Ok(instances.iter().map(|i| self.insert_one(i)).collect())
    }

    fn get_instance(&self, id: u64) -> Result<Option<TaskInstance>> {
        Ok(self.instances.get(&id).cloned())
    }

    fn list_instances(&self, filter: &InstanceFilter) -> Result<Vec<TaskInstance>> {
        let mut found: Vec<_> = self
            .instances
            .values()
            .filter(|i| filter.pattern_id.map_or(true, |id| i.pattern_id == id))
            .filter(|i| {
                filter
                    .completion
                    .map_or(true, |c| i.completed == (c == CompletionFilter::Completed))
            })
            .filter(|i| filter.due_from.map_or(true, |from| i.due_date >= from))
            .filter(|i| filter.due_until.map_or(true, |until| i.due_date <= until))
            .cloned()
            .collect();
        found.sort_by_key(|i| (i.due_date, i.id));
        Ok(found)
    }

    fn update_instance(
        &mut self,
        id: u64,
        request: &UpdateInstanceRequest,
    ) -> Result<Option<TaskInstance>> {
        Ok(self.instances.get_mut(&id).map(|stored| {
            if let Some(completed) = request.completed {
                if completed != stored.completed {
                    stored.completed_at = completed.then(Timestamp::now);
                }
                stored.completed = completed;
            }
            if let Some(actual_time) = request.actual_time {
                stored.actual_time = actual_time;
            }
            stored.updated_at = Timestamp::now();
            stored.clone()
        }))
    }
}
