//! Pattern lifecycle: create, edit, pause/resume and delete.
//!
//! Template edits are prospective: instances already generated keep the
//! snapshot they were created with. Editing the cadence of a rule (type,
//! interval, weekdays, day of month or start date) records the date the new
//! rule takes effect, so generation never back-fills history under the new
//! rule.

use jiff::civil::Date;

use crate::{
    display::UpdateResult,
    error::{CadenceError, Result},
    models::{NewPattern, RecurrencePattern, UpdatePatternRequest},
    store::RecurrenceStore,
};

/// Lifecycle operations over a [`RecurrenceStore`].
pub struct PatternLifecycle<'a, S: RecurrenceStore + ?Sized> {
    store: &'a mut S,
}

impl<'a, S: RecurrenceStore + ?Sized> PatternLifecycle<'a, S> {
    pub fn new(store: &'a mut S) -> Self {
        Self { store }
    }

    /// Validates and persists a new pattern. No instances are generated.
    pub fn create(&mut self, pattern: &NewPattern) -> Result<RecurrencePattern> {
        pattern.template.validate()?;
        pattern.rule.validate()?;
        self.store.insert_pattern(pattern)
    }

    /// Applies a partial update and re-validates the merged pattern.
    ///
    /// `today` decides when an edited cadence starts applying: the later of
    /// the (possibly new) start date and today.
    pub fn update(
        &mut self,
        id: u64,
        request: &UpdatePatternRequest,
        today: Date,
    ) -> Result<UpdateResult<RecurrencePattern>> {
        let mut pattern = self
            .store
            .get_pattern(id)?
            .ok_or(CadenceError::PatternNotFound { id })?;

        let previous_rule = pattern.rule.clone();
        let mut changes = request.apply_to(&mut pattern);
        if changes.is_empty() {
            return Ok(UpdateResult::new(pattern));
        }

        pattern.template.validate()?;
        pattern.rule.validate()?;

        if previous_rule.cadence_differs(&pattern.rule) {
            let effective = pattern.rule.start_date.max(today);
            pattern.rule_effective_from = Some(effective);
            changes.push(format!("New schedule applies from {effective}"));
            log::debug!("Pattern {id} rule changed, effective from {effective}");
        }

        let saved = self
            .store
            .save_pattern(&pattern)?
            .ok_or(CadenceError::PatternNotFound { id })?;

        Ok(UpdateResult::with_changes(saved, changes))
    }

    /// Activates or deactivates a pattern. Existing instances are kept.
    pub fn set_active(&mut self, id: u64, active: bool) -> Result<RecurrencePattern> {
        let pattern = self
            .store
            .set_pattern_active(id, active)?
            .ok_or(CadenceError::PatternNotFound { id })?;

        log::debug!(
            "Pattern {id} {}",
            if active { "activated" } else { "deactivated" }
        );
        Ok(pattern)
    }

    /// Deletes a pattern and every instance it generated.
    pub fn delete(&mut self, id: u64) -> Result<RecurrencePattern> {
        self.store
            .delete_pattern(id)?
            .ok_or(CadenceError::PatternNotFound { id })
    }
}
