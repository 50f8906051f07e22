//! Pattern operations for the Planner.

use super::Planner;
use crate::{
    display::{PatternSummaries, UpdateResult},
    error::{CadenceError, Result},
    lifecycle::PatternLifecycle,
    models::{PatternFilter, RecurrencePattern},
    params::{CreatePattern, DeletePattern, Id, ListPatterns, SetActive, UpdatePattern},
    store::RecurrenceStore,
};

impl Planner {
    /// Validates and stores a new pattern. Nothing is generated until
    /// [`Planner::generate_pattern_instances`] is called.
    ///
    /// # Errors
    ///
    /// Returns `CadenceError::InvalidInput` before touching the database if
    /// any field is invalid.
    pub async fn create_pattern(&self, params: &CreatePattern) -> Result<RecurrencePattern> {
        let pattern = params.validate()?;

        self.with_database(move |db| PatternLifecycle::new(db).create(&pattern))
            .await
    }

    /// Retrieves a pattern by its ID.
    pub async fn get_pattern(&self, params: &Id) -> Result<Option<RecurrencePattern>> {
        let id = params.id;
        self.with_database(move |db| db.get_pattern(id)).await
    }

    /// Lists active (or, with `inactive`, inactive) patterns as summaries
    /// with instance counts.
    pub async fn list_patterns(&self, params: &ListPatterns) -> Result<PatternSummaries> {
        let filter = PatternFilter::from(params);
        let summaries = self
            .with_database(move |db| db.pattern_summaries(&filter))
            .await?;
        Ok(PatternSummaries(summaries))
    }

    /// Applies a partial update.
    ///
    /// Template changes only affect instances generated afterwards. Cadence
    /// changes take effect from the later of the start date and today.
    pub async fn update_pattern(
        &self,
        params: &UpdatePattern,
    ) -> Result<UpdateResult<RecurrencePattern>> {
        let request = params.validate()?;
        let id = params.id;
        let today = self.today();

        self.with_database(move |db| PatternLifecycle::new(db).update(id, &request, today))
            .await
    }

    /// Activates or deactivates a pattern. Instances are never touched.
    pub async fn set_pattern_active(&self, params: &SetActive) -> Result<RecurrencePattern> {
        let (id, active) = (params.id, params.active);
        self.with_database(move |db| PatternLifecycle::new(db).set_active(id, active))
            .await
    }

    /// Permanently deletes a pattern and all of its instances.
    ///
    /// # Errors
    ///
    /// Returns `CadenceError::InvalidInput` unless `confirmed` is set, and
    /// `CadenceError::PatternNotFound` if the pattern does not exist.
    pub async fn delete_pattern(&self, params: &DeletePattern) -> Result<RecurrencePattern> {
        if !params.confirmed {
            return Err(CadenceError::invalid_input("confirmed").with_reason(
                "Pattern deletion also removes its instances and requires explicit confirmation",
            ));
        }

        let id = params.id;
        let deleted = self
            .with_database(move |db| PatternLifecycle::new(db).delete(id))
            .await?;

        log::info!("Deleted pattern {id} ({})", deleted.template.title);
        Ok(deleted)
    }
}
