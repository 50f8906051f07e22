//! Generation operations for the Planner.

use super::Planner;
use crate::{
    display::{GenerationReports, UpcomingDates},
    error::{CadenceError, Result},
    generator::{GenerationReport, InstanceGenerator},
    occurrence::{pending_occurrences, Window},
    params::{validate_days_ahead, GenerateInstances},
    store::RecurrenceStore,
};

impl Planner {
    /// Creates the missing instances of one pattern up to
    /// `today + days_ahead` (exclusive). Safe to call repeatedly and
    /// concurrently; dates that already have an instance are skipped.
    ///
    /// # Errors
    ///
    /// Returns `CadenceError::PatternNotFound` for an unknown pattern. An
    /// inactive pattern is not an error: the report has `inactive` set and
    /// creates nothing.
    pub async fn generate_pattern_instances(
        &self,
        params: &GenerateInstances,
    ) -> Result<GenerationReport> {
        params.validate()?;
        let GenerateInstances {
            pattern_id,
            days_ahead,
        } = *params;
        let today = self.today();

        self.with_database(move |db| {
            InstanceGenerator::new(db).generate(pattern_id, days_ahead, today)
        })
        .await
    }

    /// Generates for every active pattern. Uses the configured default
    /// horizon when `days_ahead` is None.
    pub async fn generate_all(&self, days_ahead: Option<u32>) -> Result<GenerationReports> {
        let days_ahead = days_ahead.unwrap_or(self.default_days_ahead());
        validate_days_ahead(days_ahead)?;
        let today = self.today();

        let reports = self
            .with_database(move |db| {
                InstanceGenerator::new(db).generate_all_active(days_ahead, today)
            })
            .await?;

        Ok(GenerationReports(reports))
    }

    /// Dates that generation would create right now, without creating them.
    pub async fn preview_generation(&self, params: &GenerateInstances) -> Result<UpcomingDates> {
        params.validate()?;
        let GenerateInstances {
            pattern_id,
            days_ahead,
        } = *params;
        let today = self.today();

        self.with_database(move |db| {
            let pattern = db
                .get_pattern(pattern_id)?
                .ok_or(CadenceError::PatternNotFound { id: pattern_id })?;

            let dates = if pattern.is_active {
                let window = Window::horizon(pattern.generation_floor(), today, days_ahead)?;
                let existing = db.instance_due_dates(pattern_id)?;
                pending_occurrences(&pattern.rule, window, &existing)
            } else {
                Vec::new()
            };

            Ok(UpcomingDates {
                pattern_id,
                title: pattern.template.title,
                dates,
            })
        })
        .await
    }
}
