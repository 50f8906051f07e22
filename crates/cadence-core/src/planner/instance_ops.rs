//! Instance operations for the Planner.

use super::Planner;
use crate::{
    display::{Instances, UpdateResult},
    error::{CadenceError, Result},
    models::{InstanceFilter, TaskInstance},
    params::{Id, ListInstances, UpdateInstance},
    store::RecurrenceStore,
};

impl Planner {
    /// Lists the instances of a pattern in due-date order.
    ///
    /// # Errors
    ///
    /// Returns `CadenceError::PatternNotFound` if the pattern does not exist.
    pub async fn list_instances(&self, params: &ListInstances) -> Result<Instances> {
        let filter = InstanceFilter::from(params);
        let pattern_id = params.pattern_id;

        let instances = self
            .with_database(move |db| {
                if db.get_pattern(pattern_id)?.is_none() {
                    return Err(CadenceError::PatternNotFound { id: pattern_id });
                }
                db.list_instances(&filter)
            })
            .await?;

        Ok(Instances(instances))
    }

    /// Retrieves an instance by its ID.
    pub async fn get_instance(&self, params: &Id) -> Result<Option<TaskInstance>> {
        let id = params.id;
        self.with_database(move |db| db.get_instance(id)).await
    }

    /// Marks an instance complete or pending and records the time spent.
    ///
    /// The template snapshot and due date of an instance never change.
    pub async fn update_instance(
        &self,
        params: &UpdateInstance,
    ) -> Result<UpdateResult<TaskInstance>> {
        let request = params.validate()?;
        let id = params.id;

        self.with_database(move |db| {
            let before = db
                .get_instance(id)?
                .ok_or(CadenceError::InstanceNotFound { id })?;
            let after = db
                .update_instance(id, &request)?
                .ok_or(CadenceError::InstanceNotFound { id })?;

            let mut changes = Vec::new();
            if before.completed != after.completed {
                changes.push(if after.completed {
                    "Marked complete".to_string()
                } else {
                    "Reopened".to_string()
                });
            }
            if before.actual_time != after.actual_time {
                changes.push(match after.actual_time {
                    Some(minutes) => format!("Recorded actual time of {minutes} min"),
                    None => "Cleared actual time".to_string(),
                });
            }

            Ok(UpdateResult::with_changes(after, changes))
        })
        .await
    }
}
