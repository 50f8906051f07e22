//! Instance batch inserts and queries.

use std::collections::BTreeSet;

use jiff::{civil::Date, Timestamp};
use rusqlite::{params, Connection, OptionalExtension, Row, ToSql, TransactionBehavior};

use super::utils::{
    date_column, enum_column, id_column, is_unique_violation, json_column, optional_id_column,
    optional_timestamp_column, timestamp_column, to_json,
};
use crate::{
    error::{CadenceError, DatabaseResultExt, Result},
    models::{
        CompletionFilter, InstanceFilter, NewTaskInstance, TaskInstance, TaskTemplate,
        UpdateInstanceRequest,
    },
    store::InsertOutcome,
};

const INSTANCE_COLUMNS: &str = "id, pattern_id, title, description, category_id, priority, estimated_duration, tags, notes, due_date, completed, actual_time, completed_at, created_at, updated_at";
const INSERT_INSTANCE_SQL: &str = "INSERT INTO task_instances (pattern_id, title, description, category_id, priority, estimated_duration, tags, notes, due_date, completed, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, 0, ?10, ?11)";
const SELECT_DUE_DATES_SQL: &str =
    "SELECT due_date FROM task_instances WHERE pattern_id = ?1 ORDER BY due_date";
const UPDATE_INSTANCE_SQL: &str = "UPDATE task_instances SET completed = ?1, actual_time = ?2, completed_at = ?3, updated_at = ?4 WHERE id = ?5";

impl super::Database {
    /// Helper function to construct an instance from a row selected with
    /// `INSTANCE_COLUMNS`
    fn build_instance_from_row(row: &Row) -> rusqlite::Result<TaskInstance> {
        Ok(TaskInstance {
            id: id_column(row, 0)?,
            pattern_id: id_column(row, 1)?,
            template: TaskTemplate {
                title: row.get(2)?,
                description: row.get(3)?,
                category_id: optional_id_column(row, 4)?,
                priority: enum_column(row, 5)?,
                estimated_duration: row.get(6)?,
                tags: json_column(row, 7)?,
                notes: row.get(8)?,
            },
            due_date: date_column(row, 9)?,
            completed: row.get(10)?,
            actual_time: row.get(11)?,
            completed_at: optional_timestamp_column(row, 12)?,
            created_at: timestamp_column(row, 13)?,
            updated_at: timestamp_column(row, 14)?,
        })
    }

    fn load_instance(conn: &Connection, id: u64) -> rusqlite::Result<Option<TaskInstance>> {
        conn.query_row(
            &format!("SELECT {INSTANCE_COLUMNS} FROM task_instances WHERE id = ?1"),
            params![id as i64],
            Self::build_instance_from_row,
        )
        .optional()
    }

    /// Due dates of every instance of a pattern.
    pub fn query_due_dates(&self, pattern_id: u64) -> Result<BTreeSet<Date>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_DUE_DATES_SQL)
            .db_context("Failed to prepare query")?;

        let due_dates = stmt
            .query_map(params![pattern_id as i64], |row| date_column(row, 0))
            .db_context("Failed to query due dates")?
            .collect::<rusqlite::Result<BTreeSet<_>>>()
            .db_context("Failed to fetch due dates")?;

        Ok(due_dates)
    }

    /// Inserts a batch of instances inside one IMMEDIATE transaction.
    ///
    /// A row that collides with an existing (pattern, due date) pair is
    /// reported as [`InsertOutcome::Conflict`] and the batch continues. Any
    /// other failure rolls the whole batch back.
    pub fn insert_instance_batch(
        &mut self,
        instances: &[NewTaskInstance],
    ) -> Result<Vec<InsertOutcome>> {
        if instances.is_empty() {
            return Ok(Vec::new());
        }

        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now();
        let now_str = now.to_string();
        let mut outcomes = Vec::with_capacity(instances.len());

        {
            let mut stmt = tx
                .prepare(INSERT_INSTANCE_SQL)
                .db_context("Failed to prepare instance insert")?;

            for instance in instances {
                let template = &instance.template;
                let inserted = stmt.execute(params![
                    instance.pattern_id as i64,
                    &template.title,
                    template.description.as_deref(),
                    template.category_id.map(|id| id as i64),
                    template.priority.as_str(),
                    template.estimated_duration,
                    to_json(&template.tags)?,
                    template.notes.as_deref(),
                    instance.due_date.to_string(),
                    &now_str,
                    &now_str
                ]);

                match inserted {
                    Ok(_) => outcomes.push(InsertOutcome::Created(TaskInstance {
                        id: tx.last_insert_rowid() as u64,
                        pattern_id: instance.pattern_id,
                        template: template.clone(),
                        due_date: instance.due_date,
                        completed: false,
                        actual_time: None,
                        completed_at: None,
                        created_at: now,
                        updated_at: now,
                    })),
                    Err(e) if is_unique_violation(&e) => {
                        log::warn!(
                            "Instance for pattern {} on {} already exists, skipping",
                            instance.pattern_id,
                            instance.due_date
                        );
                        outcomes.push(InsertOutcome::Conflict {
                            pattern_id: instance.pattern_id,
                            due_date: instance.due_date,
                        });
                    }
                    Err(e) => {
                        return Err(CadenceError::database(format!(
                            "Failed to insert instance for pattern {} on {}",
                            instance.pattern_id, instance.due_date
                        ))
                        .with_source(e));
                    }
                }
            }
        }

        tx.commit().db_context("Failed to commit instance batch")?;

        Ok(outcomes)
    }

    /// Retrieves an instance by its ID.
    pub fn fetch_instance(&self, id: u64) -> Result<Option<TaskInstance>> {
        Self::load_instance(&self.connection, id).db_context("Failed to query instance")
    }

    /// Lists instances with optional filtering, ordered by due date.
    pub fn query_instances(&self, filter: &InstanceFilter) -> Result<Vec<TaskInstance>> {
        let mut query = format!("SELECT {INSTANCE_COLUMNS} FROM task_instances");

        let mut conditions = Vec::new();
        let mut params_vec: Vec<Box<dyn ToSql>> = Vec::new();

        if let Some(pattern_id) = filter.pattern_id {
            conditions.push("pattern_id = ?");
            params_vec.push(Box::new(pattern_id as i64));
        }

        if let Some(completion) = filter.completion {
            conditions.push("completed = ?");
            params_vec.push(Box::new(completion == CompletionFilter::Completed));
        }

        if let Some(from) = filter.due_from {
            conditions.push("due_date >= ?");
            params_vec.push(Box::new(from.to_string()));
        }

        if let Some(until) = filter.due_until {
            conditions.push("due_date <= ?");
            params_vec.push(Box::new(until.to_string()));
        }

        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }

        query.push_str(" ORDER BY due_date, id");

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;

        let params_refs: Vec<&dyn ToSql> = params_vec.iter().map(|b| &**b).collect();

        let instances = stmt
            .query_map(&params_refs[..], Self::build_instance_from_row)
            .db_context("Failed to query instances")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to fetch instances")?;

        Ok(instances)
    }

    /// Updates an instance's completion state and actual time.
    /// Returns the updated instance, or None if it doesn't exist.
    pub fn update_instance_row(
        &mut self,
        id: u64,
        request: &UpdateInstanceRequest,
    ) -> Result<Option<TaskInstance>> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let Some(current) = Self::load_instance(&tx, id).db_context("Failed to query instance")?
        else {
            return Ok(None);
        };

        let now = Timestamp::now();
        let completed = request.completed.unwrap_or(current.completed);
        let completed_at = match (current.completed, completed) {
            (false, true) => Some(now),
            (_, false) => None,
            (true, true) => current.completed_at,
        };
        let actual_time = request.actual_time.unwrap_or(current.actual_time);

        tx.execute(
            UPDATE_INSTANCE_SQL,
            params![
                completed,
                actual_time,
                completed_at.map(|t| t.to_string()),
                now.to_string(),
                id as i64
            ],
        )
        .db_context("Failed to update instance")?;

        let updated = Self::load_instance(&tx, id).db_context("Failed to query updated instance")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(updated)
    }
}
