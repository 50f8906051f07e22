//! Pattern CRUD operations and queries.

use jiff::Timestamp;
use rusqlite::{params, Connection, OptionalExtension, Row, ToSql};

use super::utils::{
    date_column, enum_column, id_column, json_column, optional_date_column,
    optional_id_column, timestamp_column, to_json,
};
use crate::{
    error::{DatabaseResultExt, Result},
    models::{
        NewPattern, PatternFilter, PatternSummary, RecurrencePattern, RecurrenceRule,
        TaskTemplate,
    },
};

const PATTERN_COLUMNS: &str = "id, owner_id, title, description, category_id, priority, estimated_duration, tags, notes, recurrence_type, interval_value, days_of_week, day_of_month, start_date, end_date, max_occurrences, rule_effective_from, is_active, created_at, updated_at";
const INSERT_PATTERN_SQL: &str = "INSERT INTO recurrence_patterns (owner_id, title, description, category_id, priority, estimated_duration, tags, notes, recurrence_type, interval_value, days_of_week, day_of_month, start_date, end_date, max_occurrences, is_active, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)";
const UPDATE_PATTERN_SQL: &str = "UPDATE recurrence_patterns SET title = ?1, description = ?2, category_id = ?3, priority = ?4, estimated_duration = ?5, tags = ?6, notes = ?7, recurrence_type = ?8, interval_value = ?9, days_of_week = ?10, day_of_month = ?11, start_date = ?12, end_date = ?13, max_occurrences = ?14, rule_effective_from = ?15, updated_at = ?16 WHERE id = ?17";
const UPDATE_PATTERN_ACTIVE_SQL: &str =
    "UPDATE recurrence_patterns SET is_active = ?1, updated_at = ?2 WHERE id = ?3";
const DELETE_PATTERN_INSTANCES_SQL: &str = "DELETE FROM task_instances WHERE pattern_id = ?1";
const DELETE_PATTERN_SQL: &str = "DELETE FROM recurrence_patterns WHERE id = ?1";

const SUMMARY_COLUMNS: &str = "id, title, recurrence_type, interval_value, days_of_week, day_of_month, start_date, end_date, max_occurrences, is_active, updated_at, total_instances, completed_instances, last_due_date";
const PATTERN_SUMMARIES_VIEW: &str = "pattern_summaries";

impl super::Database {
    /// Helper function to construct a pattern from a row selected with
    /// `PATTERN_COLUMNS`
    fn build_pattern_from_row(row: &Row) -> rusqlite::Result<RecurrencePattern> {
        Ok(RecurrencePattern {
            id: id_column(row, 0)?,
            owner_id: row.get(1)?,
            template: TaskTemplate {
                title: row.get(2)?,
                description: row.get(3)?,
                category_id: optional_id_column(row, 4)?,
                priority: enum_column(row, 5)?,
                estimated_duration: row.get(6)?,
                tags: json_column(row, 7)?,
                notes: row.get(8)?,
            },
            rule: RecurrenceRule {
                recurrence_type: enum_column(row, 9)?,
                interval_value: row.get(10)?,
                days_of_week: json_column(row, 11)?,
                day_of_month: row.get(12)?,
                start_date: date_column(row, 13)?,
                end_date: optional_date_column(row, 14)?,
                max_occurrences: row.get(15)?,
            },
            rule_effective_from: optional_date_column(row, 16)?,
            is_active: row.get(17)?,
            created_at: timestamp_column(row, 18)?,
            updated_at: timestamp_column(row, 19)?,
        })
    }

    /// Loads a pattern through any connection, including an open transaction.
    fn load_pattern(conn: &Connection, id: u64) -> rusqlite::Result<Option<RecurrencePattern>> {
        conn.query_row(
            &format!("SELECT {PATTERN_COLUMNS} FROM recurrence_patterns WHERE id = ?1"),
            params![id as i64],
            Self::build_pattern_from_row,
        )
        .optional()
    }

    /// Creates a new pattern from a validated payload.
    pub fn create_pattern(&mut self, pattern: &NewPattern) -> Result<RecurrencePattern> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now();
        let now_str = now.to_string();
        let template = &pattern.template;
        let rule = &pattern.rule;

        tx.execute(
            INSERT_PATTERN_SQL,
            params![
                &pattern.owner_id,
                &template.title,
                template.description.as_deref(),
                template.category_id.map(|id| id as i64),
                template.priority.as_str(),
                template.estimated_duration,
                to_json(&template.tags)?,
                template.notes.as_deref(),
                rule.recurrence_type.as_str(),
                rule.interval_value,
                to_json(&rule.days_of_week)?,
                rule.day_of_month,
                rule.start_date.to_string(),
                rule.end_date.map(|d| d.to_string()),
                rule.max_occurrences,
                pattern.is_active,
                &now_str,
                &now_str
            ],
        )
        .db_context("Failed to insert pattern")?;

        let id = tx.last_insert_rowid() as u64;

        tx.commit().db_context("Failed to commit transaction")?;

        log::debug!("Created pattern {id} ({})", rule.recurrence_type.as_str());

        Ok(RecurrencePattern {
            id,
            owner_id: pattern.owner_id.clone(),
            template: template.clone(),
            rule: rule.clone(),
            rule_effective_from: None,
            is_active: pattern.is_active,
            created_at: now,
            updated_at: now,
        })
    }

    /// Retrieves a pattern by its ID.
    pub fn fetch_pattern(&self, id: u64) -> Result<Option<RecurrencePattern>> {
        Self::load_pattern(&self.connection, id).db_context("Failed to query pattern")
    }

    /// Lists patterns with optional filtering, in creation order.
    pub fn query_patterns(&self, filter: &PatternFilter) -> Result<Vec<RecurrencePattern>> {
        let (clause, params_vec) = Self::pattern_conditions(filter);
        let query =
            format!("SELECT {PATTERN_COLUMNS} FROM recurrence_patterns{clause} ORDER BY id");

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;

        let params_refs: Vec<&dyn ToSql> = params_vec.iter().map(|b| &**b).collect();

        let patterns = stmt
            .query_map(&params_refs[..], Self::build_pattern_from_row)
            .db_context("Failed to query patterns")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to fetch patterns")?;

        Ok(patterns)
    }

    /// Lists pattern summaries with instance counts, in creation order.
    pub fn query_pattern_summaries(&self, filter: &PatternFilter) -> Result<Vec<PatternSummary>> {
        let (clause, params_vec) = Self::pattern_conditions(filter);
        let query =
            format!("SELECT {SUMMARY_COLUMNS} FROM {PATTERN_SUMMARIES_VIEW}{clause} ORDER BY id");

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;

        let params_refs: Vec<&dyn ToSql> = params_vec.iter().map(|b| &**b).collect();

        let summaries = stmt
            .query_map(&params_refs[..], |row| {
                Ok(PatternSummary {
                    id: id_column(row, 0)?,
                    title: row.get(1)?,
                    rule: RecurrenceRule {
                        recurrence_type: enum_column(row, 2)?,
                        interval_value: row.get(3)?,
                        days_of_week: json_column(row, 4)?,
                        day_of_month: row.get(5)?,
                        start_date: date_column(row, 6)?,
                        end_date: optional_date_column(row, 7)?,
                        max_occurrences: row.get(8)?,
                    },
                    is_active: row.get(9)?,
                    updated_at: timestamp_column(row, 10)?,
                    total_instances: row.get(11)?,
                    completed_instances: row.get(12)?,
                    last_due_date: optional_date_column(row, 13)?,
                })
            })
            .db_context("Failed to query pattern summaries")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to fetch pattern summaries")?;

        Ok(summaries)
    }

    fn pattern_conditions(filter: &PatternFilter) -> (String, Vec<Box<dyn ToSql>>) {
        let mut conditions = Vec::new();
        let mut params_vec: Vec<Box<dyn ToSql>> = Vec::new();

        if let Some(active) = filter.is_active {
            conditions.push("is_active = ?");
            params_vec.push(Box::new(active));
        }

        if let Some(ref owner) = filter.owner_id {
            conditions.push("owner_id = ?");
            params_vec.push(Box::new(owner.clone()));
        }

        if let Some(ref title) = filter.title_contains {
            conditions.push("title LIKE ?");
            params_vec.push(Box::new(format!("%{title}%")));
        }

        let clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };

        (clause, params_vec)
    }

    /// Writes back every mutable field of the pattern.
    /// Returns the stored pattern, or None if it doesn't exist.
    pub fn update_pattern_row(
        &mut self,
        pattern: &RecurrencePattern,
    ) -> Result<Option<RecurrencePattern>> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now().to_string();
        let template = &pattern.template;
        let rule = &pattern.rule;

        let rows_affected = tx
            .execute(
                UPDATE_PATTERN_SQL,
                params![
                    &template.title,
                    template.description.as_deref(),
                    template.category_id.map(|id| id as i64),
                    template.priority.as_str(),
                    template.estimated_duration,
                    to_json(&template.tags)?,
                    template.notes.as_deref(),
                    rule.recurrence_type.as_str(),
                    rule.interval_value,
                    to_json(&rule.days_of_week)?,
                    rule.day_of_month,
                    rule.start_date.to_string(),
                    rule.end_date.map(|d| d.to_string()),
                    rule.max_occurrences,
                    pattern.rule_effective_from.map(|d| d.to_string()),
                    &now,
                    pattern.id as i64
                ],
            )
            .db_context("Failed to update pattern")?;

        if rows_affected == 0 {
            return Ok(None);
        }

        let updated =
            Self::load_pattern(&tx, pattern.id).db_context("Failed to query updated pattern")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(updated)
    }

    /// Sets the active flag.
    /// Returns the updated pattern, or None if it doesn't exist.
    pub fn update_pattern_active(
        &mut self,
        id: u64,
        active: bool,
    ) -> Result<Option<RecurrencePattern>> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now().to_string();
        let rows_affected = tx
            .execute(UPDATE_PATTERN_ACTIVE_SQL, params![active, &now, id as i64])
            .db_context("Failed to update pattern status")?;

        if rows_affected == 0 {
            return Ok(None);
        }

        let pattern = Self::load_pattern(&tx, id).db_context("Failed to query pattern")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(pattern)
    }

    /// Permanently deletes a pattern and all of its instances.
    /// Returns the deleted pattern, or None if it doesn't exist.
    pub fn remove_pattern(&mut self, id: u64) -> Result<Option<RecurrencePattern>> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let Some(pattern) = Self::load_pattern(&tx, id).db_context("Failed to query pattern")?
        else {
            return Ok(None);
        };

        // The foreign key cascades too; deleting explicitly keeps the count
        let removed_instances = tx
            .execute(DELETE_PATTERN_INSTANCES_SQL, params![id as i64])
            .db_context("Failed to delete pattern instances")?;

        tx.execute(DELETE_PATTERN_SQL, params![id as i64])
            .db_context("Failed to delete pattern")?;

        tx.commit().db_context("Failed to commit transaction")?;

        log::debug!("Deleted pattern {id} with {removed_instances} instance(s)");

        Ok(Some(pattern))
    }
}
