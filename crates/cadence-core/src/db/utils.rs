//! Row decoding and encoding helpers shared by the query modules.

use std::str::FromStr;

use jiff::{civil::Date, Timestamp};
use rusqlite::{ffi, types::Type, Row};
use serde::{de::DeserializeOwned, Serialize};

use crate::error::Result;

/// Reads an integer id column.
pub(super) fn id_column(row: &Row, idx: usize) -> rusqlite::Result<u64> {
    Ok(row.get::<_, i64>(idx)? as u64)
}

/// Reads an optional integer id column.
pub(super) fn optional_id_column(row: &Row, idx: usize) -> rusqlite::Result<Option<u64>> {
    Ok(row.get::<_, Option<i64>>(idx)?.map(|id| id as u64))
}

/// Reads an RFC 3339 timestamp stored as TEXT.
pub(super) fn timestamp_column(row: &Row, idx: usize) -> rusqlite::Result<Timestamp> {
    row.get::<_, String>(idx)?
        .parse::<Timestamp>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

pub(super) fn optional_timestamp_column(
    row: &Row,
    idx: usize,
) -> rusqlite::Result<Option<Timestamp>> {
    row.get::<_, Option<String>>(idx)?
        .map(|s| {
            s.parse::<Timestamp>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
            })
        })
        .transpose()
}

/// Reads a `YYYY-MM-DD` date stored as TEXT.
pub(super) fn date_column(row: &Row, idx: usize) -> rusqlite::Result<Date> {
    row.get::<_, String>(idx)?
        .parse::<Date>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

pub(super) fn optional_date_column(row: &Row, idx: usize) -> rusqlite::Result<Option<Date>> {
    row.get::<_, Option<String>>(idx)?
        .map(|s| {
            s.parse::<Date>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
            })
        })
        .transpose()
}

/// Reads an enum stored by its lowercase name.
pub(super) fn enum_column<T>(row: &Row, idx: usize) -> rusqlite::Result<T>
where
    T: FromStr<Err = String>,
{
    let raw: String = row.get(idx)?;
    raw.parse::<T>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, e.into()))
}

/// Reads a JSON array column (tags, days of week).
pub(super) fn json_column<T: DeserializeOwned>(row: &Row, idx: usize) -> rusqlite::Result<T> {
    let raw: String = row.get(idx)?;
    serde_json::from_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Encodes a value for a JSON column.
pub(super) fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

/// Returns true if the error is a UNIQUE constraint violation.
pub(super) fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}
