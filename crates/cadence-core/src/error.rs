//! Error types for the cadence library.

use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all recurrence operations.
///
/// Generation against an inactive pattern is not an error, and neither is a
/// uniqueness conflict on a single instance insert; both are reported through
/// [`crate::generator::GenerationReport`] instead.
#[derive(Error, Debug)]
pub enum CadenceError {
    /// Datastore connection or query errors. Safe to retry at the caller,
    /// since generation is idempotent.
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Pattern not found for the given ID
    #[error("Recurrence pattern with ID {id} not found")]
    PatternNotFound { id: u64 },
    /// Instance not found for the given ID
    #[error("Task instance with ID {id} not found")]
    InstanceNotFound { id: u64 },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// A payload violates a pattern or instance invariant
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> CadenceError {
        CadenceError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> CadenceError {
        CadenceError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl CadenceError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Returns true for errors raised by payload validation before any I/O.
    pub fn is_validation(&self) -> bool {
        matches!(self, CadenceError::InvalidInput { .. })
    }

    /// Returns true when the referenced pattern or instance does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CadenceError::PatternNotFound { .. } | CadenceError::InstanceNotFound { .. }
        )
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| CadenceError::database(message).with_source(e))
    }
}

/// Result type alias for cadence operations
pub type Result<T> = std::result::Result<T, CadenceError>;
