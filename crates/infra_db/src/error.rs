//! Database error types

use thiserror::Error;

/// Errors that can occur during database operations
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Failed to establish a database connection
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Entity not found in database
    #[error("Entity not found: {0}")]
    NotFound(String),

    /// Unique constraint violation
    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    /// Foreign key constraint violation
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// Check constraint violation
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// A stored value could not be mapped back to its domain type
    #[error("Row mapping error: {0}")]
    RowMapping(String),

    /// Migration error
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Generic SQL error
    #[error("SQL error: {0}")]
    Sql(#[from] sqlx::Error),
}

impl DatabaseError {
    /// Maps a SQLx error onto the more specific variants using the
    /// PostgreSQL error code
    pub fn classify(error: sqlx::Error) -> Self {
        // https://www.postgresql.org/docs/current/errcodes-appendix.html
        let details = match &error {
            sqlx::Error::Database(db_err) => db_err
                .code()
                .map(|code| (code.to_string(), db_err.message().to_string())),
            _ => None,
        };

        match details {
            Some((code, message)) => match code.as_str() {
                "23505" => DatabaseError::DuplicateEntry(message),
                "23503" => DatabaseError::ForeignKeyViolation(message),
                "23514" => DatabaseError::ConstraintViolation(message),
                _ => DatabaseError::Sql(error),
            },
            None => DatabaseError::Sql(error),
        }
    }

    /// Whether this error is a unique-constraint conflict
    pub fn is_duplicate(&self) -> bool {
        matches!(self, DatabaseError::DuplicateEntry(_))
    }
}
