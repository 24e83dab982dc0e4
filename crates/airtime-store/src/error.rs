//! Error types for database operations.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors produced by the storage layer.
///
/// These wrap `sqlx` errors and classify the conditions callers need to
/// distinguish: a missing schema (the database was never set up), a relation
/// constraint (insert order violated), and plain query failures.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Entity not found.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity kind, e.g. `"transaction"`.
        entity: &'static str,
        /// The identifier that was looked up.
        id: String,
    },

    /// A unique constraint was violated.
    #[error("unique constraint violated: {constraint}")]
    UniqueViolation {
        /// The constraint reported by the driver.
        constraint: String,
    },

    /// A foreign key constraint was violated (e.g. a transaction created for
    /// a number missing from the registry).
    #[error("relation constraint violated: {0}")]
    RelationConstraint(String),

    /// A required table does not exist; the schema was never created.
    #[error("database schema missing: {0}")]
    SchemaMissing(String),

    /// The database could not be reached or opened.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Schema migration failed.
    #[error("migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("query failed: {0}")]
    QueryFailed(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StoreError::NotFound {
                entity: "record",
                id: "unknown".to_string(),
            },

            sqlx::Error::Database(db_err) => {
                let msg = db_err.message().to_string();

                // SQLite constraint and schema errors are only identifiable
                // by message text.
                if msg.contains("UNIQUE constraint failed") {
                    let constraint = msg
                        .split("UNIQUE constraint failed: ")
                        .nth(1)
                        .unwrap_or("unknown")
                        .to_string();
                    StoreError::UniqueViolation { constraint }
                } else if msg.contains("FOREIGN KEY constraint failed") {
                    StoreError::RelationConstraint(msg)
                } else if msg.contains("no such table") {
                    StoreError::SchemaMissing(msg)
                } else {
                    StoreError::QueryFailed(msg)
                }
            }

            sqlx::Error::PoolTimedOut => {
                StoreError::ConnectionFailed("connection pool exhausted".to_string())
            }
            sqlx::Error::PoolClosed => StoreError::ConnectionFailed("pool is closed".to_string()),

            other => StoreError::QueryFailed(other.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        StoreError::MigrationFailed(err.to_string())
    }
}

impl StoreError {
    /// Whether this error means the schema itself is missing or misconfigured
    /// rather than the operation being invalid.
    #[must_use]
    pub fn is_schema_missing(&self) -> bool {
        matches!(self, StoreError::SchemaMissing(_))
    }
}
