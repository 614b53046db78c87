//! # Database Error Types
//!
//! Error types for storage operations.
//!
//! ## Error Flow
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      Error Propagation                       │
//! │                                                              │
//! │  SQLite error (sqlx::Error)                                  │
//! │       │                                                      │
//! │       ▼                                                      │
//! │  DbError (this module) ← classifies constraint failures      │
//! │       │                                                      │
//! │       ▼                                                      │
//! │  Caller sees typed error naming the table / key / field      │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Referential and duplicate-key violations are fatal to the single
//! operation that raised them. Derivation mismatches are never errors;
//! they travel in the bulk-load report instead.

use thiserror::Error;

/// Storage operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Lookup miss.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Key collision on insert: the natural or surrogate key already
    /// exists in the target table.
    #[error("Duplicate key in {table}: {key} already exists")]
    Duplicate { table: String, key: String },

    /// A dependent record references a company that does not exist.
    #[error("Referential violation in {table}: company {company_id} does not exist")]
    ReferentialViolation { table: String, company_id: i64 },

    /// A record failed field validation before reaching storage.
    #[error(transparent)]
    Validation(#[from] fundstore_core::ValidationError),

    /// Database connection failed.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and id.
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Creates a Duplicate error for a table and key description.
    pub fn duplicate(table: impl Into<String>, key: impl Into<String>) -> Self {
        DbError::Duplicate {
            table: table.into(),
            key: key.into(),
        }
    }

    /// Creates a ReferentialViolation for a table and missing company.
    pub fn referential(table: impl Into<String>, company_id: i64) -> Self {
        DbError::ReferentialViolation {
            table: table.into(),
            company_id,
        }
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::RowNotFound  → DbError::NotFound
/// sqlx::Error::Database     → classify by SQLite constraint message
/// sqlx::Error::PoolTimedOut → DbError::PoolExhausted
/// Other                     → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::NotFound {
                entity: "Record".to_string(),
                id: "unknown".to_string(),
            },

            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                // SQLite constraint messages:
                //   UNIQUE: "UNIQUE constraint failed: <table>.<column>"
                //   FK:     "FOREIGN KEY constraint failed"
                if msg.contains("UNIQUE constraint failed") || msg.contains("PRIMARY KEY") {
                    let key = msg
                        .split("constraint failed: ")
                        .nth(1)
                        .unwrap_or("unknown")
                        .to_string();
                    let table = key.split('.').next().unwrap_or("unknown").to_string();
                    DbError::Duplicate { table, key }
                } else if msg.contains("FOREIGN KEY constraint failed") {
                    // The SQLite message carries no table name; repositories
                    // pre-check company existence so this is a backstop.
                    DbError::ReferentialViolation {
                        table: "unknown".to_string(),
                        company_id: -1,
                    }
                } else {
                    DbError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for storage operations.
pub type DbResult<T> = Result<T, DbError>;
