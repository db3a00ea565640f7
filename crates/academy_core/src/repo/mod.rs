//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define lookup/count/write contracts for sports, categories and players.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Write paths validate records before SQL mutations.
//! - Lookups return `Option`; turning absence into an error is the caller's
//!   decision.
//! - List queries return rows in ascending id order.
//! - Repositories accept any `&Connection`, including an open transaction.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::model::ValidationError;
use rusqlite::{ffi, Connection, ErrorCode};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod category_repo;
pub mod player_repo;
pub mod sport_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for sport/category/player persistence.
#[derive(Debug)]
pub enum RepoError {
    /// Record failed field validation before write.
    Validation(ValidationError),
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// A UNIQUE constraint rejected the write.
    Duplicate(String),
    /// A FOREIGN KEY constraint rejected the write or delete.
    ForeignKey(String),
    /// Update or delete targeted a row that does not exist.
    NotFound { entity: &'static str, id: i64 },
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Persisted data cannot be converted into a valid record.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::Duplicate(message) => write!(f, "duplicate value: {message}"),
            Self::ForeignKey(message) => write!(f, "referential integrity violation: {message}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        match value {
            DbError::Sqlite(err) => Self::from(err),
            other => Self::Db(other),
        }
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(failure, message) = &value {
            if failure.code == ErrorCode::ConstraintViolation {
                let detail = message.clone().unwrap_or_else(|| failure.to_string());
                match failure.extended_code {
                    ffi::SQLITE_CONSTRAINT_UNIQUE => return Self::Duplicate(detail),
                    ffi::SQLITE_CONSTRAINT_FOREIGNKEY => return Self::ForeignKey(detail),
                    _ => {}
                }
            }
        }
        Self::Db(DbError::Sqlite(value))
    }
}

/// Rejects connections that were not bootstrapped through `db::open_*`.
pub(crate) fn ensure_schema_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }
    Ok(())
}

pub(crate) fn count_rows(
    conn: &Connection,
    sql: &str,
    params: impl rusqlite::Params,
) -> RepoResult<u64> {
    let count: i64 = conn.query_row(sql, params, |row| row.get(0))?;
    u64::try_from(count).map_err(|_| RepoError::InvalidData(format!("negative row count {count}")))
}
