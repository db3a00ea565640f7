//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls around the sport/category/player rules.
//! - Own the transaction boundary of every mutating operation.
//! - Translate storage outcomes into the caller-facing error taxonomy.
//!
//! # Invariants
//! - Each create/update/delete runs in exactly one `BEGIN IMMEDIATE`
//!   transaction; any error drops it uncommitted, which rolls it back.
//! - Uniqueness checks are read-then-write. The schema UNIQUE constraints are
//!   the backstop and surface as `ServiceError::Validation`.

use crate::repo::RepoError;
use log::{error, info, warn};
use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub mod category_service;
pub mod player_service;
pub mod sport_service;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Caller-facing error taxonomy for service operations.
#[derive(Debug)]
pub enum ServiceError {
    /// Malformed or duplicate input.
    Validation(String),
    /// A referenced record does not exist.
    NotFound(String),
    /// Operation blocked by existing dependents.
    Conflict(String),
    /// Write succeeded but read-back did not find the row.
    InconsistentState(&'static str),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl ServiceError {
    /// Stable short code used in log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::NotFound(_) => "not_found",
            Self::Conflict(_) => "conflict",
            Self::InconsistentState(_) => "inconsistent_state",
            Self::Repo(_) => "store",
        }
    }

    fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::NotFound(_) | Self::Conflict(_)
        )
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(message) | Self::NotFound(message) | Self::Conflict(message) => {
                write!(f, "{message}")
            }
            Self::InconsistentState(details) => write!(f, "inconsistent store state: {details}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err.to_string()),
            RepoError::Duplicate(detail) => Self::Validation(format!("duplicate value: {detail}")),
            RepoError::ForeignKey(detail) => {
                Self::Conflict(format!("referenced by other records: {detail}"))
            }
            RepoError::NotFound { entity, id } => Self::NotFound(format!("{entity} not found: {id}")),
            other => Self::Repo(other),
        }
    }
}

impl From<rusqlite::Error> for ServiceError {
    fn from(value: rusqlite::Error) -> Self {
        Self::from(RepoError::from(value))
    }
}

/// Runs `op` inside one immediate transaction and commits on success.
///
/// # Side effects
/// - Emits one `event=<event>` log line with status and duration.
pub(crate) fn with_transaction<T>(
    conn: &mut Connection,
    event: &'static str,
    op: impl FnOnce(&Transaction<'_>) -> ServiceResult<T>,
) -> ServiceResult<T> {
    let started_at = Instant::now();
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    let result = op(&tx).and_then(|value| {
        tx.commit()?;
        Ok(value)
    });

    match &result {
        Ok(_) => info!(
            "event={event} module=service status=ok duration_ms={}",
            started_at.elapsed().as_millis()
        ),
        Err(err) if err.is_client_error() => warn!(
            "event={event} module=service status=rejected duration_ms={} error_code={} error={}",
            started_at.elapsed().as_millis(),
            err.code(),
            err
        ),
        Err(err) => error!(
            "event={event} module=service status=error duration_ms={} error_code={} error={}",
            started_at.elapsed().as_millis(),
            err.code(),
            err
        ),
    }

    result
}
