//! Domain records for sports, age categories and players.
//!
//! # Responsibility
//! - Define the records persisted by the store and returned to callers.
//! - Define caller-supplied drafts and their field-level validation.
//!
//! # Invariants
//! - Ownership is one-directional: children reference parents by id and
//!   parents never hold child collections.
//! - A category's age bracket is inclusive and never inverted.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod category;
pub mod player;
pub mod sport;

/// Field-level validation failure for drafts and records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required text field is empty after trim.
    BlankField(&'static str),
    /// Required field was not supplied.
    MissingField(&'static str),
    /// Age bound is below zero.
    NegativeAge { field: &'static str, value: i64 },
    /// `min_age` is greater than `max_age`.
    InvertedAgeRange { min_age: i64, max_age: i64 },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField(field) => write!(f, "`{field}` must not be blank"),
            Self::MissingField(field) => write!(f, "`{field}` is required"),
            Self::NegativeAge { field, value } => {
                write!(f, "`{field}` must be a non-negative integer, got {value}")
            }
            Self::InvertedAgeRange { min_age, max_age } => write!(
                f,
                "`minAge` ({min_age}) must not be greater than `maxAge` ({max_age})"
            ),
        }
    }
}

impl Error for ValidationError {}

/// Trims a required text value, rejecting empty input.
pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::BlankField(field));
    }
    Ok(())
}

/// Collapses blank optional text into `None` and trims the rest.
pub(crate) fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}
