//! Sport record.
//!
//! # Invariants
//! - `name` is non-blank and unique across all sports.
//! - `id` is assigned by the store and never reused.

use super::{normalize_optional, require_text, ValidationError};
use serde::{Deserialize, Serialize};

/// Store-assigned sport identifier.
pub type SportId = i64;

/// Top-level grouping of categories and players (e.g. "Football").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sport {
    pub id: SportId,
    pub name: String,
    pub description: Option<String>,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds.
    pub updated_at: i64,
}

impl Sport {
    /// Replaces every mutable attribute with the draft values.
    pub fn apply(&mut self, draft: &SportDraft) {
        self.name = draft.name.clone();
        self.description = draft.description.clone();
    }

    /// Checks record-level invariants before persistence.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)
    }
}

/// Caller-supplied sport fields for create and update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SportDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl SportDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Trims the name and drops a blank description.
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            description: normalize_optional(self.description),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::SportDraft;
    use crate::model::ValidationError;

    #[test]
    fn blank_name_is_rejected() {
        let draft = SportDraft::new("   ").normalized();
        assert_eq!(draft.validate(), Err(ValidationError::BlankField("name")));
    }

    #[test]
    fn normalized_trims_name_and_drops_blank_description() {
        let draft = SportDraft::new("  Football ")
            .with_description(" ")
            .normalized();
        assert_eq!(draft.name, "Football");
        assert_eq!(draft.description, None);
    }

    #[test]
    fn draft_deserializes_with_missing_description() {
        let draft: SportDraft = serde_json::from_str(r#"{"name":"Basketball"}"#).unwrap();
        assert_eq!(draft.name, "Basketball");
        assert!(draft.description.is_none());
    }
}
