//! Age-bracket category record and bracket matching.
//!
//! # Invariants
//! - `0 <= min_age <= max_age`; both bounds are inclusive.
//! - `(name, sport_id)` is unique.
//! - Overlapping brackets inside one sport are not rejected; matching picks
//!   the first bracket in the order given.

use super::sport::SportId;
use super::{normalize_optional, require_text, ValidationError};
use serde::{Deserialize, Serialize};

/// Store-assigned category identifier.
pub type CategoryId = i64;

/// Age-bracketed subdivision of a sport (e.g. "U10").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub min_age: i64,
    pub max_age: i64,
    pub description: Option<String>,
    pub sport_id: SportId,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds.
    pub updated_at: i64,
}

impl Category {
    /// Returns whether `age` falls inside this inclusive bracket.
    pub fn accepts_age(&self, age: i64) -> bool {
        self.min_age <= age && age <= self.max_age
    }

    /// Replaces name, bracket and description with the draft values.
    pub fn apply(&mut self, draft: &CategoryDraft) {
        self.name = draft.name.clone();
        self.min_age = draft.min_age;
        self.max_age = draft.max_age;
        self.description = draft.description.clone();
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_fields(&self.name, self.min_age, self.max_age)
    }
}

/// Caller-supplied category fields for create and update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDraft {
    #[serde(default)]
    pub name: String,
    pub min_age: i64,
    pub max_age: i64,
    #[serde(default)]
    pub description: Option<String>,
}

impl CategoryDraft {
    pub fn new(name: impl Into<String>, min_age: i64, max_age: i64) -> Self {
        Self {
            name: name.into(),
            min_age,
            max_age,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            description: normalize_optional(self.description),
            ..self
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_fields(&self.name, self.min_age, self.max_age)
    }
}

/// Returns the first category whose bracket contains `age`.
///
/// `categories` order is the tie-break when brackets overlap.
pub fn first_matching(categories: &[Category], age: i64) -> Option<&Category> {
    categories.iter().find(|category| category.accepts_age(age))
}

fn validate_fields(name: &str, min_age: i64, max_age: i64) -> Result<(), ValidationError> {
    require_text("name", name)?;
    if min_age < 0 {
        return Err(ValidationError::NegativeAge {
            field: "minAge",
            value: min_age,
        });
    }
    if max_age < 0 {
        return Err(ValidationError::NegativeAge {
            field: "maxAge",
            value: max_age,
        });
    }
    if min_age > max_age {
        return Err(ValidationError::InvertedAgeRange { min_age, max_age });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{first_matching, Category, CategoryDraft};
    use crate::model::ValidationError;

    fn category(id: i64, name: &str, min_age: i64, max_age: i64) -> Category {
        Category {
            id,
            name: name.to_string(),
            min_age,
            max_age,
            description: None,
            sport_id: 1,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn valid_brackets_pass_including_single_year() {
        for (min_age, max_age) in [(0, 0), (6, 9), (10, 13), (0, 99), (17, 17)] {
            assert_eq!(
                CategoryDraft::new("U", min_age, max_age).validate(),
                Ok(()),
                "{min_age}..={max_age} should be valid"
            );
        }
    }

    #[test]
    fn inverted_bracket_is_rejected() {
        let err = CategoryDraft::new("U10", 11, 10).validate().unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvertedAgeRange {
                min_age: 11,
                max_age: 10
            }
        );
    }

    #[test]
    fn negative_bounds_are_rejected() {
        assert!(matches!(
            CategoryDraft::new("U10", -1, 10).validate(),
            Err(ValidationError::NegativeAge { field: "minAge", .. })
        ));
        assert!(matches!(
            CategoryDraft::new("U10", 0, -3).validate(),
            Err(ValidationError::NegativeAge { field: "maxAge", .. })
        ));
    }

    #[test]
    fn bracket_bounds_are_inclusive() {
        let u10 = category(1, "U10", 6, 9);
        assert!(u10.accepts_age(6));
        assert!(u10.accepts_age(9));
        assert!(!u10.accepts_age(5));
        assert!(!u10.accepts_age(10));
    }

    #[test]
    fn first_matching_prefers_earlier_category_on_overlap() {
        let categories = vec![
            category(1, "A", 6, 10),
            category(2, "B", 10, 13),
            category(3, "C", 14, 17),
        ];
        assert_eq!(first_matching(&categories, 10).map(|c| c.id), Some(1));
        assert_eq!(first_matching(&categories, 12).map(|c| c.id), Some(2));
        assert!(first_matching(&categories, 18).is_none());
    }

    #[test]
    fn draft_json_uses_camel_case_ages() {
        let draft: CategoryDraft =
            serde_json::from_str(r#"{"name":"U12","minAge":10,"maxAge":12}"#).unwrap();
        assert_eq!((draft.min_age, draft.max_age), (10, 12));
    }
}
