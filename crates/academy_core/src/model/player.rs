//! Player record and age computation.
//!
//! # Invariants
//! - `category_id` points at a category of `sport_id` whose bracket contained
//!   the player's age when it was last assigned.
//! - Age drift after a birthday is not corrected until the next update.
//! - `national_id`, when present, is unique across all players.

use super::category::CategoryId;
use super::sport::SportId;
use super::{normalize_optional, require_text, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Store-assigned player identifier.
pub type PlayerId = i64;

/// Individual enrolled under exactly one sport and category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub first_name: String,
    pub last_name: String,
    pub national_id: Option<String>,
    pub birth_date: NaiveDate,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub photo_url: Option<String>,
    pub category_id: CategoryId,
    pub sport_id: SportId,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds.
    pub updated_at: i64,
}

impl Player {
    /// Replaces names, birth date and contact fields with the draft values.
    ///
    /// `national_id` is left untouched; it needs a uniqueness check first.
    pub fn apply(&mut self, draft: &PlayerDraft) -> Result<(), ValidationError> {
        let birth_date = draft.validate()?;
        self.first_name = draft.first_name.clone();
        self.last_name = draft.last_name.clone();
        self.birth_date = birth_date;
        self.photo_url = draft.photo_url.clone();
        self.phone = draft.phone.clone();
        self.email = draft.email.clone();
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("firstName", &self.first_name)?;
        require_text("lastName", &self.last_name)
    }
}

/// Caller-supplied player fields for create and update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerDraft {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub national_id: Option<String>,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
}

impl PlayerDraft {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        birth_date: NaiveDate,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            birth_date: Some(birth_date),
            ..Self::default()
        }
    }

    pub fn with_national_id(mut self, national_id: impl Into<String>) -> Self {
        self.national_id = Some(national_id.into());
        self
    }

    pub fn with_contact(mut self, phone: impl Into<String>, email: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self.email = Some(email.into());
        self
    }

    pub fn with_photo_url(mut self, photo_url: impl Into<String>) -> Self {
        self.photo_url = Some(photo_url.into());
        self
    }

    pub fn normalized(self) -> Self {
        Self {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            national_id: normalize_optional(self.national_id),
            birth_date: self.birth_date,
            phone: normalize_optional(self.phone),
            email: normalize_optional(self.email),
            photo_url: normalize_optional(self.photo_url),
        }
    }

    /// Checks required fields and returns the birth date.
    pub fn validate(&self) -> Result<NaiveDate, ValidationError> {
        require_text("firstName", &self.first_name)?;
        require_text("lastName", &self.last_name)?;
        self.birth_date
            .ok_or(ValidationError::MissingField("birthDate"))
    }
}

/// Whole calendar years elapsed between `birth_date` and `today`.
///
/// A birthday not yet reached in `today`'s year does not count. Returns
/// `None` when `birth_date` is after `today`.
pub fn age_on(birth_date: NaiveDate, today: NaiveDate) -> Option<i64> {
    today.years_since(birth_date).map(i64::from)
}
