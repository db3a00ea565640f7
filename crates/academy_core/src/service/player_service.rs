//! Player use-case service and category auto-assignment.
//!
//! # Responsibility
//! - Enforce global `national_id` uniqueness.
//! - Place every created or updated player into the category of its sport
//!   whose age bracket contains the player's current age.
//!
//! # Invariants
//! - Assignment is recomputed on every update, even when neither birth date
//!   nor sport changed.
//! - When no bracket matches, the whole operation fails and nothing is
//!   written.
//! - Overlapping brackets resolve to the first category in store order.

use crate::model::category::{first_matching, Category};
use crate::model::player::{age_on, Player, PlayerDraft, PlayerId};
use crate::model::sport::{Sport, SportId};
use crate::model::ValidationError;
use crate::repo::category_repo::{CategoryRepository, SqliteCategoryRepository};
use crate::repo::player_repo::{Placement, PlayerRepository, SqlitePlayerRepository};
use crate::repo::sport_repo::{SportRepository, SqliteSportRepository};
use crate::service::sport_service::sport_not_found;
use crate::service::{with_transaction, ServiceError, ServiceResult};
use chrono::{Local, NaiveDate};
use log::{debug, warn};
use rusqlite::Connection;

/// Player service over one SQLite connection.
pub struct PlayerService<'conn> {
    conn: &'conn mut Connection,
    today: Option<NaiveDate>,
}

impl<'conn> PlayerService<'conn> {
    /// Creates a service that computes ages against the local calendar date.
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn, today: None }
    }

    /// Creates a service that computes ages against a fixed date.
    pub fn with_today(conn: &'conn mut Connection, today: NaiveDate) -> Self {
        Self {
            conn,
            today: Some(today),
        }
    }

    pub fn list(&self) -> ServiceResult<Vec<Player>> {
        let repo = SqlitePlayerRepository::try_new(self.conn)?;
        Ok(repo.list_players()?)
    }

    pub fn get_by_id(&self, id: PlayerId) -> ServiceResult<Player> {
        let repo = SqlitePlayerRepository::try_new(self.conn)?;
        repo.get_player(id)?.ok_or_else(|| player_not_found(id))
    }

    /// Enrolls a player under `sport_id` in the age-appropriate category.
    pub fn create(&mut self, draft: PlayerDraft, sport_id: SportId) -> ServiceResult<Player> {
        let draft = draft.normalized();
        let birth_date = draft.validate().map_err(validation)?;
        let today = self.today();

        with_transaction(self.conn, "player_create", |tx| {
            let players = SqlitePlayerRepository::try_new(tx)?;
            if let Some(national_id) = draft.national_id.as_deref() {
                if players.find_player_by_national_id(national_id)?.is_some() {
                    return Err(ServiceError::Validation(format!(
                        "national id '{national_id}' is already in use"
                    )));
                }
            }

            let sport = SqliteSportRepository::try_new(tx)?
                .get_sport(sport_id)?
                .ok_or_else(|| sport_not_found(sport_id))?;

            let categories = SqliteCategoryRepository::try_new(tx)?;
            let category = assign_category(&categories, Some(birth_date), &sport, today)?;

            let id = players.create_player(
                &draft,
                Placement {
                    sport_id: sport.id,
                    category_id: category.id,
                },
            )?;
            players.get_player(id)?.ok_or(ServiceError::InconsistentState(
                "created player not found in read-back",
            ))
        })
    }

    /// Replaces a player's fields and recomputes its category.
    ///
    /// A `None` draft `national_id` keeps the stored value.
    pub fn update(
        &mut self,
        id: PlayerId,
        draft: PlayerDraft,
        new_sport_id: Option<SportId>,
    ) -> ServiceResult<Player> {
        let draft = draft.normalized();
        let today = self.today();

        with_transaction(self.conn, "player_update", |tx| {
            let players = SqlitePlayerRepository::try_new(tx)?;
            let mut player = players.get_player(id)?.ok_or_else(|| player_not_found(id))?;

            player.apply(&draft).map_err(validation)?;

            if let Some(national_id) = draft.national_id.as_deref() {
                if player.national_id.as_deref() != Some(national_id) {
                    if let Some(holder) = players.find_player_by_national_id(national_id)? {
                        if holder.id != id {
                            return Err(ServiceError::Validation(format!(
                                "national id '{national_id}' is already associated with another player"
                            )));
                        }
                    }
                    player.national_id = Some(national_id.to_string());
                }
            }

            let effective_sport_id = new_sport_id.unwrap_or(player.sport_id);
            let sport = SqliteSportRepository::try_new(tx)?
                .get_sport(effective_sport_id)?
                .ok_or_else(|| sport_not_found(effective_sport_id))?;

            let categories = SqliteCategoryRepository::try_new(tx)?;
            let category = assign_category(&categories, Some(player.birth_date), &sport, today)?;
            player.sport_id = sport.id;
            player.category_id = category.id;

            players.update_player(&player)?;
            players.get_player(id)?.ok_or(ServiceError::InconsistentState(
                "updated player not found in read-back",
            ))
        })
    }

    pub fn delete(&mut self, id: PlayerId) -> ServiceResult<()> {
        with_transaction(self.conn, "player_delete", |tx| {
            let players = SqlitePlayerRepository::try_new(tx)?;
            if players.get_player(id)?.is_none() {
                return Err(player_not_found(id));
            }
            players.delete_player(id)?;
            Ok(())
        })
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }
}

/// Picks the category of `sport` whose bracket contains the player's age.
///
/// # Errors
/// - `Validation` when the birth date is missing or lies after `today`.
/// - `NotFound` when no category of `sport` accepts the computed age.
pub fn assign_category(
    categories: &impl CategoryRepository,
    birth_date: Option<NaiveDate>,
    sport: &Sport,
    today: NaiveDate,
) -> ServiceResult<Category> {
    let birth_date =
        birth_date.ok_or_else(|| validation(ValidationError::MissingField("birthDate")))?;
    let age = age_on(birth_date, today).ok_or_else(|| {
        ServiceError::Validation(format!(
            "birth date {birth_date} is after the current date {today}"
        ))
    })?;

    let candidates = categories.list_categories_by_sport(sport.id)?;
    let matched = first_matching(&candidates, age).cloned().ok_or_else(|| {
        ServiceError::NotFound(format!(
            "no suitable category for age {age} in sport '{}'",
            sport.name
        ))
    })?;

    let overlapping = candidates
        .iter()
        .filter(|category| category.accepts_age(age))
        .count();
    if overlapping > 1 {
        warn!(
            "event=category_assign module=service status=ambiguous sport_id={} age={} matches={} chosen_category_id={}",
            sport.id, age, overlapping, matched.id
        );
    } else {
        debug!(
            "event=category_assign module=service status=ok sport_id={} age={} category_id={}",
            sport.id, age, matched.id
        );
    }

    Ok(matched)
}

fn validation(err: ValidationError) -> ServiceError {
    ServiceError::Validation(err.to_string())
}

fn player_not_found(id: PlayerId) -> ServiceError {
    ServiceError::NotFound(format!("player not found with id {id}"))
}
