//! Sport use-case service.
//!
//! # Invariants
//! - Sport names are unique; blank names are rejected on create and update.
//! - A sport with categories or players cannot be deleted.

use crate::model::sport::{Sport, SportDraft, SportId};
use crate::repo::category_repo::{CategoryRepository, SqliteCategoryRepository};
use crate::repo::player_repo::{PlayerRepository, SqlitePlayerRepository};
use crate::repo::sport_repo::{SportRepository, SqliteSportRepository};
use crate::service::{with_transaction, ServiceError, ServiceResult};
use rusqlite::Connection;

/// Sport service over one SQLite connection.
pub struct SportService<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SportService<'conn> {
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }

    pub fn list(&self) -> ServiceResult<Vec<Sport>> {
        let repo = SqliteSportRepository::try_new(self.conn)?;
        Ok(repo.list_sports()?)
    }

    pub fn get_by_id(&self, id: SportId) -> ServiceResult<Sport> {
        let repo = SqliteSportRepository::try_new(self.conn)?;
        repo.get_sport(id)?.ok_or_else(|| sport_not_found(id))
    }

    /// Creates a sport with a unique, non-blank name.
    pub fn create(&mut self, draft: SportDraft) -> ServiceResult<Sport> {
        let draft = draft.normalized();
        draft
            .validate()
            .map_err(|err| ServiceError::Validation(err.to_string()))?;

        with_transaction(self.conn, "sport_create", |tx| {
            let repo = SqliteSportRepository::try_new(tx)?;
            if repo.find_sport_by_name(&draft.name)?.is_some() {
                return Err(ServiceError::Validation(format!(
                    "a sport named '{}' already exists",
                    draft.name
                )));
            }

            let id = repo.create_sport(&draft)?;
            repo.get_sport(id)?
                .ok_or(ServiceError::InconsistentState("created sport not found in read-back"))
        })
    }

    /// Replaces name and description of an existing sport.
    pub fn update(&mut self, id: SportId, draft: SportDraft) -> ServiceResult<Sport> {
        let draft = draft.normalized();

        with_transaction(self.conn, "sport_update", |tx| {
            let repo = SqliteSportRepository::try_new(tx)?;
            let mut sport = repo.get_sport(id)?.ok_or_else(|| sport_not_found(id))?;

            sport.apply(&draft);
            sport
                .validate()
                .map_err(|err| ServiceError::Validation(err.to_string()))?;

            if let Some(existing) = repo.find_sport_by_name(&sport.name)? {
                if existing.id != id {
                    return Err(ServiceError::Validation(format!(
                        "the name '{}' is already used by another sport",
                        sport.name
                    )));
                }
            }

            repo.update_sport(&sport)?;
            repo.get_sport(id)?
                .ok_or(ServiceError::InconsistentState("updated sport not found in read-back"))
        })
    }

    /// Deletes a sport that owns no categories and no players.
    pub fn delete(&mut self, id: SportId) -> ServiceResult<()> {
        with_transaction(self.conn, "sport_delete", |tx| {
            let sports = SqliteSportRepository::try_new(tx)?;
            let sport = sports.get_sport(id)?.ok_or_else(|| sport_not_found(id))?;

            let category_count =
                SqliteCategoryRepository::try_new(tx)?.count_categories_by_sport(id)?;
            if category_count > 0 {
                return Err(ServiceError::Conflict(format!(
                    "cannot delete sport '{}': it has {category_count} associated category(ies); delete or reassign them first",
                    sport.name
                )));
            }

            let player_count = SqlitePlayerRepository::try_new(tx)?.count_players_by_sport(id)?;
            if player_count > 0 {
                return Err(ServiceError::Conflict(format!(
                    "cannot delete sport '{}': it has {player_count} associated player(s); delete or reassign them first",
                    sport.name
                )));
            }

            sports.delete_sport(id)?;
            Ok(())
        })
    }
}

pub(crate) fn sport_not_found(id: SportId) -> ServiceError {
    ServiceError::NotFound(format!("sport not found with id {id}"))
}
