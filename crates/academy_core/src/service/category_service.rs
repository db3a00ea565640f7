//! Category use-case service.
//!
//! # Invariants
//! - `(name, sport)` is unique; brackets are validated on every write.
//! - A category with players cannot be deleted or moved to another sport.
//! - Changing a bracket does not re-check already assigned players.

use crate::model::category::{Category, CategoryDraft, CategoryId};
use crate::model::sport::SportId;
use crate::repo::category_repo::{CategoryRepository, SqliteCategoryRepository};
use crate::repo::player_repo::{PlayerRepository, SqlitePlayerRepository};
use crate::repo::sport_repo::{SportRepository, SqliteSportRepository};
use crate::service::sport_service::sport_not_found;
use crate::service::{with_transaction, ServiceError, ServiceResult};
use rusqlite::Connection;

/// Category service over one SQLite connection.
pub struct CategoryService<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> CategoryService<'conn> {
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }

    pub fn list(&self) -> ServiceResult<Vec<Category>> {
        let repo = SqliteCategoryRepository::try_new(self.conn)?;
        Ok(repo.list_categories()?)
    }

    pub fn get_by_id(&self, id: CategoryId) -> ServiceResult<Category> {
        let repo = SqliteCategoryRepository::try_new(self.conn)?;
        repo.get_category(id)?
            .ok_or_else(|| category_not_found(id))
    }

    /// Lists the categories of one sport in store order.
    pub fn list_by_sport(&self, sport_id: SportId) -> ServiceResult<Vec<Category>> {
        let sports = SqliteSportRepository::try_new(self.conn)?;
        if sports.get_sport(sport_id)?.is_none() {
            return Err(sport_not_found(sport_id));
        }
        let repo = SqliteCategoryRepository::try_new(self.conn)?;
        Ok(repo.list_categories_by_sport(sport_id)?)
    }

    /// Creates a category under an existing sport.
    pub fn create(&mut self, draft: CategoryDraft, sport_id: SportId) -> ServiceResult<Category> {
        let draft = draft.normalized();

        with_transaction(self.conn, "category_create", |tx| {
            let sport = SqliteSportRepository::try_new(tx)?
                .get_sport(sport_id)?
                .ok_or_else(|| sport_not_found(sport_id))?;

            draft
                .validate()
                .map_err(|err| ServiceError::Validation(err.to_string()))?;

            let repo = SqliteCategoryRepository::try_new(tx)?;
            if repo.find_category_by_name(sport.id, &draft.name)?.is_some() {
                return Err(ServiceError::Validation(format!(
                    "a category named '{}' already exists for sport '{}'",
                    draft.name, sport.name
                )));
            }

            let id = repo.create_category(sport.id, &draft)?;
            repo.get_category(id)?.ok_or(ServiceError::InconsistentState(
                "created category not found in read-back",
            ))
        })
    }

    /// Replaces fields of a category and optionally moves it to another sport.
    pub fn update(
        &mut self,
        id: CategoryId,
        draft: CategoryDraft,
        new_sport_id: Option<SportId>,
    ) -> ServiceResult<Category> {
        let draft = draft.normalized();

        with_transaction(self.conn, "category_update", |tx| {
            let repo = SqliteCategoryRepository::try_new(tx)?;
            let mut category = repo
                .get_category(id)?
                .ok_or_else(|| category_not_found(id))?;

            category.apply(&draft);

            let sports = SqliteSportRepository::try_new(tx)?;
            let sport = match new_sport_id {
                Some(new_sport_id) if new_sport_id != category.sport_id => {
                    let sport = sports
                        .get_sport(new_sport_id)?
                        .ok_or_else(|| sport_not_found(new_sport_id))?;
                    let player_count =
                        SqlitePlayerRepository::try_new(tx)?.count_players_by_category(id)?;
                    if player_count > 0 {
                        return Err(ServiceError::Conflict(format!(
                            "cannot move category '{}' to sport '{}': it has {player_count} associated player(s)",
                            category.name, sport.name
                        )));
                    }
                    category.sport_id = sport.id;
                    sport
                }
                _ => sports
                    .get_sport(category.sport_id)?
                    .ok_or_else(|| sport_not_found(category.sport_id))?,
            };

            category
                .validate()
                .map_err(|err| ServiceError::Validation(err.to_string()))?;

            if let Some(existing) = repo.find_category_by_name(sport.id, &category.name)? {
                if existing.id != id {
                    return Err(ServiceError::Validation(format!(
                        "another category named '{}' already exists for sport '{}'",
                        category.name, sport.name
                    )));
                }
            }

            repo.update_category(&category)?;
            repo.get_category(id)?.ok_or(ServiceError::InconsistentState(
                "updated category not found in read-back",
            ))
        })
    }

    /// Deletes a category that no player references.
    pub fn delete(&mut self, id: CategoryId) -> ServiceResult<()> {
        with_transaction(self.conn, "category_delete", |tx| {
            let repo = SqliteCategoryRepository::try_new(tx)?;
            let category = repo
                .get_category(id)?
                .ok_or_else(|| category_not_found(id))?;

            let player_count = SqlitePlayerRepository::try_new(tx)?.count_players_by_category(id)?;
            if player_count > 0 {
                return Err(ServiceError::Conflict(format!(
                    "cannot delete category '{}': it has {player_count} associated player(s); reassign or delete them first",
                    category.name
                )));
            }

            repo.delete_category(id)?;
            Ok(())
        })
    }
}

fn category_not_found(id: CategoryId) -> ServiceError {
    ServiceError::NotFound(format!("category not found with id {id}"))
}
