//! Category repository contract and SQLite implementation.
//!
//! # Invariants
//! - Per-sport listing keeps ascending id order; player assignment depends
//!   on that order when brackets overlap.
//! - Persisted brackets are re-validated on read.

use crate::model::category::{Category, CategoryDraft, CategoryId};
use crate::model::sport::SportId;
use crate::repo::{count_rows, ensure_schema_ready, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const CATEGORY_SELECT_SQL: &str = "SELECT
    id,
    name,
    min_age,
    max_age,
    description,
    sport_id,
    created_at,
    updated_at
FROM categories";

/// Repository interface for category persistence.
pub trait CategoryRepository {
    fn create_category(&self, sport_id: SportId, draft: &CategoryDraft)
        -> RepoResult<CategoryId>;
    fn update_category(&self, category: &Category) -> RepoResult<()>;
    fn get_category(&self, id: CategoryId) -> RepoResult<Option<Category>>;
    /// Looks up the unique `(name, sport_id)` pair.
    fn find_category_by_name(&self, sport_id: SportId, name: &str)
        -> RepoResult<Option<Category>>;
    fn list_categories(&self) -> RepoResult<Vec<Category>>;
    fn list_categories_by_sport(&self, sport_id: SportId) -> RepoResult<Vec<Category>>;
    fn count_categories_by_sport(&self, sport_id: SportId) -> RepoResult<u64>;
    fn delete_category(&self, id: CategoryId) -> RepoResult<()>;
}

/// SQLite-backed category repository.
pub struct SqliteCategoryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCategoryRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_ready(conn)?;
        Ok(Self { conn })
    }

    fn query_list(&self, sql: &str, params: impl rusqlite::Params) -> RepoResult<Vec<Category>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut categories = Vec::new();
        while let Some(row) = rows.next()? {
            categories.push(parse_category_row(row)?);
        }
        Ok(categories)
    }

    fn query_one(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> RepoResult<Option<Category>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_category_row(row)?)),
            None => Ok(None),
        }
    }
}

impl CategoryRepository for SqliteCategoryRepository<'_> {
    fn create_category(
        &self,
        sport_id: SportId,
        draft: &CategoryDraft,
    ) -> RepoResult<CategoryId> {
        draft.validate()?;

        self.conn.execute(
            "INSERT INTO categories (
                name,
                min_age,
                max_age,
                description,
                sport_id
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                draft.name.as_str(),
                draft.min_age,
                draft.max_age,
                draft.description.as_deref(),
                sport_id,
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_category(&self, category: &Category) -> RepoResult<()> {
        category.validate()?;

        let changed = self.conn.execute(
            "UPDATE categories
             SET
                name = ?1,
                min_age = ?2,
                max_age = ?3,
                description = ?4,
                sport_id = ?5,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?6;",
            params![
                category.name.as_str(),
                category.min_age,
                category.max_age,
                category.description.as_deref(),
                category.sport_id,
                category.id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "category",
                id: category.id,
            });
        }

        Ok(())
    }

    fn get_category(&self, id: CategoryId) -> RepoResult<Option<Category>> {
        self.query_one(&format!("{CATEGORY_SELECT_SQL} WHERE id = ?1;"), [id])
    }

    fn find_category_by_name(
        &self,
        sport_id: SportId,
        name: &str,
    ) -> RepoResult<Option<Category>> {
        self.query_one(
            &format!("{CATEGORY_SELECT_SQL} WHERE sport_id = ?1 AND name = ?2;"),
            params![sport_id, name],
        )
    }

    fn list_categories(&self) -> RepoResult<Vec<Category>> {
        self.query_list(&format!("{CATEGORY_SELECT_SQL} ORDER BY id ASC;"), [])
    }

    fn list_categories_by_sport(&self, sport_id: SportId) -> RepoResult<Vec<Category>> {
        self.query_list(
            &format!("{CATEGORY_SELECT_SQL} WHERE sport_id = ?1 ORDER BY id ASC;"),
            [sport_id],
        )
    }

    fn count_categories_by_sport(&self, sport_id: SportId) -> RepoResult<u64> {
        count_rows(
            self.conn,
            "SELECT COUNT(*) FROM categories WHERE sport_id = ?1;",
            [sport_id],
        )
    }

    fn delete_category(&self, id: CategoryId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM categories WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "category",
                id,
            });
        }
        Ok(())
    }
}

fn parse_category_row(row: &Row<'_>) -> RepoResult<Category> {
    let category = Category {
        id: row.get("id")?,
        name: row.get("name")?,
        min_age: row.get("min_age")?,
        max_age: row.get("max_age")?,
        description: row.get("description")?,
        sport_id: row.get("sport_id")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    };
    category.validate().map_err(|err| {
        RepoError::InvalidData(format!("category {} violates bracket rules: {err}", category.id))
    })?;
    Ok(category)
}
