//! Sport repository contract and SQLite implementation.

use crate::model::sport::{Sport, SportDraft, SportId};
use crate::repo::{ensure_schema_ready, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

const SPORT_SELECT_SQL: &str = "SELECT
    id,
    name,
    description,
    created_at,
    updated_at
FROM sports";

/// Repository interface for sport persistence.
pub trait SportRepository {
    fn create_sport(&self, draft: &SportDraft) -> RepoResult<SportId>;
    fn update_sport(&self, sport: &Sport) -> RepoResult<()>;
    fn get_sport(&self, id: SportId) -> RepoResult<Option<Sport>>;
    fn find_sport_by_name(&self, name: &str) -> RepoResult<Option<Sport>>;
    fn list_sports(&self) -> RepoResult<Vec<Sport>>;
    fn delete_sport(&self, id: SportId) -> RepoResult<()>;
}

/// SQLite-backed sport repository.
pub struct SqliteSportRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSportRepository<'conn> {
    /// Constructs a repository from a migrated connection or transaction.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_ready(conn)?;
        Ok(Self { conn })
    }
}

impl SportRepository for SqliteSportRepository<'_> {
    fn create_sport(&self, draft: &SportDraft) -> RepoResult<SportId> {
        draft.validate()?;

        self.conn.execute(
            "INSERT INTO sports (name, description) VALUES (?1, ?2);",
            params![draft.name.as_str(), draft.description.as_deref()],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_sport(&self, sport: &Sport) -> RepoResult<()> {
        sport.validate()?;

        let changed = self.conn.execute(
            "UPDATE sports
             SET
                name = ?1,
                description = ?2,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?3;",
            params![sport.name.as_str(), sport.description.as_deref(), sport.id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "sport",
                id: sport.id,
            });
        }

        Ok(())
    }

    fn get_sport(&self, id: SportId) -> RepoResult<Option<Sport>> {
        let sport = self
            .conn
            .query_row(
                &format!("{SPORT_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_sport_row,
            )
            .optional()?;
        Ok(sport)
    }

    fn find_sport_by_name(&self, name: &str) -> RepoResult<Option<Sport>> {
        let sport = self
            .conn
            .query_row(
                &format!("{SPORT_SELECT_SQL} WHERE name = ?1;"),
                [name],
                parse_sport_row,
            )
            .optional()?;
        Ok(sport)
    }

    fn list_sports(&self) -> RepoResult<Vec<Sport>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SPORT_SELECT_SQL} ORDER BY id ASC;"))?;
        let sports = stmt
            .query_map([], parse_sport_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(sports)
    }

    fn delete_sport(&self, id: SportId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM sports WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound { entity: "sport", id });
        }
        Ok(())
    }
}

fn parse_sport_row(row: &Row<'_>) -> rusqlite::Result<Sport> {
    Ok(Sport {
        id: row.get("id")?,
        name: row.get("name")?,
        description: row.get("description")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
