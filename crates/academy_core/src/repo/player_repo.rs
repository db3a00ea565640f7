//! Player repository contract and SQLite implementation.

use crate::model::category::CategoryId;
use crate::model::player::{Player, PlayerDraft, PlayerId};
use crate::model::sport::SportId;
use crate::repo::{count_rows, ensure_schema_ready, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

const PLAYER_SELECT_SQL: &str = "SELECT
    id,
    first_name,
    last_name,
    national_id,
    birth_date,
    phone,
    email,
    photo_url,
    category_id,
    sport_id,
    created_at,
    updated_at
FROM players";

/// Sport and category a player is enrolled under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub sport_id: SportId,
    pub category_id: CategoryId,
}

/// Repository interface for player persistence.
pub trait PlayerRepository {
    fn create_player(&self, draft: &PlayerDraft, placement: Placement) -> RepoResult<PlayerId>;
    fn update_player(&self, player: &Player) -> RepoResult<()>;
    fn get_player(&self, id: PlayerId) -> RepoResult<Option<Player>>;
    fn find_player_by_national_id(&self, national_id: &str) -> RepoResult<Option<Player>>;
    fn list_players(&self) -> RepoResult<Vec<Player>>;
    fn count_players_by_category(&self, category_id: CategoryId) -> RepoResult<u64>;
    fn count_players_by_sport(&self, sport_id: SportId) -> RepoResult<u64>;
    fn delete_player(&self, id: PlayerId) -> RepoResult<()>;
}

/// SQLite-backed player repository.
pub struct SqlitePlayerRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePlayerRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_ready(conn)?;
        Ok(Self { conn })
    }
}

impl PlayerRepository for SqlitePlayerRepository<'_> {
    fn create_player(&self, draft: &PlayerDraft, placement: Placement) -> RepoResult<PlayerId> {
        let birth_date = draft.validate()?;

        self.conn.execute(
            "INSERT INTO players (
                first_name,
                last_name,
                national_id,
                birth_date,
                phone,
                email,
                photo_url,
                category_id,
                sport_id
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9);",
            params![
                draft.first_name.as_str(),
                draft.last_name.as_str(),
                draft.national_id.as_deref(),
                birth_date,
                draft.phone.as_deref(),
                draft.email.as_deref(),
                draft.photo_url.as_deref(),
                placement.category_id,
                placement.sport_id,
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_player(&self, player: &Player) -> RepoResult<()> {
        player.validate()?;

        let changed = self.conn.execute(
            "UPDATE players
             SET
                first_name = ?1,
                last_name = ?2,
                national_id = ?3,
                birth_date = ?4,
                phone = ?5,
                email = ?6,
                photo_url = ?7,
                category_id = ?8,
                sport_id = ?9,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?10;",
            params![
                player.first_name.as_str(),
                player.last_name.as_str(),
                player.national_id.as_deref(),
                player.birth_date,
                player.phone.as_deref(),
                player.email.as_deref(),
                player.photo_url.as_deref(),
                player.category_id,
                player.sport_id,
                player.id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "player",
                id: player.id,
            });
        }

        Ok(())
    }

    fn get_player(&self, id: PlayerId) -> RepoResult<Option<Player>> {
        let player = self
            .conn
            .query_row(
                &format!("{PLAYER_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_player_row,
            )
            .optional()?;
        Ok(player)
    }

    fn find_player_by_national_id(&self, national_id: &str) -> RepoResult<Option<Player>> {
        let player = self
            .conn
            .query_row(
                &format!("{PLAYER_SELECT_SQL} WHERE national_id = ?1;"),
                [national_id],
                parse_player_row,
            )
            .optional()?;
        Ok(player)
    }

    fn list_players(&self) -> RepoResult<Vec<Player>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PLAYER_SELECT_SQL} ORDER BY id ASC;"))?;
        let players = stmt
            .query_map([], parse_player_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(players)
    }

    fn count_players_by_category(&self, category_id: CategoryId) -> RepoResult<u64> {
        count_rows(
            self.conn,
            "SELECT COUNT(*) FROM players WHERE category_id = ?1;",
            [category_id],
        )
    }

    fn count_players_by_sport(&self, sport_id: SportId) -> RepoResult<u64> {
        count_rows(
            self.conn,
            "SELECT COUNT(*) FROM players WHERE sport_id = ?1;",
            [sport_id],
        )
    }

    fn delete_player(&self, id: PlayerId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM players WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "player",
                id,
            });
        }
        Ok(())
    }
}

// birth_date is stored as ISO `YYYY-MM-DD` text via rusqlite's chrono support.
fn parse_player_row(row: &Row<'_>) -> rusqlite::Result<Player> {
    Ok(Player {
        id: row.get("id")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        national_id: row.get("national_id")?,
        birth_date: row.get("birth_date")?,
        phone: row.get("phone")?,
        email: row.get("email")?,
        photo_url: row.get("photo_url")?,
        category_id: row.get("category_id")?,
        sport_id: row.get("sport_id")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
