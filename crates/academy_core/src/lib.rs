//! Core domain logic for the sports academy backend.
//! This crate is the single source of truth for enrollment invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::category::{Category, CategoryDraft, CategoryId};
pub use model::player::{age_on, Player, PlayerDraft, PlayerId};
pub use model::sport::{Sport, SportDraft, SportId};
pub use model::ValidationError;
pub use repo::category_repo::{CategoryRepository, SqliteCategoryRepository};
pub use repo::player_repo::{Placement, PlayerRepository, SqlitePlayerRepository};
pub use repo::sport_repo::{SportRepository, SqliteSportRepository};
pub use repo::{RepoError, RepoResult};
pub use service::category_service::CategoryService;
pub use service::player_service::{assign_category, PlayerService};
pub use service::sport_service::SportService;
pub use service::{ServiceError, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
