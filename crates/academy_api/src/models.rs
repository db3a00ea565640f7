//! Request query and response shapes that are not core records.

use academy_core::SportId;
use serde::{Deserialize, Serialize};

/// `?sportId=` on create endpoints.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SportIdQuery {
    pub sport_id: SportId,
}

/// Optional `?newSportId=` on update endpoints.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSportQuery {
    #[serde(default)]
    pub new_sport_id: Option<SportId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
}
