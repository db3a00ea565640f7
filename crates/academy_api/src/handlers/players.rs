//! Player API handlers
//!
//! Ages are computed against the server's local calendar date.

use crate::error::ApiResult;
use crate::models::{NewSportQuery, SportIdQuery};
use crate::state::AppState;
use academy_core::{Player, PlayerDraft, PlayerId, PlayerService};
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

pub async fn list_players(State(state): State<AppState>) -> ApiResult<Json<Vec<Player>>> {
    let players = state.run(|conn| PlayerService::new(conn).list()).await?;
    Ok(Json(players))
}

pub async fn get_player(
    State(state): State<AppState>,
    id: Result<Path<PlayerId>, PathRejection>,
) -> ApiResult<Json<Player>> {
    let Path(id) = id?;
    let player = state
        .run(move |conn| PlayerService::new(conn).get_by_id(id))
        .await?;
    Ok(Json(player))
}

pub async fn create_player(
    State(state): State<AppState>,
    query: Result<Query<SportIdQuery>, QueryRejection>,
    payload: Result<Json<PlayerDraft>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Player>)> {
    let Query(SportIdQuery { sport_id }) = query?;
    let Json(draft) = payload?;
    let player = state
        .run(move |conn| PlayerService::new(conn).create(draft, sport_id))
        .await?;
    Ok((StatusCode::CREATED, Json(player)))
}

pub async fn update_player(
    State(state): State<AppState>,
    id: Result<Path<PlayerId>, PathRejection>,
    query: Result<Query<NewSportQuery>, QueryRejection>,
    payload: Result<Json<PlayerDraft>, JsonRejection>,
) -> ApiResult<Json<Player>> {
    let Path(id) = id?;
    let Query(NewSportQuery { new_sport_id }) = query?;
    let Json(draft) = payload?;
    let player = state
        .run(move |conn| PlayerService::new(conn).update(id, draft, new_sport_id))
        .await?;
    Ok(Json(player))
}

pub async fn delete_player(
    State(state): State<AppState>,
    id: Result<Path<PlayerId>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = id?;
    state
        .run(move |conn| PlayerService::new(conn).delete(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
