//! Sport API handlers

use crate::error::ApiResult;
use crate::state::AppState;
use academy_core::{Sport, SportDraft, SportId, SportService};
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

pub async fn list_sports(State(state): State<AppState>) -> ApiResult<Json<Vec<Sport>>> {
    let sports = state.run(|conn| SportService::new(conn).list()).await?;
    Ok(Json(sports))
}

pub async fn get_sport(
    State(state): State<AppState>,
    id: Result<Path<SportId>, PathRejection>,
) -> ApiResult<Json<Sport>> {
    let Path(id) = id?;
    let sport = state
        .run(move |conn| SportService::new(conn).get_by_id(id))
        .await?;
    Ok(Json(sport))
}

pub async fn create_sport(
    State(state): State<AppState>,
    payload: Result<Json<SportDraft>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Sport>)> {
    let Json(draft) = payload?;
    let sport = state
        .run(move |conn| SportService::new(conn).create(draft))
        .await?;
    Ok((StatusCode::CREATED, Json(sport)))
}

pub async fn update_sport(
    State(state): State<AppState>,
    id: Result<Path<SportId>, PathRejection>,
    payload: Result<Json<SportDraft>, JsonRejection>,
) -> ApiResult<Json<Sport>> {
    let Path(id) = id?;
    let Json(draft) = payload?;
    let sport = state
        .run(move |conn| SportService::new(conn).update(id, draft))
        .await?;
    Ok(Json(sport))
}

pub async fn delete_sport(
    State(state): State<AppState>,
    id: Result<Path<SportId>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = id?;
    state
        .run(move |conn| SportService::new(conn).delete(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
