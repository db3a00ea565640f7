//! Category API handlers

use crate::error::ApiResult;
use crate::models::{NewSportQuery, SportIdQuery};
use crate::state::AppState;
use academy_core::{Category, CategoryDraft, CategoryId, CategoryService, SportId};
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

pub async fn list_categories(State(state): State<AppState>) -> ApiResult<Json<Vec<Category>>> {
    let categories = state
        .run(|conn| CategoryService::new(conn).list())
        .await?;
    Ok(Json(categories))
}

pub async fn get_category(
    State(state): State<AppState>,
    id: Result<Path<CategoryId>, PathRejection>,
) -> ApiResult<Json<Category>> {
    let Path(id) = id?;
    let category = state
        .run(move |conn| CategoryService::new(conn).get_by_id(id))
        .await?;
    Ok(Json(category))
}

/// `GET /api/categories/by-sport/:sport_id`
pub async fn list_categories_by_sport(
    State(state): State<AppState>,
    sport_id: Result<Path<SportId>, PathRejection>,
) -> ApiResult<Json<Vec<Category>>> {
    let Path(sport_id) = sport_id?;
    let categories = state
        .run(move |conn| CategoryService::new(conn).list_by_sport(sport_id))
        .await?;
    Ok(Json(categories))
}

pub async fn create_category(
    State(state): State<AppState>,
    query: Result<Query<SportIdQuery>, QueryRejection>,
    payload: Result<Json<CategoryDraft>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Category>)> {
    let Query(SportIdQuery { sport_id }) = query?;
    let Json(draft) = payload?;
    let category = state
        .run(move |conn| CategoryService::new(conn).create(draft, sport_id))
        .await?;
    Ok((StatusCode::CREATED, Json(category)))
}

pub async fn update_category(
    State(state): State<AppState>,
    id: Result<Path<CategoryId>, PathRejection>,
    query: Result<Query<NewSportQuery>, QueryRejection>,
    payload: Result<Json<CategoryDraft>, JsonRejection>,
) -> ApiResult<Json<Category>> {
    let Path(id) = id?;
    let Query(NewSportQuery { new_sport_id }) = query?;
    let Json(draft) = payload?;
    let category = state
        .run(move |conn| CategoryService::new(conn).update(id, draft, new_sport_id))
        .await?;
    Ok(Json(category))
}

pub async fn delete_category(
    State(state): State<AppState>,
    id: Result<Path<CategoryId>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = id?;
    state
        .run(move |conn| CategoryService::new(conn).delete(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
