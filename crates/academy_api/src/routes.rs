//! API route definitions

use crate::error::{ApiError, ApiResult};
use crate::handlers::{categories, health, players, sports};
use crate::middleware::request_logging;
use crate::state::AppState;
use axum::http::{Method, Uri};
use axum::routing::get;
use axum::{middleware, Router};
use tower_http::cors::CorsLayer;

/// API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Sports
        .route(
            "/api/sports",
            get(sports::list_sports).post(sports::create_sport),
        )
        .route(
            "/api/sports/:id",
            get(sports::get_sport)
                .put(sports::update_sport)
                .delete(sports::delete_sport),
        )
        // Categories
        .route(
            "/api/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/api/categories/by-sport/:sport_id",
            get(categories::list_categories_by_sport),
        )
        .route(
            "/api/categories/:id",
            get(categories::get_category)
                .put(categories::update_category)
                .delete(categories::delete_category),
        )
        // Players
        .route(
            "/api/players",
            get(players::list_players).post(players::create_player),
        )
        .route(
            "/api/players/:id",
            get(players::get_player)
                .put(players::update_player)
                .delete(players::delete_player),
        )
        .fallback(unknown_route)
}

/// Full application with state, request logging and CORS.
pub fn app(state: AppState) -> Router {
    api_routes()
        .layer(middleware::from_fn(request_logging))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn unknown_route(method: Method, uri: Uri) -> ApiResult<()> {
    Err(ApiError::NotFound(format!(
        "no route for {method} {}",
        uri.path()
    )))
}
