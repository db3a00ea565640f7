use academy_api::{app, AppState};
use academy_core::db::open_db_in_memory;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::{Local, Months};
use serde_json::{json, Value};
use tower::ServiceExt;

fn test_app() -> Router {
    app(AppState::new(open_db_in_memory().unwrap()))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create_sport(app: &Router, name: &str) -> i64 {
    let (status, body) = send(app, Method::POST, "/api/sports", Some(json!({ "name": name }))).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_i64().unwrap()
}

async fn create_category(app: &Router, sport_id: i64, name: &str, min: i64, max: i64) -> i64 {
    let (status, body) = send(
        app,
        Method::POST,
        &format!("/api/categories?sportId={sport_id}"),
        Some(json!({ "name": name, "minAge": min, "maxAge": max })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_i64().unwrap()
}

fn years_ago(years: u32) -> String {
    Local::now()
        .date_naive()
        .checked_sub_months(Months::new(years * 12))
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn health_reports_version() {
    let app = test_app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], academy_core::core_version());
}

#[tokio::test]
async fn sport_crud_roundtrip() {
    let app = test_app();
    let (status, created) = send(
        &app,
        Method::POST,
        "/api/sports",
        Some(json!({ "name": "Football", "description": "eleven a side" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["name"], "Football");
    assert!(created["createdAt"].is_i64());

    let (status, listed) = send(&app, Method::GET, "/api/sports", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/api/sports/{id}"),
        Some(json!({ "name": "Futsal" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Futsal");
    assert_eq!(updated["description"], Value::Null);

    let (status, _) = send(&app, Method::DELETE, &format!("/api/sports/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, Method::GET, &format!("/api/sports/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);
    assert_eq!(body["error"], "Not Found");
    assert_eq!(body["path"], format!("/api/sports/{id}"));
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn duplicate_sport_is_bad_request() {
    let app = test_app();
    create_sport(&app, "Football").await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/sports",
        Some(json!({ "name": "Football" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Bad Request");
    assert_eq!(body["path"], "/api/sports");
}

#[tokio::test]
async fn malformed_input_is_bad_request() {
    let app = test_app();

    let (status, body) = send(&app, Method::GET, "/api/sports/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/sports")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let sport_id = create_sport(&app, "Football").await;
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/categories",
        Some(json!({ "name": "U10", "minAge": 6, "maxAge": 9 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/api/categories?sportId={sport_id}"),
        Some(json!({ "name": "U10", "minAge": 9, "maxAge": 6 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_route_uses_error_body() {
    let app = test_app();
    let (status, body) = send(&app, Method::GET, "/api/teams", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["path"], "/api/teams");
}

#[tokio::test]
async fn categories_by_sport_and_delete_conflicts() {
    let app = test_app();
    let football = create_sport(&app, "Football").await;
    let basketball = create_sport(&app, "Basketball").await;
    let a = create_category(&app, football, "A", 6, 9).await;
    create_category(&app, basketball, "Mini", 6, 9).await;

    let (status, listed) = send(
        &app,
        Method::GET,
        &format!("/api/categories/by-sport/{football}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"], a);
    assert_eq!(listed[0]["minAge"], 6);
    assert_eq!(listed[0]["sportId"], football);

    let (status, _) = send(&app, Method::GET, "/api/categories/by-sport/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, Method::DELETE, &format!("/api/sports/{football}"), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Conflict");

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/api/players?sportId={football}"),
        Some(json!({ "firstName": "Ana", "lastName": "Ruiz", "birthDate": years_ago(7) })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(&app, Method::DELETE, &format!("/api/categories/{a}"), None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/categories/{a}?newSportId={basketball}"),
        Some(json!({ "name": "A", "minAge": 6, "maxAge": 9 })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn football_example_over_http() {
    let app = test_app();
    let football = create_sport(&app, "Football").await;
    create_category(&app, football, "A", 6, 9).await;
    let b = create_category(&app, football, "B", 10, 13).await;

    let player_body = json!({
        "firstName": "Leo",
        "lastName": "Diaz",
        "nationalId": "ID-10",
        "birthDate": years_ago(10),
        "email": "leo@example.com"
    });
    let (status, player) = send(
        &app,
        Method::POST,
        &format!("/api/players?sportId={football}"),
        Some(player_body.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{player}");
    assert_eq!(player["categoryId"], b);
    assert_eq!(player["sportId"], football);
    assert_eq!(player["nationalId"], "ID-10");
    let player_id = player["id"].as_i64().unwrap();

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/categories/{b}"),
        Some(json!({ "name": "B", "minAge": 11, "maxAge": 13 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/players/{player_id}"),
        Some(player_body),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("no suitable category"));

    let (status, _) = send(&app, Method::DELETE, &format!("/api/players/{player_id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, players) = send(&app, Method::GET, "/api/players", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(players.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn player_without_matching_category_is_not_persisted() {
    let app = test_app();
    let football = create_sport(&app, "Football").await;
    create_category(&app, football, "A", 6, 9).await;

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/api/players?sportId={football}"),
        Some(json!({ "firstName": "Old", "lastName": "Timer", "birthDate": years_ago(30) })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, players) = send(&app, Method::GET, "/api/players", None).await;
    assert!(players.as_array().unwrap().is_empty());
}
