//! HTTP tests driving the router in-process.

mod common;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tempfile::NamedTempFile;
use tower::ServiceExt;
use versus_server::{AppState, router};

const ORIGIN: &str = "http://localhost:4000";

fn setup_app(chaos: bool) -> (NamedTempFile, Router) {
    let (db, service) = common::setup_service(chaos);
    (db, router(AppState::new(service), &[ORIGIN.to_string()]))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Request failed");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    let body = serde_json::from_slice(&bytes).expect("Body is not JSON");
    (status, body)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::get(uri).body(Body::empty()).expect("Bad request");
    send(app, request).await
}

async fn post(app: &Router, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("Bad request");
    send(app, request).await
}

async fn create(app: &Router) -> Value {
    let (status, body) = post(app, "/games", "").await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

#[tokio::test]
async fn test_health() {
    let (_db, app) = setup_app(false);
    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_create_game_response() {
    let (_db, app) = setup_app(false);
    let body = create(&app).await;

    assert!(body["id"].as_str().expect("id").starts_with('c'));
    assert_eq!(body["status"], "in_progress");
    assert_eq!(body["starting_player"], "O");
    assert_eq!(body["bot_type"], "smart");
    assert_eq!(body["current_turn"], "X");
    assert_eq!(body["bot_move"], json!({ "x": 0, "y": 0 }));
    assert_eq!(body["message"], Value::Null);
    assert_eq!(
        body["board"],
        json!([["O", ".", "."], [".", ".", "."], [".", ".", "."]])
    );
}

#[tokio::test]
async fn test_chaos_message() {
    let (_db, app) = setup_app(true);
    let body = create(&app).await;
    assert_eq!(body["bot_type"], "chaos");
    assert_eq!(body["message"], "You're facing the Chaos Bot!");
}

#[tokio::test]
async fn test_current_game() {
    let (_db, app) = setup_app(false);
    let (status, body) = get(&app, "/games/current").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "game_not_found");
    assert_eq!(body["message"], "No in-progress game found.");

    let created = create(&app).await;
    let (status, body) = get(&app, "/games/current").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], created["id"]);
    assert_eq!(body["current_turn"], "X");
    assert!(body["created_at"].is_string());
}

#[tokio::test]
async fn test_move_and_bot_reply() {
    let (_db, app) = setup_app(false);
    let id = create(&app).await["id"].as_str().expect("id").to_string();

    let (status, body) = post(&app, &format!("/games/{}/moves", id), r#"{"x":1,"y":1}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "in_progress");
    assert_eq!(body["bot_move"], json!({ "x": 1, "y": 0 }));
    assert_eq!(body["current_turn"], "X");
    assert_eq!(
        body["board"],
        json!([["O", "O", "."], [".", "X", "."], [".", ".", "."]])
    );
}

#[tokio::test]
async fn test_invalid_payload() {
    let (_db, app) = setup_app(false);
    let id = create(&app).await["id"].as_str().expect("id").to_string();
    let uri = format!("/games/{}/moves", id);

    for payload in [
        r#"{"x":"nope","y":0}"#,
        r#"{"x":1}"#,
        "not json",
        r#"{"x":1.5,"y":0}"#,
        r#"{"x":"1","y":0}"#,
        r#"{"x":null,"y":0}"#,
    ] {
        let (status, body) = post(&app, &uri, payload).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "payload {}", payload);
        assert_eq!(body["error"], "invalid_payload");
        assert_eq!(
            body["message"],
            "Invalid request payload. Provide integers x and y in the request body."
        );
        assert_eq!(body["valid_moves"], Value::Null);
    }
}

#[tokio::test]
async fn test_out_of_bounds() {
    let (_db, app) = setup_app(false);
    let id = create(&app).await["id"].as_str().expect("id").to_string();

    let (status, body) = post(&app, &format!("/games/{}/moves", id), r#"{"x":9,"y":-1}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "out_of_bounds");
    assert_eq!(
        body["message"],
        "Coordinates must be in range 0-2 for both x and y."
    );
    assert_eq!(body["valid_moves"].as_array().expect("valid_moves").len(), 8);

    for payload in [
        r#"{"x":99999999999999999999,"y":0}"#,
        r#"{"x":0,"y":-99999999999999999999}"#,
        r#"{"x":3.0,"y":0}"#,
    ] {
        let (status, body) = post(&app, &format!("/games/{}/moves", id), payload).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "payload {}", payload);
        assert_eq!(body["error"], "out_of_bounds");
        assert_eq!(body["valid_moves"].as_array().expect("valid_moves").len(), 8);
    }
}

#[tokio::test]
async fn test_integral_float_coordinates() {
    let (_db, app) = setup_app(false);
    let id = create(&app).await["id"].as_str().expect("id").to_string();

    let (status, body) = post(&app, &format!("/games/{}/moves", id), r#"{"x":1.0,"y":1.0}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["bot_move"], json!({ "x": 1, "y": 0 }));
    assert_eq!(
        body["board"],
        json!([["O", "O", "."], [".", "X", "."], [".", ".", "."]])
    );
}

#[tokio::test]
async fn test_cell_occupied() {
    let (_db, app) = setup_app(false);
    let id = create(&app).await["id"].as_str().expect("id").to_string();

    let (status, body) = post(&app, &format!("/games/{}/moves", id), r#"{"x":0,"y":0}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "cell_occupied");
    assert_eq!(body["message"], "That cell is already taken. Try another move.");
    let valid = body["valid_moves"].as_array().expect("valid_moves");
    assert_eq!(valid.len(), 8);
    assert!(!valid.contains(&json!({ "x": 0, "y": 0 })));
}

#[tokio::test]
async fn test_unknown_game() {
    let (_db, app) = setup_app(false);

    let (status, body) = get(&app, "/games/c-missing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "game_not_found");
    assert_eq!(body["message"], "Game not found.");
    assert_eq!(body["valid_moves"], Value::Null);

    let (status, _) = get(&app, "/games/c-missing/moves").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = post(&app, "/games/c-missing/moves", r#"{"x":0,"y":0}"#).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_games() {
    let (_db, app) = setup_app(false);
    let first = create(&app).await;
    let second = create(&app).await;

    let (status, body) = get(&app, "/games").await;
    assert_eq!(status, StatusCode::OK);
    let games = body["games"].as_array().expect("games");
    assert_eq!(games.len(), 2);

    assert_eq!(games[0]["id"], first["id"]);
    assert_eq!(games[0]["status"], "abandoned");
    assert_eq!(games[0]["move_count"], 1);
    assert_eq!(
        games[0]["final_board"],
        json!([["O", ".", "."], [".", ".", "."], [".", ".", "."]])
    );

    assert_eq!(games[1]["id"], second["id"]);
    assert_eq!(games[1]["status"], "in_progress");
    assert_eq!(games[1]["move_count"], 0);
    assert_eq!(games[1]["final_board"], Value::Null);
}

#[tokio::test]
async fn test_list_moves() {
    let (_db, app) = setup_app(false);
    let id = create(&app).await["id"].as_str().expect("id").to_string();
    post(&app, &format!("/games/{}/moves", id), r#"{"x":2,"y":2}"#).await;

    let (status, body) = get(&app, &format!("/games/{}/moves", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["game_id"], id.as_str());
    let moves = body["moves"].as_array().expect("moves");
    let players: Vec<&str> = moves
        .iter()
        .map(|m| m["player"].as_str().expect("player"))
        .collect();
    assert_eq!(players, vec!["O", "X", "O"]);
    assert_eq!(moves[1]["move_number"], 2);
    assert_eq!(moves[1]["x"], 2);
    assert_eq!(moves[1]["y"], 2);
}

#[tokio::test]
async fn test_cors_allows_configured_origin() {
    let (_db, app) = setup_app(false);
    let request = Request::get("/health")
        .header(header::ORIGIN, ORIGIN)
        .body(Body::empty())
        .expect("Bad request");
    let response = app.oneshot(request).await.expect("Request failed");

    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
        Some(&header::HeaderValue::from_static(ORIGIN))
    );
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS),
        Some(&header::HeaderValue::from_static("true"))
    );
}

#[tokio::test]
async fn test_cors_ignores_unknown_origin() {
    let (_db, app) = setup_app(false);
    let request = Request::get("/health")
        .header(header::ORIGIN, "http://evil.example")
        .body(Body::empty())
        .expect("Bad request");
    let response = app.oneshot(request).await.expect("Request failed");

    assert!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none()
    );
}
