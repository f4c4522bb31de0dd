//! Route table and handlers.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{HeaderValue, StatusCode},
    routing::get,
};
use serde::{Deserialize, Deserializer, de::Error as _};
use serde_json::{Number, Value, json};
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{debug, instrument, warn};

use crate::api::{ApiError, AppState};
use crate::error::GameError;
use crate::lifecycle::GameService;
use crate::views::{CreatedGame, GameDetail, GamesList, MoveResult, MovesList};

/// Body of `POST /games/{id}/moves`.
///
/// Any JSON integer is accepted, as is a float with no fractional part.
/// Values beyond the `i64` range saturate, so they still fail the bounds
/// check rather than the payload check.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct MoveRequest {
    /// Column.
    #[serde(deserialize_with = "integral")]
    pub x: i64,
    /// Row.
    #[serde(deserialize_with = "integral")]
    pub y: i64,
}

fn integral<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let number = Number::deserialize(deserializer)?;
    if let Some(value) = number.as_i64() {
        return Ok(value);
    }
    if number.as_u64().is_some() {
        return Ok(i64::MAX);
    }
    match number.as_f64() {
        // `as` saturates at the i64 bounds.
        Some(value) if value.is_finite() && value.fract() == 0.0 => Ok(value as i64),
        _ => Err(D::Error::custom(format!("expected an integer, got {}", number))),
    }
}

/// Builds the application router with CORS for `cors_origins`.
#[instrument(skip(state))]
pub fn router(state: AppState, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/games", get(list_games).post(create_game))
        .route("/games/current", get(current_game))
        .route("/games/{game_id}", get(get_game))
        .route("/games/{game_id}/moves", get(list_moves).post(make_move))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors_origins))
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    debug!(count = allowed.len(), "CORS origins configured");

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}

/// Runs a lifecycle call on the blocking pool.
async fn blocking<T, F>(state: &AppState, call: F) -> Result<T, ApiError>
where
    F: FnOnce(&GameService) -> Result<T, GameError> + Send + 'static,
    T: Send + 'static,
{
    let service = state.service.clone();
    let result = tokio::task::spawn_blocking(move || call(&*service))
        .await
        .map_err(|e| ApiError::Worker(e.to_string()))?;
    Ok(result?)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[instrument(skip(state))]
async fn create_game(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<CreatedGame>), ApiError> {
    let created = blocking(&state, |service| service.create_game()).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[instrument(skip(state))]
async fn list_games(State(state): State<AppState>) -> Result<Json<GamesList>, ApiError> {
    Ok(Json(blocking(&state, |service| service.list_games()).await?))
}

#[instrument(skip(state))]
async fn current_game(State(state): State<AppState>) -> Result<Json<GameDetail>, ApiError> {
    Ok(Json(blocking(&state, |service| service.current_game()).await?))
}

#[instrument(skip(state))]
async fn get_game(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> Result<Json<GameDetail>, ApiError> {
    Ok(Json(
        blocking(&state, move |service| service.get_game(&game_id)).await?,
    ))
}

#[instrument(skip(state))]
async fn list_moves(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> Result<Json<MovesList>, ApiError> {
    Ok(Json(
        blocking(&state, move |service| service.list_moves(&game_id)).await?,
    ))
}

#[instrument(skip(state, payload))]
async fn make_move(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
    payload: Result<Json<MoveRequest>, JsonRejection>,
) -> Result<Json<MoveResult>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!(%game_id, error = %rejection.body_text(), "Invalid move payload");
        ApiError::InvalidPayload(rejection.body_text())
    })?;
    debug!(%game_id, x = request.x, y = request.y, "Move requested");
    Ok(Json(
        blocking(&state, move |service| {
            service.apply_move(&game_id, request.x, request.y)
        })
        .await?,
    ))
}
