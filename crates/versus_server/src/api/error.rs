//! HTTP error mapping.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use derive_more::{Display, Error, From};
use serde::Serialize;
use tracing::error;
use versus_tictactoe::Coord;

use crate::error::GameError;

/// Message returned for malformed move bodies.
pub const INVALID_PAYLOAD_MESSAGE: &str =
    "Invalid request payload. Provide integers x and y in the request body.";

/// JSON body of every error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    /// Machine-readable code.
    pub error: &'static str,
    /// Human-readable message.
    pub message: String,
    /// Empty cells, for move rejections only.
    pub valid_moves: Option<Vec<Coord>>,
}

/// Errors surfaced by the REST handlers.
#[derive(Debug, Display, Error, From)]
pub enum ApiError {
    /// A lifecycle error.
    #[display("{_0}")]
    #[from]
    Game(GameError),
    /// The request body could not be read as `{x, y}` integers.
    #[display("Invalid payload: {_0}")]
    InvalidPayload(#[error(not(source))] String),
    /// The blocking worker panicked or was cancelled.
    #[display("Worker failed: {_0}")]
    Worker(#[error(not(source))] String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Game(GameError::Rejected {
                reason,
                valid_moves,
            }) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: reason.code(),
                    message: reason.to_string(),
                    valid_moves: Some(valid_moves),
                },
            ),
            ApiError::Game(err @ (GameError::GameNotFound | GameError::NoActiveGame)) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    error: "game_not_found",
                    message: err.to_string(),
                    valid_moves: None,
                },
            ),
            ApiError::InvalidPayload(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorBody {
                    error: "invalid_payload",
                    message: INVALID_PAYLOAD_MESSAGE.to_string(),
                    valid_moves: None,
                },
            ),
            err @ (ApiError::Game(GameError::Storage(_) | GameError::Inconsistent(_))
            | ApiError::Worker(_)) => {
                error!(error = %err, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        error: "internal_error",
                        message: "Internal server error.".to_string(),
                        valid_moves: None,
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
