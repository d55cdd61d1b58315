use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::engine::ChessError;

/// Structured API error that serializes to JSON.
#[derive(Debug)]
pub enum ApiError {
    GameNotFound(String),
    IllegalMove(ChessError),
    InvalidPosition(ChessError),
    InvalidRequest(String),
    GameOver(String),
    TooManyGames(usize),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorDetail {
    code: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::GameNotFound(id) => (
                StatusCode::NOT_FOUND,
                "GAME_NOT_FOUND",
                format!("Game not found: {id}"),
            ),
            ApiError::IllegalMove(err) => {
                let code = err.rejection().map_or("INVALID_MOVE", |r| r.code());
                (StatusCode::BAD_REQUEST, code, err.to_string())
            }
            ApiError::InvalidPosition(err) => {
                (StatusCode::BAD_REQUEST, "INVALID_POSITION", err.to_string())
            }
            ApiError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, "INVALID_REQUEST", msg),
            ApiError::GameOver(msg) => (
                StatusCode::BAD_REQUEST,
                "GAME_OVER",
                format!("Game is already over: {msg}"),
            ),
            ApiError::TooManyGames(limit) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "TOO_MANY_GAMES",
                format!("Game limit of {limit} reached"),
            ),
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<ChessError> for ApiError {
    fn from(err: ChessError) -> Self {
        match &err {
            ChessError::IllegalMove { .. } => ApiError::IllegalMove(err),
            ChessError::InvalidPieceLetter(_) | ChessError::InvalidPosition(_) => {
                ApiError::InvalidPosition(err)
            }
            ChessError::OutOfRangeCoordinate(_) => ApiError::InvalidRequest(err.to_string()),
            ChessError::GameOver(status) => ApiError::GameOver(status.to_string()),
        }
    }
}
