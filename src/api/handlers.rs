use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use tracing::{info, warn};

use crate::engine::game::Game;

use super::errors::ApiError;
use super::models::*;
use super::state::SharedState;

// =========================================================================
// Health
// =========================================================================

/// GET /health
pub async fn health(State(state): State<SharedState>) -> Json<HealthResponse> {
    let uptime = state.start_time.elapsed().as_secs();
    let games = state.games.read().await.len();
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        games,
        uptime,
    })
}

// =========================================================================
// Create Game
// =========================================================================

/// POST /api/games
pub async fn create_game(
    State(state): State<SharedState>,
    Json(input): Json<CreateGameRequest>,
) -> Result<(StatusCode, Json<GameResponse>), ApiError> {
    let fen = input.fen.as_deref().unwrap_or(&state.config.default_fen);
    let game = Game::from_fen(fen).map_err(ApiError::from)?;

    let mut games = state.games.write().await;
    if games.len() >= state.config.max_games {
        warn!(limit = state.config.max_games, "game limit reached");
        return Err(ApiError::TooManyGames(state.config.max_games));
    }

    let response = game_to_response(&game);
    info!(game = %game.id, status = %game.status(), "game created");
    games.insert(game.id.clone(), game);

    Ok((StatusCode::CREATED, Json(response)))
}

// =========================================================================
// List Games
// =========================================================================

/// GET /api/games
pub async fn list_games(
    State(state): State<SharedState>,
    Query(query): Query<ListGamesQuery>,
) -> Json<ListGamesResponse> {
    let games = state.games.read().await;

    let limit = query.limit.unwrap_or(10).min(100);
    let offset = query.offset.unwrap_or(0);

    let mut filtered: Vec<&Game> = games.values().collect();

    if let Some(ref status_filter) = query.status {
        let sf = status_filter.to_lowercase();
        filtered.retain(|g| g.status().as_str() == sf);
    }

    let total = filtered.len();

    // Newest first.
    filtered.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let page: Vec<GameResponse> = filtered
        .into_iter()
        .skip(offset)
        .take(limit)
        .map(game_to_response)
        .collect();

    Json(ListGamesResponse {
        games: page,
        total,
        limit,
        offset,
    })
}

// =========================================================================
// Get / Delete Game
// =========================================================================

/// GET /api/games/{id}
pub async fn get_game(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<GameResponse>, ApiError> {
    let games = state.games.read().await;
    let game = games
        .get(&id)
        .ok_or_else(|| ApiError::GameNotFound(id.clone()))?;
    Ok(Json(game_to_response(game)))
}

/// DELETE /api/games/{id}
pub async fn delete_game(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let mut games = state.games.write().await;
    games
        .remove(&id)
        .ok_or_else(|| ApiError::GameNotFound(id.clone()))?;
    info!(game = %id, "game deleted");
    Ok(Json(DeleteResponse {
        success: true,
        message: "Game deleted".to_string(),
    }))
}

// =========================================================================
// Submit Move
// =========================================================================

/// POST /api/games/{id}/moves
pub async fn submit_move(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(input): Json<MoveRequest>,
) -> Result<Json<GameResponse>, ApiError> {
    let mut games = state.games.write().await;
    let game = games
        .get_mut(&id)
        .ok_or_else(|| ApiError::GameNotFound(id.clone()))?;

    game.submit_move(&input.from, &input.to)
        .map_err(ApiError::from)?;

    if game.is_game_over() {
        info!(game = %id, status = %game.status(), "game finished");
    }

    Ok(Json(game_to_response(game)))
}

// =========================================================================
// Queries
// =========================================================================

/// GET /api/games/{id}/squares/{square}
pub async fn get_square(
    State(state): State<SharedState>,
    Path((id, square)): Path<(String, String)>,
) -> Result<Json<SquareResponse>, ApiError> {
    let games = state.games.read().await;
    let game = games
        .get(&id)
        .ok_or_else(|| ApiError::GameNotFound(id.clone()))?;

    let piece = game.piece_at(&square).map_err(ApiError::from)?;
    Ok(Json(SquareResponse {
        square,
        piece: piece.map(piece_info),
    }))
}

/// GET /api/games/{id}/board
///
/// Plain-text rendering, rank 8 on top.
pub async fn render_board(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let games = state.games.read().await;
    let game = games
        .get(&id)
        .ok_or_else(|| ApiError::GameNotFound(id.clone()))?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        game.board().board_string(),
    ))
}

// =========================================================================
// Tests
// =========================================================================
