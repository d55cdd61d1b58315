use serde::{Deserialize, Serialize};

use crate::engine::game::{Game, MoveReport};
use crate::engine::piece::Piece;

// ---------------------------------------------------------------------------
// Request models
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGameRequest {
    pub fen: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListGamesQuery {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
    pub status: Option<String>,
}

// ---------------------------------------------------------------------------
// Response models
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub games: usize,
    pub uptime: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResponse {
    pub id: String,
    pub board: Vec<Vec<Option<String>>>,
    pub placement: String,
    pub status: String,
    pub current_player: String,
    pub check: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_move: Option<MoveReportView>,
    pub created_at: String,
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MoveReportView {
    pub color: String,
    pub piece: String,
    pub from: String,
    pub to: String,
    pub captured: Option<String>,
    pub gives_check: bool,
    pub description: String,
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PieceInfo {
    #[serde(rename = "type")]
    pub piece_type: String,
    pub color: String,
    pub has_moved: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SquareResponse {
    pub square: String,
    pub piece: Option<PieceInfo>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListGamesResponse {
    pub games: Vec<GameResponse>,
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

/// Build the 8×8 board array for the API response.
/// Row 0 = rank 8 (top), row 7 = rank 1 (bottom).
/// Pieces: uppercase for White ("R"), lowercase for Black ("r").
/// Empty = None.
pub fn board_to_api(game: &Game) -> Vec<Vec<Option<String>>> {
    game.snapshot()
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| cell.map(|(color, kind)| kind.to_char(color).to_string()))
                .collect()
        })
        .collect()
}

pub fn piece_info(piece: &Piece) -> PieceInfo {
    PieceInfo {
        piece_type: piece.kind().to_string(),
        color: piece.color().to_string(),
        has_moved: piece.has_moved,
    }
}

pub fn report_to_view(report: &MoveReport) -> MoveReportView {
    MoveReportView {
        color: report.color.to_string(),
        piece: report.piece.to_string(),
        from: report.from.to_coordinate(),
        to: report.to.to_coordinate(),
        captured: report.captured.map(|kind| kind.to_string()),
        gives_check: report.gives_check,
        description: report.to_string(),
    }
}

pub fn game_to_response(game: &Game) -> GameResponse {
    GameResponse {
        id: game.id.clone(),
        board: board_to_api(game),
        placement: game.board().placement(),
        status: game.status().as_str().to_string(),
        current_player: game.side_to_move().to_string(),
        check: game.in_check(game.side_to_move()),
        last_move: game.last_move().map(report_to_view),
        created_at: game.created_at.to_rfc3339(),
    }
}
