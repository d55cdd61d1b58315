//! Stateful game controller wrapping `Board`.
//!
//! `Game` owns the board, whose turn it is and where each king stands. Every
//! submitted move runs the same sequence: classify the position, validate,
//! apply, re-check the opponent, switch turn. Check status is always derived
//! from the current board rather than cached.

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use crate::engine::board::{Board, Occupant, STARTING_PLACEMENT};
use crate::engine::check;
use crate::engine::piece::Piece;
use crate::engine::types::{ChessError, Color, GameStatus, MoveRejection, PieceType, Square};
use crate::engine::validator;

/// (rank, file) steps to the eight squares around a king.
const KING_STEPS: [(i8, i8); 8] = [
    (1, 1),
    (1, 0),
    (0, 1),
    (-1, -1),
    (-1, 0),
    (0, -1),
    (1, -1),
    (-1, 1),
];

// =========================================================================
// MoveReport
// =========================================================================

/// What an applied move did, for the caller to display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveReport {
    pub color: Color,
    pub piece: PieceType,
    pub from: Square,
    pub to: Square,
    /// Kind of the opponent's piece taken on `to`.
    pub captured: Option<PieceType>,
    /// Whether the opponent's king is attacked after the move.
    pub gives_check: bool,
}

impl std::fmt::Display for MoveReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}'s {} moves from {} to {}",
            self.color.title(),
            self.piece.title(),
            self.from,
            self.to
        )?;
        if let Some(captured) = self.captured {
            write!(f, " taking {}'s {}", (!self.color).title(), captured.title())?;
        }
        Ok(())
    }
}

// =========================================================================
// Game
// =========================================================================

/// One match: board, turn and king locations.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    turn: Color,
    /// King squares indexed by `Color::index()`, updated whenever a king moves.
    kings: [Square; 2],
    status: GameStatus,
    last_move: Option<MoveReport>,

    // Metadata
    pub id: String,
    pub created_at: DateTime<Utc>,
}

impl Game {
    // -----------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------

    /// Create a new game from the standard starting position.
    pub fn new() -> Self {
        Self::from_fen(&format!("{STARTING_PLACEMENT} w"))
            .expect("starting position is always valid")
    }

    /// Load a game from a position string.
    ///
    /// Only the piece placement and active colour are read; castling rights,
    /// en-passant target and move counters may follow but are ignored.
    pub fn from_fen(fen: &str) -> Result<Self, ChessError> {
        let mut fields = fen.split_whitespace();
        let placement = fields
            .next()
            .ok_or_else(|| ChessError::InvalidPosition("empty position string".into()))?;
        let board = Board::from_placement(placement)?;

        let turn = match fields.next() {
            Some("w") => Color::White,
            Some("b") => Color::Black,
            Some(other) => {
                return Err(ChessError::InvalidPosition(format!(
                    "invalid active colour: '{other}'"
                )));
            }
            None => {
                return Err(ChessError::InvalidPosition(
                    "missing active colour".to_string(),
                ));
            }
        };

        let king_square = |color: Color| {
            board
                .king_square(color)
                .ok_or_else(|| ChessError::InvalidPosition(format!("{color} has no king")))
        };
        let white_king = king_square(Color::White)?;
        let black_king = king_square(Color::Black)?;

        let mut game = Game {
            board,
            turn,
            kings: [white_king, black_king],
            status: GameStatus::Active,
            last_move: None,
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
        };
        game.status = game.detect_game_state();
        debug!(game = %game.id, status = %game.status, "position loaded");
        Ok(game)
    }

    // -----------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Side to move.
    pub fn side_to_move(&self) -> Color {
        self.turn
    }

    /// Classification of the position for the side to move.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_game_over(&self) -> bool {
        self.status.is_game_over()
    }

    /// Report of the most recent applied move.
    pub fn last_move(&self) -> Option<&MoveReport> {
        self.last_move.as_ref()
    }

    /// The piece on a coordinate such as "E2", or `None` when empty.
    pub fn piece_at(&self, coordinate: &str) -> Result<Option<&Piece>, ChessError> {
        let sq = parse_coordinate(coordinate)?;
        Ok(self.board.piece_at(sq))
    }

    /// Occupants row-major, rank 8 first.
    pub fn snapshot(&self) -> [[Option<Occupant>; 8]; 8] {
        self.board.snapshot()
    }

    /// `color`'s king.
    pub fn king(&self, color: Color) -> Option<&Piece> {
        self.board.piece_at(self.kings[color.index()])
    }

    /// Is `color`'s king attacked right now?
    pub fn in_check(&self, color: Color) -> bool {
        self.king(color)
            .is_some_and(|king| check::detect_check(&self.board, king))
    }

    // -----------------------------------------------------------------
    // Move submission
    // -----------------------------------------------------------------

    /// Submit a move as two coordinates like "E2", "E4".
    ///
    /// Malformed coordinates are refused before anything else runs.
    pub fn submit_move(&mut self, from: &str, to: &str) -> Result<MoveReport, ChessError> {
        let from = parse_coordinate(from)?;
        let to = parse_coordinate(to)?;
        self.make_move(from, to)
    }

    /// Classify, validate, apply, re-check the opponent and switch turn.
    ///
    /// A rejected move leaves the board and turn untouched.
    pub fn make_move(&mut self, from: Square, to: Square) -> Result<MoveReport, ChessError> {
        if self.status.is_game_over() {
            return Err(ChessError::GameOver(self.status));
        }

        self.status = self.detect_game_state();
        if self.status.is_game_over() {
            info!(game = %self.id, status = %self.status, "game over");
            return Err(ChessError::GameOver(self.status));
        }

        let in_check = self.status == GameStatus::Check;
        if let Err(reason) =
            validator::check_move_valid(&self.board, self.turn, in_check, from, to)
        {
            debug!(game = %self.id, %from, %to, code = reason.code(), "move rejected");
            return Err(ChessError::IllegalMove { from, to, reason });
        }

        let mover = self.turn;
        let piece = self
            .board
            .piece_at(from)
            .map(Piece::kind)
            .ok_or(ChessError::IllegalMove {
                from,
                to,
                reason: MoveRejection::NoPieceAtOrigin,
            })?;

        let captured = self.board.apply_move(from, to);
        if piece == PieceType::King {
            self.kings[mover.index()] = to;
        }

        #[cfg(debug_assertions)]
        self.board.assert_consistent();

        // Only the opponent is re-checked; a self-exposing move goes unnoticed.
        let gives_check = self.in_check(!mover);

        let report = MoveReport {
            color: mover,
            piece,
            from,
            to,
            captured,
            gives_check,
        };
        info!(game = %self.id, check = gives_check, "{report}");

        self.turn = !mover;
        self.status = self.detect_game_state();
        self.last_move = Some(report.clone());
        Ok(report)
    }

    // -----------------------------------------------------------------
    // Status detection
    // -----------------------------------------------------------------

    /// Classify the position for the side to move.
    ///
    /// Trial king moves temporarily mutate the board; it is restored before
    /// this returns.
    pub fn detect_game_state(&mut self) -> GameStatus {
        let side = self.turn;
        let in_check = self.in_check(side);
        let trapped = !self.any_safe_squares(side);

        let status = if in_check && trapped {
            GameStatus::Checkmate
        } else if !in_check && trapped && !self.any_piece_can_move() {
            GameStatus::Stalemate
        } else if in_check {
            GameStatus::Check
        } else {
            GameStatus::Active
        };
        debug!(%side, in_check, trapped, %status, "position classified");
        status
    }

    /// Can `color`'s king step onto an empty neighbouring square without
    /// being in check there?
    ///
    /// Each candidate is tried by really moving the king and moving it back.
    /// Occupied neighbours are not considered, so escapes by capture are
    /// not seen.
    pub fn any_safe_squares(&mut self, color: Color) -> bool {
        let origin = self.kings[color.index()];

        for (dr, df) in KING_STEPS {
            let Some(dest) = origin.offset(dr, df) else {
                continue;
            };
            if !self.board.is_empty(dest) {
                continue;
            }

            self.board.relocate(origin, dest);
            let safe = self
                .board
                .piece_at(dest)
                .is_some_and(|king| !check::detect_check(&self.board, king));
            self.board.relocate(dest, origin);

            if safe {
                return true;
            }
        }
        false
    }

    /// Whether the side to move has any legal move at all.
    ///
    /// Not implemented: always reports that a move exists, which keeps
    /// stalemate unreachable.
    pub fn any_piece_can_move(&self) -> bool {
        true
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_coordinate(coordinate: &str) -> Result<Square, ChessError> {
    Square::from_coordinate(coordinate)
        .ok_or_else(|| ChessError::OutOfRangeCoordinate(coordinate.to_string()))
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::from_coordinate(name).unwrap()
    }

    fn rejection(result: Result<MoveReport, ChessError>) -> MoveRejection {
        result
            .unwrap_err()
            .rejection()
            .expect("expected an illegal-move rejection")
    }

    // -----------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------

    #[test]
    fn new_game_is_active() {
        let g = Game::new();
        assert_eq!(g.status(), GameStatus::Active);
        assert!(!g.is_game_over());
        assert_eq!(g.side_to_move(), Color::White);
        assert_eq!(g.king(Color::White).unwrap().square(), sq("E1"));
        assert_eq!(g.king(Color::Black).unwrap().square(), sq("E8"));
    }

    #[test]
    fn from_fen_reads_active_colour() {
        let g = Game::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1")
            .unwrap();
        assert_eq!(g.side_to_move(), Color::Black);
    }

    #[test]
    fn from_fen_ignores_trailing_fields() {
        let g = Game::from_fen("4k3/8/8/8/8/8/8/4K3 w garbage here 99 zz").unwrap();
        assert_eq!(g.side_to_move(), Color::White);
    }

    #[test]
    fn from_fen_errors() {
        assert!(Game::from_fen("").is_err());
        assert!(Game::from_fen("4k3/8/8/8/8/8/8/4K3").is_err());
        assert!(Game::from_fen("4k3/8/8/8/8/8/8/4K3 x").is_err());
        assert!(matches!(
            Game::from_fen("4k3/8/8/8/8/8/8/4X3 w"),
            Err(ChessError::InvalidPieceLetter('X'))
        ));
    }

    #[test]
    fn from_fen_requires_both_kings() {
        assert!(Game::from_fen("8/8/8/8/8/8/8/4K3 w").is_err());
        assert!(Game::from_fen("4k3/8/8/8/8/8/8/8 b").is_err());
    }

    // -----------------------------------------------------------------
    // Making moves
    // -----------------------------------------------------------------

    #[test]
    fn submit_pawn_double_step() {
        let mut g = Game::new();
        let report = g.submit_move("E2", "E4").unwrap();
        assert_eq!(report.color, Color::White);
        assert_eq!(report.piece, PieceType::Pawn);
        assert_eq!(report.captured, None);
        assert!(!report.gives_check);
        assert_eq!(report.to_string(), "White's Pawn moves from E2 to E4");
        assert_eq!(g.side_to_move(), Color::Black);

        let pawn = g.piece_at("E4").unwrap().unwrap();
        assert!(pawn.has_moved);
        assert_eq!(pawn.square(), sq("E4"));
        assert!(g.piece_at("E2").unwrap().is_none());
    }

    #[test]
    fn rejected_move_keeps_turn_and_board() {
        let mut g = Game::new();
        let before = g.board().clone();
        assert_eq!(
            rejection(g.submit_move("E2", "E5")),
            MoveRejection::IllegalPattern(PieceType::Pawn)
        );
        assert_eq!(g.side_to_move(), Color::White);
        assert_eq!(g.board(), &before);
        assert!(g.last_move().is_none());
    }

    #[test]
    fn wrong_side_rejected() {
        let mut g = Game::new();
        assert_eq!(
            rejection(g.submit_move("E7", "E5")),
            MoveRejection::WrongSideToMove(Color::Black)
        );
    }

    #[test]
    fn out_of_range_coordinate_is_recoverable() {
        let mut g = Game::new();
        assert!(matches!(
            g.submit_move("E9", "E4"),
            Err(ChessError::OutOfRangeCoordinate(_))
        ));
        assert!(matches!(
            g.submit_move("e2", "e4"),
            Err(ChessError::OutOfRangeCoordinate(_))
        ));
        assert!(g.submit_move("E2", "E4").is_ok());
    }

    #[test]
    fn capture_is_reported() {
        let mut g = Game::from_fen("4k3/8/8/8/r7/8/8/R3K3 w").unwrap();
        let report = g.submit_move("A1", "A4").unwrap();
        assert_eq!(report.captured, Some(PieceType::Rook));
        assert_eq!(
            report.to_string(),
            "White's Rook moves from A1 to A4 taking Black's Rook"
        );
        assert_eq!(g.board().count(Color::Black), 1);
    }

    #[test]
    fn king_move_updates_king_square() {
        let mut g = Game::from_fen("4k3/8/8/8/8/8/8/4K3 w").unwrap();
        g.submit_move("E1", "D2").unwrap();
        assert_eq!(g.king(Color::White).unwrap().square(), sq("D2"));
    }

    #[test]
    fn giving_check_is_reported() {
        let mut g = Game::from_fen("4k3/8/8/8/8/8/8/R3K3 w").unwrap();
        let report = g.submit_move("A1", "A8").unwrap();
        assert!(report.gives_check);
        assert!(g.in_check(Color::Black));
        assert_eq!(g.status(), GameStatus::Check);
    }

    // -----------------------------------------------------------------
    // Check handling
    // -----------------------------------------------------------------

    #[test]
    fn side_in_check_cannot_move() {
        // White king E1 checked along the first rank, D2 is a safe escape.
        let mut g = Game::from_fen("4k3/8/8/8/8/8/8/q3K3 w").unwrap();
        assert_eq!(g.status(), GameStatus::Check);
        assert_eq!(
            rejection(g.submit_move("E1", "D2")),
            MoveRejection::CannotMoveWhileInCheck
        );
        assert_eq!(g.side_to_move(), Color::White);
    }

    #[test]
    fn self_exposure_is_not_prevented() {
        // The E2 rook shields the king from the E8 rook; moving it away is
        // accepted even though it leaves White in check.
        let mut g = Game::from_fen("k3r3/8/8/8/8/8/4R3/4K3 w").unwrap();
        assert!(g.submit_move("E2", "H2").is_ok());
        assert!(g.in_check(Color::White));
    }

    // -----------------------------------------------------------------
    // Status detection
    // -----------------------------------------------------------------

    #[test]
    fn back_rank_checkmate() {
        let mut g = Game::from_fen("6k1/5ppp/8/8/8/8/8/R3K3 w").unwrap();
        g.submit_move("A1", "A8").unwrap();
        assert_eq!(g.status(), GameStatus::Checkmate);
        assert!(g.is_game_over());

        assert!(matches!(
            g.submit_move("F7", "F6"),
            Err(ChessError::GameOver(GameStatus::Checkmate))
        ));
    }

    #[test]
    fn checkmate_detected_on_load() {
        let g = Game::from_fen("4R1k1/5ppp/8/8/8/8/8/4K3 b").unwrap();
        assert_eq!(g.status(), GameStatus::Checkmate);
    }

    #[test]
    fn trapped_king_not_in_check_is_not_stalemate() {
        // Black king H8 has no safe neighbour but is not attacked.
        let mut g = Game::from_fen("7k/8/6Q1/8/8/8/8/K7 b").unwrap();
        assert!(!g.in_check(Color::Black));
        assert!(!g.any_safe_squares(Color::Black));
        assert!(g.any_piece_can_move());
        assert_eq!(g.status(), GameStatus::Active);
    }

    #[test]
    fn safe_square_search_restores_board() {
        let mut g = Game::from_fen("4k3/8/8/8/8/8/8/q3K3 w").unwrap();
        let before = g.board().clone();
        assert!(g.any_safe_squares(Color::White));
        assert_eq!(g.board(), &before);
        assert!(!g.king(Color::White).unwrap().has_moved);
    }

    #[test]
    fn king_in_corner_with_escape_is_check_only() {
        let g = Game::from_fen("k7/8/8/8/8/8/8/R6K b").unwrap();
        assert_eq!(g.status(), GameStatus::Check);
    }

    // -----------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------

    #[test]
    fn piece_query_rejects_bad_coordinate() {
        let g = Game::new();
        assert!(g.piece_at("Z1").is_err());
        assert_eq!(g.piece_at("D1").unwrap().unwrap().kind(), PieceType::Queen);
    }

    #[test]
    fn snapshot_tracks_moves() {
        let mut g = Game::new();
        g.submit_move("G1", "F3").unwrap();
        let grid = g.snapshot();
        assert_eq!(grid[5][5], Some((Color::White, PieceType::Knight)));
        assert_eq!(grid[7][6], None);
    }
}
