//! Rule-level behaviour checked through the public engine API.

use chess_rules::engine::check::detect_check;
use chess_rules::engine::{
    Board, ChessError, Color, Game, GameStatus, MoveRejection, MoveReport, PieceType, Square,
};

fn sq(name: &str) -> Square {
    Square::from_coordinate(name).unwrap()
}

fn rejection(result: Result<MoveReport, ChessError>) -> MoveRejection {
    result
        .unwrap_err()
        .rejection()
        .expect("expected a move rejection")
}

// =====================================================================
// Starting position
// =====================================================================

#[test]
fn starting_position_has_sixteen_pieces_each() {
    let game = Game::new();
    assert_eq!(game.board().count(Color::White), 16);
    assert_eq!(game.board().count(Color::Black), 16);
    assert_eq!(game.side_to_move(), Color::White);
    assert_eq!(game.status(), GameStatus::Active);
}

#[test]
fn every_piece_knows_its_slot() {
    let game = Game::new();
    for square in Square::all() {
        if let Some(piece) = game.board().piece_at(square) {
            assert_eq!(piece.square(), square);
            assert!(!piece.has_moved);
        }
    }

    let back_rank = [
        PieceType::Rook,
        PieceType::Knight,
        PieceType::Bishop,
        PieceType::Queen,
        PieceType::King,
        PieceType::Bishop,
        PieceType::Knight,
        PieceType::Rook,
    ];
    for (file, kind) in back_rank.into_iter().enumerate() {
        let white = Square::from_rank_file(0, file as i8).unwrap();
        let black = Square::from_rank_file(7, file as i8).unwrap();
        let w = game.board().piece_at(white).unwrap();
        let b = game.board().piece_at(black).unwrap();
        assert_eq!((w.color(), w.kind()), (Color::White, kind));
        assert_eq!((b.color(), b.kind()), (Color::Black, kind));
    }
}

// =====================================================================
// Pawn advance
// =====================================================================

#[test]
fn pawn_double_step_only_once() {
    let mut game = Game::new();
    game.submit_move("E2", "E4").unwrap();
    game.submit_move("A7", "A6").unwrap();

    assert_eq!(
        rejection(game.submit_move("E4", "E6")),
        MoveRejection::IllegalPattern(PieceType::Pawn)
    );
    assert!(game.submit_move("E4", "E5").is_ok());
}

#[test]
fn unmoved_pawn_single_step() {
    let mut game = Game::new();
    assert!(game.submit_move("D2", "D3").is_ok());
    assert!(game.submit_move("H7", "H6").is_ok());
}

#[test]
fn pawn_cannot_jump_a_blocker() {
    let mut game = Game::from_fen("4k3/8/8/8/8/4n3/4P3/4K3 w").unwrap();
    assert_eq!(
        rejection(game.submit_move("E2", "E4")),
        MoveRejection::PathBlocked
    );
}

// =====================================================================
// Path clearance
// =====================================================================

#[test]
fn rook_blocked_by_own_pawn() {
    let mut game = Game::new();
    assert_eq!(
        rejection(game.submit_move("A1", "A3")),
        MoveRejection::PathBlocked
    );
}

#[test]
fn rook_moves_along_rank() {
    let mut game = Game::from_fen("4k3/8/8/8/8/8/8/R5NK w").unwrap();
    assert_eq!(
        rejection(game.submit_move("A1", "H1")),
        MoveRejection::FriendlyCapture
    );
    assert_eq!(
        rejection(game.submit_move("A1", "A1")),
        MoveRejection::NullMove
    );

    let mut game = Game::from_fen("4k3/8/8/8/8/8/8/R4N1K w").unwrap();
    assert_eq!(
        rejection(game.submit_move("A1", "G1")),
        MoveRejection::PathBlocked
    );
}

#[test]
fn knight_jumps_over_pieces() {
    let mut game = Game::new();
    assert!(game.submit_move("G1", "F3").is_ok());
    assert!(game.submit_move("B8", "C6").is_ok());
    assert!(game.submit_move("B1", "C3").is_ok());
}

// =====================================================================
// Check detection
// =====================================================================

#[test]
fn queen_on_rank_checks_until_interposed() {
    // White king E1, black queen A1, white knight D2 ready to block on B1.
    let mut board = Board::from_placement("7k/8/8/8/8/8/3N4/q3K3").unwrap();
    let king = *board.piece_at(sq("E1")).unwrap();
    assert!(detect_check(&board, &king));

    board.apply_move(sq("D2"), sq("B1"));
    let king = *board.piece_at(sq("E1")).unwrap();
    assert!(!detect_check(&board, &king));
}

#[test]
fn game_refuses_interposition_while_in_check() {
    let mut game = Game::from_fen("7k/8/8/8/8/8/3N4/q3K3 w").unwrap();
    assert_eq!(game.status(), GameStatus::Check);
    assert_eq!(
        rejection(game.submit_move("D2", "B1")),
        MoveRejection::CannotMoveWhileInCheck
    );
}

// =====================================================================
// Terminal classification
// =====================================================================

#[test]
fn checkmate_ends_the_match() {
    let mut game = Game::from_fen("6k1/5ppp/8/8/8/8/8/R3K3 w").unwrap();
    let report = game.submit_move("A1", "A8").unwrap();
    assert!(report.gives_check);
    assert_eq!(game.status(), GameStatus::Checkmate);
    assert!(matches!(
        game.submit_move("G8", "H8"),
        Err(ChessError::GameOver(GameStatus::Checkmate))
    ));
}

#[test]
fn trapped_but_unchecked_king_keeps_playing() {
    let game = Game::from_fen("k7/8/1Q6/8/8/8/8/7K b").unwrap();
    assert!(!game.in_check(Color::Black));
    assert!(game.any_piece_can_move());
    assert_eq!(game.status(), GameStatus::Active);
}

// =====================================================================
// Round trip
// =====================================================================

#[test]
fn moved_piece_lands_with_flag_and_square() {
    let mut game = Game::new();
    game.submit_move("G1", "F3").unwrap();

    let knight = game.piece_at("F3").unwrap().unwrap();
    assert_eq!(knight.kind(), PieceType::Knight);
    assert_eq!(knight.color(), Color::White);
    assert!(knight.has_moved);
    assert_eq!(knight.square(), sq("F3"));
    assert_eq!((knight.square().rank(), knight.square().file()), (2, 5));
    assert!(game.piece_at("G1").unwrap().is_none());
}
