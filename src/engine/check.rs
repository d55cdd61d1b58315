//! Check detection by scanning outward from the king.
//!
//! Two independent scans are OR-combined: the eight knight-offset squares,
//! and a ray in each of the eight directions that stops at the nearest
//! occupied square. Whether that nearest piece threatens depends on its kind
//! and on whether the ray is straight or diagonal.

use crate::engine::board::Board;
use crate::engine::piece::Piece;
use crate::engine::types::{Color, Direction, PieceType, Square};

/// (rank, file) offsets of the squares a knight could attack from.
const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (-1, 2),
    (1, -2),
    (-1, -2),
    (2, 1),
    (-2, 1),
    (2, -1),
    (-2, -1),
];

/// Is `king` threatened by any enemy piece on `board`?
///
/// Works for any piece; the colour of `king` decides who the enemy is.
pub fn detect_check(board: &Board, king: &Piece) -> bool {
    if knight_in_range(board, king) {
        return true;
    }
    Direction::ALL.iter().any(|&dir| {
        nearest_neighbour(board, king.square(), dir)
            .is_some_and(|neighbour| piece_sees_square(king, neighbour, dir))
    })
}

/// Is `color`'s king currently in check? `false` when it has no king.
pub fn is_in_check(board: &Board, color: Color) -> bool {
    board
        .king_square(color)
        .and_then(|sq| board.piece_at(sq))
        .is_some_and(|king| detect_check(board, king))
}

/// Does an enemy knight stand a knight's jump away from `target`?
pub fn knight_in_range(board: &Board, target: &Piece) -> bool {
    KNIGHT_OFFSETS.iter().any(|&(dr, df)| {
        target
            .square()
            .offset(dr, df)
            .and_then(|sq| board.piece_at(sq))
            .is_some_and(|p| p.kind() == PieceType::Knight && p.color() != target.color())
    })
}

/// The first occupied square strictly beyond `from` in `dir`.
pub fn nearest_neighbour(board: &Board, from: Square, dir: Direction) -> Option<&Piece> {
    let (dr, df) = dir.delta();
    let mut current = from.offset(dr, df);
    while let Some(sq) = current {
        if let Some(piece) = board.piece_at(sq) {
            return Some(piece);
        }
        current = sq.offset(dr, df);
    }
    None
}

/// Whether `neighbour`, the nearest piece to `target` along `dir`, attacks it.
pub fn piece_sees_square(target: &Piece, neighbour: &Piece, dir: Direction) -> bool {
    if neighbour.color() == target.color() {
        return false;
    }

    let dr = neighbour.square().rank() as i8 - target.square().rank() as i8;
    let df = neighbour.square().file() as i8 - target.square().file() as i8;

    match neighbour.kind() {
        PieceType::Queen => true,
        PieceType::Rook => dir.is_straight(),
        PieceType::Bishop => dir.is_diagonal(),
        PieceType::King => dr.abs().max(df.abs()) == 1,
        // A pawn hits the squares diagonally in front of it, so it must stand
        // one rank ahead of the target as seen from the target's side.
        PieceType::Pawn => dir.is_diagonal() && dr == target.color().forward() && df.abs() == 1,
        PieceType::Knight => false,
    }
}
