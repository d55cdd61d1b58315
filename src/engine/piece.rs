//! A single piece and its movement geometry.
//!
//! Movement patterns are pure functions of the two squares (plus colour and
//! moved-flag for pawns). They never look at the board, so blocking pieces
//! and captures are the validator's concern.

use crate::engine::types::{Color, PieceType, Square};

/// A piece standing on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Piece {
    color: Color,
    kind: PieceType,
    square: Square,
    /// Set after the piece's first applied move.
    pub has_moved: bool,
}

impl Piece {
    pub fn new(color: Color, kind: PieceType, square: Square) -> Self {
        Piece {
            color,
            kind,
            square,
            has_moved: false,
        }
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn kind(&self) -> PieceType {
        self.kind
    }

    /// The square this piece occupies. Always equals its board slot.
    #[inline]
    pub fn square(&self) -> Square {
        self.square
    }

    /// Only the board relocates pieces, keeping slot and square in step.
    #[inline]
    pub(crate) fn set_square(&mut self, sq: Square) {
        self.square = sq;
    }

    /// Placement letter, uppercase for white.
    pub fn to_char(&self) -> char {
        self.kind.to_char(self.color)
    }

    /// Whether `from -> to` has the geometric shape this kind may move in.
    ///
    /// The zero move is not excluded here; callers reject it first.
    pub fn is_valid_move_pattern(&self, from: Square, to: Square) -> bool {
        let dr = to.rank() as i8 - from.rank() as i8;
        let df = to.file() as i8 - from.file() as i8;

        match self.kind {
            PieceType::Pawn => pawn_pattern(self.color, self.has_moved, dr, df),
            PieceType::Rook => rook_pattern(dr, df),
            PieceType::Knight => knight_pattern(dr, df),
            PieceType::Bishop => bishop_pattern(dr, df),
            PieceType::Queen => rook_pattern(dr, df) || bishop_pattern(dr, df),
            PieceType::King => dr.abs() <= 1 && df.abs() <= 1,
        }
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.color, self.kind)
    }
}

// Straight advance only; there is no diagonal capture shape.
fn pawn_pattern(color: Color, has_moved: bool, dr: i8, df: i8) -> bool {
    if df != 0 {
        return false;
    }
    let step = color.forward();
    dr == step || (!has_moved && dr == 2 * step)
}

fn rook_pattern(dr: i8, df: i8) -> bool {
    dr == 0 || df == 0
}

fn knight_pattern(dr: i8, df: i8) -> bool {
    matches!((dr.abs(), df.abs()), (1, 2) | (2, 1))
}

fn bishop_pattern(dr: i8, df: i8) -> bool {
    dr.abs() == df.abs()
}
