//! Slot-based board representation.
//!
//! `Board` owns every piece in one of 64 optional slots (LERF indexing:
//! A1 = 0, B1 = 1, … H8 = 63). A captured piece is simply dropped when its
//! slot is overwritten.

use crate::engine::piece::Piece;
use crate::engine::types::{ChessError, Color, PieceType, Square};

/// Piece placement of the standard starting arrangement.
pub const STARTING_PLACEMENT: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

/// Colour and kind of an occupant, as handed to renderers.
pub type Occupant = (Color, PieceType);

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

/// An 8×8 grid of optional pieces.
///
/// Invariant: a piece's stored square always equals the slot holding it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; Square::NUM],
}

impl Board {
    /// A board with no pieces.
    pub fn empty() -> Self {
        Board {
            squares: [None; Square::NUM],
        }
    }

    /// Standard starting arrangement.
    pub fn starting() -> Self {
        Self::from_placement(STARTING_PLACEMENT).expect("starting placement is always valid")
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// The piece (if any) on a square.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<&Piece> {
        self.squares[sq.index()].as_ref()
    }

    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.squares[sq.index()].is_none()
    }

    /// All pieces, A1 first.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.squares.iter().flatten()
    }

    /// Number of pieces of one colour.
    pub fn count(&self, color: Color) -> usize {
        self.pieces().filter(|p| p.color() == color).count()
    }

    /// Square of `color`'s king, if one is on the board.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|p| p.color() == color && p.kind() == PieceType::King)
            .map(Piece::square)
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    /// Place a new, unmoved piece. Returns whatever occupied the slot before.
    pub fn put_piece(&mut self, sq: Square, color: Color, kind: PieceType) -> Option<Piece> {
        self.squares[sq.index()].replace(Piece::new(color, kind, sq))
    }

    /// Take the piece off a square.
    pub fn remove_piece(&mut self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()].take()
    }

    /// Move whatever stands on `from` to `to`, returning the previous
    /// occupant of `to`. The moved-flag is left alone, so this also serves
    /// hypothetical trial moves that are undone straight after.
    pub fn relocate(&mut self, from: Square, to: Square) -> Option<Piece> {
        let mut piece = self.squares[from.index()].take()?;
        piece.set_square(to);
        self.squares[to.index()].replace(piece)
    }

    /// Apply a move: capture anything on `to`, relocate the mover and mark it
    /// as moved. Returns the kind of the captured piece, if any.
    ///
    /// Legality is the caller's responsibility.
    pub fn apply_move(&mut self, from: Square, to: Square) -> Option<PieceType> {
        let captured = self.relocate(from, to).map(|p| p.kind());
        if let Some(piece) = self.squares[to.index()].as_mut() {
            piece.has_moved = true;
        }
        captured
    }

    // -----------------------------------------------------------------------
    // Consistency check (debug builds)
    // -----------------------------------------------------------------------

    /// Verify every piece's stored square matches its slot and that no colour
    /// has more than one king.
    #[cfg(any(debug_assertions, test))]
    pub fn assert_consistent(&self) {
        for sq in Square::all() {
            if let Some(piece) = self.piece_at(sq) {
                assert_eq!(piece.square(), sq, "piece {piece} stored at wrong square");
            }
        }
        for color in [Color::White, Color::Black] {
            let kings = self
                .pieces()
                .filter(|p| p.color() == color && p.kind() == PieceType::King)
                .count();
            assert!(kings <= 1, "{color} has {kings} kings");
        }
    }

    // -----------------------------------------------------------------------
    // Rendering
    // -----------------------------------------------------------------------

    /// Occupants row-major, rank 8 first → rank 1 last, for renderers.
    pub fn snapshot(&self) -> [[Option<Occupant>; 8]; 8] {
        let mut grid = [[None; 8]; 8];
        for (row, cells) in grid.iter_mut().enumerate() {
            for (file, cell) in cells.iter_mut().enumerate() {
                let rank = 7 - row as i8;
                *cell = Square::from_rank_file(rank, file as i8)
                    .and_then(|sq| self.piece_at(sq))
                    .map(|p| (p.color(), p.kind()));
            }
        }
        grid
    }

    /// Render the board as text, rank 8 at the top.
    pub fn board_string(&self) -> String {
        let mut s = String::with_capacity(200);
        for rank in (0..8i8).rev() {
            s.push((b'1' + rank as u8) as char);
            s.push(' ');
            for file in 0..8i8 {
                let ch = Square::from_rank_file(rank, file)
                    .and_then(|sq| self.piece_at(sq))
                    .map_or('.', Piece::to_char);
                s.push(ch);
                if file < 7 {
                    s.push(' ');
                }
            }
            s.push('\n');
        }
        s.push_str("  A B C D E F G H");
        s
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.board_string())
    }
}

// ---------------------------------------------------------------------------
// Placement parsing & generation
// ---------------------------------------------------------------------------

impl Board {
    /// Parse the piece-placement field of a position string: ranks 8 to 1
    /// separated by '/', digits for runs of empty squares, letters for pieces.
    pub fn from_placement(placement: &str) -> Result<Self, ChessError> {
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(ChessError::InvalidPosition(format!(
                "expected 8 ranks, got {}",
                ranks.len()
            )));
        }

        let mut board = Board::empty();

        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_idx as i8;
            let mut file: i8 = 0;
            for ch in rank_str.chars() {
                if file > 7 {
                    return Err(ChessError::InvalidPosition(format!(
                        "too many squares in rank {}",
                        rank + 1
                    )));
                }
                if let Some(digit) = ch.to_digit(10) {
                    if !(1..=8).contains(&digit) {
                        return Err(ChessError::InvalidPosition(format!(
                            "invalid empty count '{ch}' in rank {}",
                            rank + 1
                        )));
                    }
                    file += digit as i8;
                } else {
                    let (color, kind) =
                        PieceType::from_char(ch).ok_or(ChessError::InvalidPieceLetter(ch))?;
                    let sq = Square::from_rank_file(rank, file).ok_or_else(|| {
                        ChessError::InvalidPosition(format!(
                            "too many squares in rank {}",
                            rank + 1
                        ))
                    })?;
                    board.put_piece(sq, color, kind);
                    file += 1;
                }
            }
            if file != 8 {
                return Err(ChessError::InvalidPosition(format!(
                    "rank {} has {} squares instead of 8",
                    rank + 1,
                    file
                )));
            }
        }

        for color in [Color::White, Color::Black] {
            let kings = board
                .pieces()
                .filter(|p| p.color() == color && p.kind() == PieceType::King)
                .count();
            if kings > 1 {
                return Err(ChessError::InvalidPosition(format!(
                    "{color} has {kings} kings"
                )));
            }
        }

        Ok(board)
    }

    /// Export the piece placement (inverse of `from_placement`).
    pub fn placement(&self) -> String {
        let mut out = String::with_capacity(72);
        for rank in (0..8i8).rev() {
            let mut empty_count = 0u8;
            for file in 0..8i8 {
                match Square::from_rank_file(rank, file).and_then(|sq| self.piece_at(sq)) {
                    Some(piece) => {
                        if empty_count > 0 {
                            out.push((b'0' + empty_count) as char);
                            empty_count = 0;
                        }
                        out.push(piece.to_char());
                    }
                    None => empty_count += 1,
                }
            }
            if empty_count > 0 {
                out.push((b'0' + empty_count) as char);
            }
            if rank > 0 {
                out.push('/');
            }
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
