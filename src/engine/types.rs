use std::fmt;

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// The two sides in a chess game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Index for array lookups: White=0, Black=1.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Rank step a pawn of this colour advances by.
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Capitalised name used in move reports ("White", "Black").
    pub fn title(self) -> &'static str {
        match self {
            Color::White => "White",
            Color::Black => "Black",
        }
    }
}

impl std::ops::Not for Color {
    type Output = Self;
    fn not(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

// ---------------------------------------------------------------------------
// PieceType
// ---------------------------------------------------------------------------

/// The six piece kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceType {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

impl PieceType {
    /// All piece types in order.
    pub const ALL: [PieceType; 6] = [
        PieceType::Pawn,
        PieceType::Rook,
        PieceType::Knight,
        PieceType::Bishop,
        PieceType::Queen,
        PieceType::King,
    ];

    /// Single uppercase letter for white, lowercase for black.
    pub fn to_char(self, color: Color) -> char {
        let c = match self {
            PieceType::Pawn => 'p',
            PieceType::Rook => 'r',
            PieceType::Knight => 'n',
            PieceType::Bishop => 'b',
            PieceType::Queen => 'q',
            PieceType::King => 'k',
        };
        match color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    /// Parse a placement letter: uppercase is white, lowercase is black.
    pub fn from_char(c: char) -> Option<(Color, PieceType)> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let piece = match c.to_ascii_lowercase() {
            'p' => PieceType::Pawn,
            'r' => PieceType::Rook,
            'n' => PieceType::Knight,
            'b' => PieceType::Bishop,
            'q' => PieceType::Queen,
            'k' => PieceType::King,
            _ => return None,
        };
        Some((color, piece))
    }

    /// Capitalised name used in move reports ("Pawn", "Knight", ...).
    pub fn title(self) -> &'static str {
        match self {
            PieceType::Pawn => "Pawn",
            PieceType::Rook => "Rook",
            PieceType::Knight => "Knight",
            PieceType::Bishop => "Bishop",
            PieceType::Queen => "Queen",
            PieceType::King => "King",
        }
    }
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PieceType::Pawn => write!(f, "pawn"),
            PieceType::Rook => write!(f, "rook"),
            PieceType::Knight => write!(f, "knight"),
            PieceType::Bishop => write!(f, "bishop"),
            PieceType::Queen => write!(f, "queen"),
            PieceType::King => write!(f, "king"),
        }
    }
}

// ---------------------------------------------------------------------------
// Square
// ---------------------------------------------------------------------------

/// A square on the board (0..63, LERF: A1=0, H8=63).
///
/// Rank 0 is white's home rank, file 0 is the A-file. A `Square` can only
/// hold an on-board value, so range checks happen where one is built.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Square(u8);

impl Square {
    pub const NUM: usize = 64;

    #[inline]
    pub fn new(index: u8) -> Option<Self> {
        (index < 64).then_some(Square(index))
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn rank(self) -> u8 {
        self.0 >> 3
    }

    #[inline]
    pub fn file(self) -> u8 {
        self.0 & 7
    }

    /// Build from signed rank/file, returning `None` when off the board.
    #[inline]
    pub fn from_rank_file(rank: i8, file: i8) -> Option<Self> {
        if (0..8).contains(&rank) && (0..8).contains(&file) {
            Some(Square(rank as u8 * 8 + file as u8))
        } else {
            None
        }
    }

    /// The square `dr` ranks and `df` files away, if it is on the board.
    #[inline]
    pub fn offset(self, dr: i8, df: i8) -> Option<Self> {
        Self::from_rank_file(self.rank() as i8 + dr, self.file() as i8 + df)
    }

    /// Parse a move coordinate like "E2": file letter 'A'..='H' (uppercase
    /// only) followed by rank digit '1'..='8'.
    pub fn from_coordinate(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0].wrapping_sub(b'A');
        let rank = bytes[1].wrapping_sub(b'1');
        if file < 8 && rank < 8 {
            Some(Square(rank * 8 + file))
        } else {
            None
        }
    }

    /// Convert to coordinate notation like "E2".
    pub fn to_coordinate(self) -> String {
        let file = (b'A' + self.file()) as char;
        let rank = (b'1' + self.rank()) as char;
        format!("{file}{rank}")
    }

    /// Iterate over all 64 squares, A1 first.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64u8).map(Square)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_coordinate())
    }
}

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// The eight ray directions scanned outward from a square.
///
/// North is toward rank 7 (black's side), East toward the H-file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    SouthWest,
    NorthWest,
    SouthEast,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::NorthEast,
        Direction::SouthWest,
        Direction::NorthWest,
        Direction::SouthEast,
    ];

    /// (rank step, file step) for one square in this direction.
    #[inline]
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Direction::North => (1, 0),
            Direction::South => (-1, 0),
            Direction::East => (0, 1),
            Direction::West => (0, -1),
            Direction::NorthEast => (1, 1),
            Direction::SouthWest => (-1, -1),
            Direction::NorthWest => (1, -1),
            Direction::SouthEast => (-1, 1),
        }
    }

    /// Along a rank or a file.
    #[inline]
    pub const fn is_straight(self) -> bool {
        matches!(
            self,
            Direction::North | Direction::South | Direction::East | Direction::West
        )
    }

    #[inline]
    pub const fn is_diagonal(self) -> bool {
        !self.is_straight()
    }
}

// ---------------------------------------------------------------------------
// GameStatus
// ---------------------------------------------------------------------------

/// Classification of the position for the side to move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Active,
    Check,
    Checkmate,
    Stalemate,
}

impl GameStatus {
    pub fn as_str(&self) -> &str {
        match self {
            GameStatus::Active => "active",
            GameStatus::Check => "check",
            GameStatus::Checkmate => "checkmate",
            GameStatus::Stalemate => "stalemate",
        }
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self, GameStatus::Checkmate | GameStatus::Stalemate)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// MoveRejection
// ---------------------------------------------------------------------------

/// Why a single move attempt was refused. The position is left untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MoveRejection {
    #[error("cannot make a move while in check")]
    CannotMoveWhileInCheck,

    #[error("there is no piece on the origin square")]
    NoPieceAtOrigin,

    #[error("it is not {0}'s turn to move")]
    WrongSideToMove(Color),

    #[error("a piece must move from its current square")]
    NullMove,

    #[error("a {0} cannot move that way")]
    IllegalPattern(PieceType),

    #[error("the destination holds a piece of the same colour")]
    FriendlyCapture,

    #[error("a king cannot be captured")]
    KingCapture,

    #[error("the path is blocked by another piece")]
    PathBlocked,
}

impl MoveRejection {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            MoveRejection::CannotMoveWhileInCheck => "CANNOT_MOVE_WHILE_IN_CHECK",
            MoveRejection::NoPieceAtOrigin => "NO_PIECE_AT_ORIGIN",
            MoveRejection::WrongSideToMove(_) => "WRONG_SIDE_TO_MOVE",
            MoveRejection::NullMove => "NULL_MOVE",
            MoveRejection::IllegalPattern(_) => "ILLEGAL_PATTERN",
            MoveRejection::FriendlyCapture => "FRIENDLY_CAPTURE",
            MoveRejection::KingCapture => "KING_CAPTURE",
            MoveRejection::PathBlocked => "PATH_BLOCKED",
        }
    }
}

// ---------------------------------------------------------------------------
// ChessError
// ---------------------------------------------------------------------------

/// Domain errors for the rules engine.
#[derive(Debug, thiserror::Error)]
pub enum ChessError {
    #[error("coordinate out of range: {0:?}")]
    OutOfRangeCoordinate(String),

    #[error("invalid piece letter '{0}' in position")]
    InvalidPieceLetter(char),

    #[error("invalid position: {0}")]
    InvalidPosition(String),

    #[error("move {from} to {to} is not valid: {reason}")]
    IllegalMove {
        from: Square,
        to: Square,
        #[source]
        reason: MoveRejection,
    },

    #[error("game is over: {0}")]
    GameOver(GameStatus),
}

impl ChessError {
    /// The rejection behind an `IllegalMove`, if this is one.
    pub fn rejection(&self) -> Option<MoveRejection> {
        match self {
            ChessError::IllegalMove { reason, .. } => Some(*reason),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
