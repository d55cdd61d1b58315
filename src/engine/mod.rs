pub mod board;
pub mod check;
pub mod game;
pub mod piece;
pub mod types;
pub mod validator;

pub use board::Board;
pub use game::{Game, MoveReport};
pub use piece::Piece;
pub use types::*;
