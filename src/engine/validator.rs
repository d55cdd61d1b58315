//! Move validation.
//!
//! Checks run in a fixed order and stop at the first failure, so every
//! rejected attempt carries exactly one reason. Nothing here looks at whether
//! the move exposes the mover's own king.

use crate::engine::board::Board;
use crate::engine::types::{Color, MoveRejection, PieceType, Square};

/// Decide whether `from -> to` may be played by `side_to_move`.
///
/// `in_check` is the side to move's check status before this move; while it
/// is set every move is refused, including ones that would end the check.
pub fn check_move_valid(
    board: &Board,
    side_to_move: Color,
    in_check: bool,
    from: Square,
    to: Square,
) -> Result<(), MoveRejection> {
    if in_check {
        return Err(MoveRejection::CannotMoveWhileInCheck);
    }

    let mover = board.piece_at(from).ok_or(MoveRejection::NoPieceAtOrigin)?;

    if mover.color() != side_to_move {
        return Err(MoveRejection::WrongSideToMove(mover.color()));
    }

    if from == to {
        return Err(MoveRejection::NullMove);
    }

    if !mover.is_valid_move_pattern(from, to) {
        return Err(MoveRejection::IllegalPattern(mover.kind()));
    }

    if let Some(target) = board.piece_at(to) {
        if target.color() == mover.color() {
            return Err(MoveRejection::FriendlyCapture);
        }
        if target.kind() == PieceType::King {
            return Err(MoveRejection::KingCapture);
        }
    }

    if mover.kind() != PieceType::Knight && !path_is_clear(board, from, to) {
        return Err(MoveRejection::PathBlocked);
    }

    Ok(())
}

/// Are all squares strictly between `from` and `to` empty?
///
/// Only meaningful when the two squares share a rank, file or diagonal;
/// any other pair has no intermediate squares and is reported clear.
pub fn path_is_clear(board: &Board, from: Square, to: Square) -> bool {
    let dr = to.rank() as i8 - from.rank() as i8;
    let df = to.file() as i8 - from.file() as i8;

    let on_line = dr == 0 || df == 0 || dr.abs() == df.abs();
    if !on_line {
        return true;
    }

    let (step_r, step_f) = (dr.signum(), df.signum());
    let mut current = from.offset(step_r, step_f);
    while let Some(sq) = current {
        if sq == to {
            return true;
        }
        if !board.is_empty(sq) {
            return false;
        }
        current = sq.offset(step_r, step_f);
    }
    true
}
