use crate::chess::{Board, Color, Square};
use crate::rules::raw_moves;

/// Whether any piece of `attacker` controls `target`.
pub fn is_square_attacked(board: &Board, target: Square, attacker: Color) -> bool {
    board
        .iter()
        .filter(|(_, f)| f.piece().color() == attacker)
        .any(|(sq, _)| raw_moves(board, sq, true).contains(&target))
}

/// Whether the king of `side` is attacked.
///
/// A board without such a king is never in check.
pub fn is_king_in_check(board: &Board, side: Color) -> bool {
    match board.king(side) {
        Some(sq) => is_square_attacked(board, sq, !side),
        None => false,
    }
}
