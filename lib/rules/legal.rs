use crate::chess::{Board, Castles, Color, Move, Piece, Role, Square};
use crate::game::GameState;
use crate::rules::{is_king_in_check, is_square_attacked, raw_moves, Moves};
use tracing::instrument;

/// The legal destinations of the piece on `sq`.
///
/// Candidates are simulated on a copy of the board and discarded if they leave the mover's
/// king in check. Castling is checked separately, as its conditions are structural.
pub fn legal_moves(state: &GameState, sq: Square) -> Moves {
    let board = state.board();

    let Some(Piece(side, role)) = board.piece_on(sq) else {
        return Moves::new();
    };

    let mut candidates = raw_moves(board, sq, false);

    if let Some(ep) = state.en_passant().filter(|&ep| is_en_passant(state, sq, ep)) {
        candidates.push(ep);
    }

    let mut moves: Moves = candidates
        .into_iter()
        .filter(|&to| !is_king_in_check(&simulate(state, sq, to), side))
        .collect();

    if role == Role::King {
        castling_moves(state, sq, side, &mut moves);
    }

    moves
}

/// Whether moving from `from` to `to` is an en passant capture.
pub fn is_en_passant(state: &GameState, from: Square, to: Square) -> bool {
    let board = state.board();

    let Some(Piece(side, Role::Pawn)) = board.piece_on(from) else {
        return false;
    };

    if state.en_passant() != Some(to) || board[to].is_some() {
        return false;
    }

    if to.row() - from.row() != side.forward() || (to.col() - from.col()).abs() != 1 {
        return false;
    }

    let victim = Square::new(from.row(), to.col());
    victim.and_then(|sq| board.piece_on(sq)) == Some(Piece(!side, Role::Pawn))
}

/// The board after moving the piece on `from` to `to`, if legal for `side`.
///
/// En passant captures are resolved, but the rook is not relocated when castling,
/// nor are pawns promoted.
#[instrument(level = "trace", skip(state), fields(from = %from, to = %to))]
pub fn apply_move_if_legal(
    state: &GameState,
    from: Square,
    to: Square,
    side: Color,
) -> Option<Board> {
    let piece = state.board().piece_on(from)?;

    if piece.color() != side || !legal_moves(state, from).contains(&to) {
        return None;
    }

    Some(simulate(state, from, to))
}

/// An iterator over the legal moves of the side to move.
pub fn moves(state: &GameState) -> impl Iterator<Item = Move> + '_ {
    let side = state.turn();

    state
        .board()
        .iter()
        .filter(move |(_, f)| f.piece().color() == side)
        .flat_map(move |(from, _)| {
            legal_moves(state, from)
                .into_iter()
                .map(move |to| Move::new(from, to))
        })
}

fn simulate(state: &GameState, from: Square, to: Square) -> Board {
    let en_passant = is_en_passant(state, from, to);
    let mut board = *state.board();
    board.relocate(from, to);

    if en_passant {
        board.set(Square::at(from.row(), to.col()), None);
    }

    board
}

struct Wing {
    right: fn(Color) -> Castles,
    rook: i8,
    between: &'static [i8],
    transit: &'static [i8],
    king: i8,
}

const WINGS: [Wing; 2] = [
    Wing {
        right: Castles::short,
        rook: 7,
        between: &[5, 6],
        transit: &[4, 5, 6],
        king: 6,
    },
    Wing {
        right: Castles::long,
        rook: 0,
        between: &[1, 2, 3],
        transit: &[4, 3, 2],
        king: 2,
    },
];

fn castling_moves(state: &GameState, king: Square, side: Color, moves: &mut Moves) {
    let board = state.board();
    let row = side.home_row();

    if king != Square::at(row, 4) || is_king_in_check(board, side) {
        return;
    }

    for wing in &WINGS {
        if !state.castles().contains((wing.right)(side)) {
            continue;
        }

        if board.piece_on(Square::at(row, wing.rook)) != Some(Piece(side, Role::Rook)) {
            continue;
        }

        if wing.between.iter().any(|&c| board[Square::at(row, c)].is_some()) {
            continue;
        }

        if wing
            .transit
            .iter()
            .any(|&c| is_square_attacked(board, Square::at(row, c), !side))
        {
            continue;
        }

        moves.push(Square::at(row, wing.king));
    }
}
