use crate::chess::{Board, Color, Piece, Role, Square};
use arrayvec::ArrayVec;

/// A list of destination [`Square`]s.
///
/// The capacity bounds the destinations of any single piece, a queen in the center of an
/// empty board reaching the most.
pub type Moves = ArrayVec<Square, 32>;

const KNIGHT: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

const KING: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const DIAGONAL: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const ORTHOGONAL: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// The geometrically possible destinations of the piece on `sq`.
///
/// Whether the move would leave the mover's own king in check is not considered,
/// and neither castling nor en passant are included.
///
/// If `for_attack` is set, pawns control both forward diagonals, even if empty,
/// and their non-capturing advances are left out.
pub fn raw_moves(board: &Board, sq: Square, for_attack: bool) -> Moves {
    let mut moves = Moves::new();

    let Some(Piece(side, role)) = board.piece_on(sq) else {
        return moves;
    };

    match role {
        Role::Pawn => pawn(board, sq, side, for_attack, &mut moves),
        Role::Knight => leap(board, sq, side, &KNIGHT, &mut moves),
        Role::Bishop => slide(board, sq, side, &DIAGONAL, &mut moves),
        Role::Rook => slide(board, sq, side, &ORTHOGONAL, &mut moves),
        Role::Queen => {
            slide(board, sq, side, &DIAGONAL, &mut moves);
            slide(board, sq, side, &ORTHOGONAL, &mut moves);
        }
        Role::King => leap(board, sq, side, &KING, &mut moves),
    }

    moves
}

fn is_enemy(board: &Board, sq: Square, side: Color) -> bool {
    board.piece_on(sq).is_some_and(|p| p.color() != side)
}

fn pawn(board: &Board, sq: Square, side: Color, for_attack: bool, moves: &mut Moves) {
    let ahead = side.forward();

    if !for_attack {
        if let Some(one) = sq.offset(ahead, 0).filter(|&s| board[s].is_none()) {
            moves.push(one);

            if sq.row() == side.pawn_row() {
                if let Some(two) = one.offset(ahead, 0).filter(|&s| board[s].is_none()) {
                    moves.push(two);
                }
            }
        }
    }

    for diagonal in [-1, 1].into_iter().filter_map(|c| sq.offset(ahead, c)) {
        if is_enemy(board, diagonal, side) || (for_attack && board[diagonal].is_none()) {
            moves.push(diagonal);
        }
    }
}

fn leap(board: &Board, sq: Square, side: Color, offsets: &[(i8, i8)], moves: &mut Moves) {
    for to in offsets.iter().filter_map(|&(r, c)| sq.offset(r, c)) {
        if board[to].is_none() || is_enemy(board, to, side) {
            moves.push(to);
        }
    }
}

fn slide(board: &Board, sq: Square, side: Color, rays: &[(i8, i8)], moves: &mut Moves) {
    for &(r, c) in rays {
        let mut next = sq.offset(r, c);

        while let Some(to) = next {
            match board.piece_on(to) {
                None => moves.push(to),
                Some(p) => {
                    if p.color() != side {
                        moves.push(to);
                    }

                    break;
                }
            }

            next = to.offset(r, c);
        }
    }
}
