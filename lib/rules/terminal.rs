use crate::chess::{Color, Status};
use crate::game::GameState;
use crate::rules::{is_king_in_check, legal_moves};

/// Whether any piece of `side` has a legal move.
pub fn has_any_legal_move(state: &GameState, side: Color) -> bool {
    state
        .board()
        .iter()
        .filter(|(_, f)| f.piece().color() == side)
        .any(|(sq, _)| !legal_moves(state, sq).is_empty())
}

/// The [`Status`] of the game from the perspective of `side`, assumed to be the side to move.
pub fn evaluate_status(state: &GameState, side: Color) -> Status {
    match (
        is_king_in_check(state.board(), side),
        has_any_legal_move(state, side),
    ) {
        (_, true) => Status::InProgress,
        (true, false) => Status::Checkmate,
        (false, false) => Status::Stalemate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    fn fen(fen: &str) -> GameState {
        GameState::from_fen("alice", "bob", fen).unwrap()
    }

    #[proptest]
    fn games_start_in_progress(c: Color) {
        let state = GameState::new("alice", "bob");
        assert!(has_any_legal_move(&state, c));
        assert_eq!(evaluate_status(&state, c), Status::InProgress);
    }

    #[test]
    fn scholars_mate_is_checkmate() {
        let state = fen("r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4");
        assert!(!has_any_legal_move(&state, Color::Black));
        assert_eq!(evaluate_status(&state, Color::Black), Status::Checkmate);
    }

    #[test]
    fn unprotected_queen_check_is_not_checkmate() {
        let state = fen("r1bqkbnr/pppp1Qpp/2n5/4p3/4P3/8/PPPP1PPP/RNB1KBNR b KQkq - 0 3");
        assert_eq!(evaluate_status(&state, Color::Black), Status::InProgress);
    }

    #[test]
    fn back_rank_mate_is_checkmate() {
        let state = fen("3R2k1/5ppp/8/8/8/8/8/6K1 b - - 0 1");
        assert_eq!(evaluate_status(&state, Color::Black), Status::Checkmate);
    }

    #[test]
    fn cornered_king_without_moves_is_stalemate() {
        let state = fen("8/8/8/8/8/kq6/8/K7 w - - 0 1");
        assert!(!has_any_legal_move(&state, Color::White));
        assert_eq!(evaluate_status(&state, Color::White), Status::Stalemate);
    }

    #[test]
    fn check_with_an_escape_is_in_progress() {
        let state = fen("4k3/8/8/8/8/8/8/4K2r w - - 0 1");
        assert_eq!(evaluate_status(&state, Color::White), Status::InProgress);
    }

    #[test]
    fn blocked_pawns_alone_do_not_save_from_stalemate() {
        let state = fen("7k/8/8/8/8/p7/P1q5/K7 w - - 0 1");
        assert_eq!(evaluate_status(&state, Color::White), Status::Stalemate);
    }
}
