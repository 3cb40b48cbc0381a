use crate::game::GameState;
use crate::rules::moves;

/// Counts the leaves of the legal move tree rooted at `state` up to `depth`.
///
/// See [perft](https://www.chessprogramming.org/Perft).
pub fn perft(state: &GameState, depth: u8) -> usize {
    match depth {
        0 => 1,
        1 => moves(state).count(),
        d => moves(state)
            .filter_map(|m| state.play(m).ok())
            .map(|next| perft(&next, d - 1))
            .sum(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[proptest]
    fn perft_of_depth_zero_is_one(state: GameState) {
        assert_eq!(perft(&state, 0), 1);
    }

    #[proptest]
    fn perft_of_depth_one_counts_legal_moves(state: GameState) {
        assert_eq!(perft(&state, 1), moves(&state).count());
    }

    #[test]
    fn perft_expands_the_starting_position() {
        let state = GameState::new("alice", "bob");
        assert_eq!(perft(&state, 1), 20);
        assert_eq!(perft(&state, 2), 400);
        assert_eq!(perft(&state, 3), 8902);
    }
}
