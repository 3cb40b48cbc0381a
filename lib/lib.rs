/// Chess domain types.
pub mod chess;
/// Game state, mystery boxes and the session that owns a live game.
pub mod game;
/// Move legality and game status.
pub mod rules;
