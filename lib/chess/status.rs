use derive_more::Display;
use serde::{Deserialize, Serialize};

/// The lifecycle stage of a game.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    #[display(fmt = "waiting for players")]
    WaitingForPlayers,

    #[display(fmt = "in progress")]
    InProgress,

    #[display(fmt = "finished")]
    Finished,

    #[display(fmt = "checkmate")]
    Checkmate,

    #[display(fmt = "stalemate")]
    Stalemate,
}

impl Status {
    /// Whether no further moves are accepted.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Status::Finished | Status::Checkmate | Status::Stalemate)
    }
}
