use derive_more::Display;
use serde::{Deserialize, Serialize};

/// A bonus awarded to a player.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PowerUp {
    /// Collected by moving through a mystery box.
    #[display(fmt = "mystery box")]
    MysteryBox,
}
