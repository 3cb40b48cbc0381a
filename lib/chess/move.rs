use crate::chess::{Promotion, Square};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

/// A chess move.
///
/// The [`Promotion`] specifier only matters for pawns reaching the last rank.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[display(fmt = "{}{}", _0, _1)]
pub struct Move(Square, Square, Promotion);

impl Move {
    /// Constructs [`Move`] promoting to a queen if applicable.
    #[inline(always)]
    pub fn new(whence: Square, whither: Square) -> Self {
        Move(whence, whither, Promotion::default())
    }

    /// Replaces the [`Promotion`] specifier.
    #[inline(always)]
    pub fn with_promotion(self, promotion: Promotion) -> Self {
        Move(self.0, self.1, promotion)
    }

    /// The source [`Square`].
    #[inline(always)]
    pub fn whence(&self) -> Square {
        self.0
    }

    /// The destination [`Square`].
    #[inline(always)]
    pub fn whither(&self) -> Square {
        self.1
    }

    /// The [`Promotion`] specifier.
    #[inline(always)]
    pub fn promotion(&self) -> Promotion {
        self.2
    }
}

/// Represents an illegal [`Move`].
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[display(fmt = "move `{}` is illegal", _0)]
pub struct IllegalMove(#[error(not(source))] pub Move);
