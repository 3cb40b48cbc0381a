use crate::chess::Piece;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU8;

/// A [`Piece`] standing on the board.
///
/// Pieces created by promotion carry a serial number that is unique within the game,
/// so presentation layers can tell them apart from pieces of the same kind.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Figure {
    piece: Piece,
    promotion: Option<NonZeroU8>,
}

impl Figure {
    /// A piece that has been on the board since the start.
    #[inline(always)]
    pub const fn new(piece: Piece) -> Self {
        Figure {
            piece,
            promotion: None,
        }
    }

    /// The `n`-th piece created by promotion in a game.
    #[inline(always)]
    pub const fn promoted(piece: Piece, n: NonZeroU8) -> Self {
        Figure {
            piece,
            promotion: Some(n),
        }
    }

    /// The logical [`Piece`].
    #[inline(always)]
    pub const fn piece(&self) -> Piece {
        self.piece
    }

    /// The promotion serial number, if this piece was created by promotion.
    #[inline(always)]
    pub const fn promotion(&self) -> Option<NonZeroU8> {
        self.promotion
    }
}

impl From<Piece> for Figure {
    fn from(piece: Piece) -> Self {
        Figure::new(piece)
    }
}

/// The piece code, e.g. `wq` or, for the first promoted piece, `wqp1`.
impl fmt::Display for Figure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.piece, f)?;

        if let Some(n) = self.promotion {
            write!(f, "p{n}")?;
        }

        Ok(())
    }
}
