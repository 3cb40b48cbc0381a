use crate::chess::{Color, Role};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};

/// A chess [piece][`Role`] of a certain [`Color`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub struct Piece(pub Color, pub Role);

impl Piece {
    /// Constructs [`Piece`] from a pair of [`Color`] and [`Role`].
    #[inline(always)]
    pub const fn new(c: Color, r: Role) -> Self {
        Piece(c, r)
    }

    /// This piece's [`Color`].
    #[inline(always)]
    pub const fn color(&self) -> Color {
        self.0
    }

    /// This piece's [`Role`].
    #[inline(always)]
    pub const fn role(&self) -> Role {
        self.1
    }

    /// The letter used for this piece in [FEN], uppercase for white.
    ///
    /// [FEN]: https://www.chessprogramming.org/Forsyth-Edwards_Notation
    pub fn char(&self) -> char {
        let c = match self.role() {
            Role::Pawn => 'p',
            Role::Knight => 'n',
            Role::Bishop => 'b',
            Role::Rook => 'r',
            Role::Queen => 'q',
            Role::King => 'k',
        };

        match self.color() {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    /// Parses the [FEN] letter of a piece.
    ///
    /// [FEN]: https://www.chessprogramming.org/Forsyth-Edwards_Notation
    pub fn from_char(c: char) -> Option<Self> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };

        let mut buffer = [0; 4];
        let role = c.to_ascii_lowercase().encode_utf8(&mut buffer).parse().ok()?;
        Some(Piece(color, role))
    }
}

/// The piece code, e.g. `wp` for a white pawn.
impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(self.color().code())?;
        fmt::Display::fmt(&self.role(), f)
    }
}
