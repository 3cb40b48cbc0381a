use crate::chess::{Color, Square};
use bitflags::bitflags;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

bitflags! {
    /// The castling rights of both sides.
    ///
    /// Rights are only ever revoked during a game, never granted back.
    #[derive(Serialize, Deserialize)]
    pub struct Castles: u8 {
        const WHITE_SHORT = 0b0001;
        const WHITE_LONG =  0b0010;
        const BLACK_SHORT = 0b0100;
        const BLACK_LONG =  0b1000;
    }
}

impl Castles {
    /// The kingside castling right of a side.
    #[inline(always)]
    pub fn short(side: Color) -> Self {
        match side {
            Color::White => Castles::WHITE_SHORT,
            Color::Black => Castles::BLACK_SHORT,
        }
    }

    /// The queenside castling right of a side.
    #[inline(always)]
    pub fn long(side: Color) -> Self {
        match side {
            Color::White => Castles::WHITE_LONG,
            Color::Black => Castles::BLACK_LONG,
        }
    }

    /// Both castling rights of a side.
    #[inline(always)]
    pub fn side(side: Color) -> Self {
        Castles::short(side) | Castles::long(side)
    }

    /// The castling right guarded by the rook that starts on `sq`, if any.
    #[inline(always)]
    pub fn rook_home(sq: Square) -> Self {
        Color::ALL
            .into_iter()
            .filter(|side| sq.row() == side.home_row())
            .map(|side| match sq.col() {
                0 => Castles::long(side),
                7 => Castles::short(side),
                _ => Castles::empty(),
            })
            .fold(Castles::empty(), |a, b| a | b)
    }
}

impl Default for Castles {
    #[inline(always)]
    fn default() -> Self {
        Castles::all()
    }
}

/// The castling field of [FEN].
///
/// [FEN]: https://www.chessprogramming.org/Forsyth-Edwards_Notation
impl fmt::Display for Castles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("-");
        }

        for (right, c) in [
            (Castles::WHITE_SHORT, "K"),
            (Castles::WHITE_LONG, "Q"),
            (Castles::BLACK_SHORT, "k"),
            (Castles::BLACK_LONG, "q"),
        ] {
            if self.contains(right) {
                f.write_str(c)?;
            }
        }

        Ok(())
    }
}

/// The reason why parsing [`Castles`] failed.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error)]
#[display(fmt = "failed to parse castling rights")]
pub struct ParseCastlesError;

impl FromStr for Castles {
    type Err = ParseCastlesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            return Ok(Castles::empty());
        }

        let mut castles = Castles::empty();

        for c in s.chars() {
            let right = match c {
                'K' => Castles::WHITE_SHORT,
                'Q' => Castles::WHITE_LONG,
                'k' => Castles::BLACK_SHORT,
                'q' => Castles::BLACK_LONG,
                _ => return Err(ParseCastlesError),
            };

            if castles.contains(right) {
                return Err(ParseCastlesError);
            }

            castles |= right;
        }

        if castles.is_empty() {
            Err(ParseCastlesError)
        } else {
            Ok(castles)
        }
    }
}
