use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::ops::Not;

/// The color of a chess [`Piece`][`crate::chess::Piece`].
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[serde(rename_all = "UPPERCASE")]
#[repr(u8)]
pub enum Color {
    #[display(fmt = "white")]
    White,
    #[display(fmt = "black")]
    Black,
}

impl Color {
    /// Both colors, white first.
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    /// The row of this side's back rank.
    #[inline(always)]
    pub fn home_row(&self) -> i8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    /// The row where this side's pawns start.
    #[inline(always)]
    pub fn pawn_row(&self) -> i8 {
        self.home_row() + self.forward()
    }

    /// The row where this side's pawns promote.
    #[inline(always)]
    pub fn promotion_row(&self) -> i8 {
        (!*self).home_row()
    }

    /// The row offset of a single pawn advance.
    #[inline(always)]
    pub fn forward(&self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// The leading character of piece codes of this color.
    #[inline(always)]
    pub fn code(&self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }
}

impl Not for Color {
    type Output = Self;

    #[inline(always)]
    fn not(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}
