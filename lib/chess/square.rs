use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Whether the coordinates lie on the board.
#[inline(always)]
pub fn in_bounds(row: i8, col: i8) -> bool {
    (0..8).contains(&row) && (0..8).contains(&col)
}

/// A square on the chess board.
///
/// Row 0 is black's back rank and column 0 is the a-file.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[serde(try_from = "String", into = "String")]
pub struct Square {
    #[cfg_attr(test, strategy(0i8..8))]
    row: i8,
    #[cfg_attr(test, strategy(0i8..8))]
    col: i8,
}

impl Square {
    /// Constructs [`Square`] from a pair of coordinates, if they lie on the board.
    #[inline(always)]
    pub fn new(row: i8, col: i8) -> Option<Self> {
        in_bounds(row, col).then_some(Square { row, col })
    }

    /// Constructs [`Square`] from a pair of coordinates known to lie on the board.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    #[inline(always)]
    pub fn at(row: i8, col: i8) -> Self {
        assert!(in_bounds(row, col), "({row}, {col}) is not on the board");
        Square { row, col }
    }

    /// This square's row.
    #[inline(always)]
    pub fn row(&self) -> i8 {
        self.row
    }

    /// This square's column.
    #[inline(always)]
    pub fn col(&self) -> i8 {
        self.col
    }

    /// The square displaced by the given offsets, if still on the board.
    #[inline(always)]
    pub fn offset(&self, rows: i8, cols: i8) -> Option<Self> {
        Square::new(self.row + rows, self.col + cols)
    }

    /// An iterator over all squares, row by row.
    #[inline(always)]
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        (0..64).map(|i| Square::at(i / 8, i % 8))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.col as u8) as char;
        let rank = (b'8' - self.row as u8) as char;
        write!(f, "{file}{rank}")
    }
}

/// The reason why parsing [`Square`] failed.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error)]
#[display(fmt = "failed to parse square")]
pub struct ParseSquareError;

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.as_bytes() {
            &[f @ b'a'..=b'h', r @ b'1'..=b'8'] => {
                Ok(Square::at((b'8' - r) as i8, (f - b'a') as i8))
            }

            _ => Err(ParseSquareError),
        }
    }
}

impl TryFrom<String> for Square {
    type Error = ParseSquareError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Square> for String {
    fn from(sq: Square) -> Self {
        sq.to_string()
    }
}
