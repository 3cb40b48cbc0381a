use crate::chess::{Color, Figure, Piece, Role, Square};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::{fmt, ops::Index, str::FromStr};

/// The piece placement on the chess board.
///
/// This type does not validate whether the placement it holds is valid
/// according to any set of chess rules, nor does it know whose turn it is.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Board {
    squares: [[Option<Figure>; 8]; 8],
}

impl Board {
    /// A board without any pieces.
    #[inline(always)]
    pub fn empty() -> Self {
        Board {
            squares: [[None; 8]; 8],
        }
    }

    /// The [`Figure`] at a given [`Square`], if any.
    #[inline(always)]
    pub fn get(&self, sq: Square) -> Option<Figure> {
        self.squares[sq.row() as usize][sq.col() as usize]
    }

    /// The [`Piece`] at a given [`Square`], if any.
    #[inline(always)]
    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        self.get(sq).map(|f| f.piece())
    }

    /// Places a [`Figure`] on a [`Square`], or clears it.
    #[inline(always)]
    pub fn set(&mut self, sq: Square, figure: Option<Figure>) {
        self.squares[sq.row() as usize][sq.col() as usize] = figure;
    }

    /// Relocates the piece on `from` to `to`, clearing `from`.
    ///
    /// Legality is not checked and whatever stood on `to` is overwritten.
    #[inline(always)]
    pub fn relocate(&mut self, from: Square, to: Square) {
        let figure = self.get(from);
        self.set(from, None);
        self.set(to, figure);
    }

    /// An iterator over all occupied squares.
    #[inline(always)]
    pub fn iter(&self) -> impl Iterator<Item = (Square, Figure)> + '_ {
        Square::iter().filter_map(|sq| self.get(sq).map(|f| (sq, f)))
    }

    /// The [`Square`] occupied by the king of a [`Color`].
    #[inline(always)]
    pub fn king(&self, side: Color) -> Option<Square> {
        let king = Piece(side, Role::King);
        self.iter().find(|(_, f)| f.piece() == king).map(|(sq, _)| sq)
    }
}

/// The standard starting position.
impl Default for Board {
    fn default() -> Self {
        use Role::*;
        const BACK_RANK: [Role; 8] = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];

        let mut board = Board::empty();

        for side in Color::ALL {
            for (col, role) in (0..).zip(BACK_RANK) {
                let piece = Piece(side, role).into();
                board.set(Square::at(side.home_row(), col), Some(piece));
                let pawn = Piece(side, Pawn).into();
                board.set(Square::at(side.pawn_row(), col), Some(pawn));
            }
        }

        board
    }
}

/// Retrieves the [`Figure`] at a given [`Square`], if any.
impl Index<Square> for Board {
    type Output = Option<Figure>;

    #[inline(always)]
    fn index(&self, sq: Square) -> &Self::Output {
        &self.squares[sq.row() as usize][sq.col() as usize]
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const FILES: &str = "    a    b    c    d    e    f    g    h";
        const RULE: &str = "  +----+----+----+----+----+----+----+----+";

        writeln!(f, "{FILES}")?;
        writeln!(f, "{RULE}")?;

        for (row, squares) in self.squares.iter().enumerate() {
            let rank = 8 - row;
            write!(f, "{rank} |")?;

            for figure in squares {
                match figure {
                    Some(figure) => write!(f, " {:<3}|", figure.piece().to_string())?,
                    None => write!(f, "    |")?,
                }
            }

            writeln!(f, " {rank}")?;
            writeln!(f, "{RULE}")?;
        }

        write!(f, "{FILES}")
    }
}

/// The reason why parsing [`Board`] failed.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error)]
#[display(fmt = "failed to parse piece placement")]
pub struct ParseBoardError;

/// Parses the piece placement field of [FEN].
///
/// [FEN]: https://www.chessprogramming.org/Forsyth-Edwards_Notation
impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut board = Board::empty();
        let mut ranks = 0;

        for (row, rank) in (0..).zip(s.split('/')) {
            if row >= 8 {
                return Err(ParseBoardError);
            }

            let mut col = 0;
            for c in rank.chars() {
                if let Some(n) = c.to_digit(10).filter(|n| (1..=8).contains(n)) {
                    col += n as i8;
                } else {
                    let piece = Piece::from_char(c).ok_or(ParseBoardError)?;
                    let sq = Square::new(row, col).ok_or(ParseBoardError)?;
                    board.set(sq, Some(piece.into()));
                    col += 1;
                }

                if col > 8 {
                    return Err(ParseBoardError);
                }
            }

            if col != 8 {
                return Err(ParseBoardError);
            }

            ranks += 1;
        }

        if ranks != 8 {
            return Err(ParseBoardError);
        }

        Ok(board)
    }
}
