use crate::chess::{Board, Move, Square};
use crate::game::Dice;
use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use tracing::{debug, trace};

/// The squares a [`Move`] travels through, both ends included.
///
/// Orthogonal and diagonal moves cover every square along the line, whereas
/// any other move, such as a knight's, only touches its two ends.
pub fn path(from: Square, to: Square) -> ArrayVec<Square, 8> {
    let mut squares = ArrayVec::new();
    let (dr, dc) = (to.row() - from.row(), to.col() - from.col());

    if dr != 0 && dc != 0 && dr.abs() != dc.abs() {
        squares.push(from);
        squares.push(to);
        return squares;
    }

    let mut next = Some(from);
    while let Some(sq) = next {
        squares.push(sq);
        next = (sq != to).then(|| sq.offset(dr.signum(), dc.signum())).flatten();
    }

    squares
}

/// The power-up token hidden somewhere on the board.
///
/// At most one box exists at a time. While there is none, each committed move
/// brings the next one closer, and once the countdown runs out a new box
/// appears on an empty square.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct MysteryBox {
    location: Option<Square>,
    countdown: usize,
}

impl MysteryBox {
    /// The range of moves until a box appears.
    pub const COUNTDOWN: RangeInclusive<usize> = 3..=7;

    /// No box on the board, with a new one due in `countdown` moves.
    pub fn new(countdown: usize) -> Self {
        MysteryBox {
            location: None,
            countdown,
        }
    }

    /// No box on the board, with a countdown drawn from [`MysteryBox::COUNTDOWN`].
    pub fn roll<D: Dice + ?Sized>(dice: &mut D) -> Self {
        MysteryBox::new(dice.roll(Self::COUNTDOWN))
    }

    /// The [`Square`] where the box is, if any.
    pub fn location(&self) -> Option<Square> {
        self.location
    }

    /// The number of moves until a box appears.
    ///
    /// Only meaningful while there is no box.
    pub fn countdown(&self) -> usize {
        self.countdown
    }

    /// Updates the box after `m` was committed, `board` being the resulting placement.
    ///
    /// Returns whether the box was collected.
    pub fn advance<D: Dice + ?Sized>(&mut self, m: Move, board: &Board, dice: &mut D) -> bool {
        if let Some(sq) = self.location {
            if path(m.whence(), m.whither()).contains(&sq) {
                *self = MysteryBox::roll(dice);
                debug!(square = %sq, countdown = self.countdown, "mystery box collected");
                return true;
            }

            return false;
        }

        self.countdown = self.countdown.saturating_sub(1);
        trace!(countdown = self.countdown, "mystery box countdown");

        if self.countdown == 0 {
            let empty: ArrayVec<Square, 64> =
                Square::iter().filter(|&sq| board[sq].is_none()).collect();

            if let Some(n) = empty.len().checked_sub(1) {
                let sq = empty[dice.roll(0..=n).min(n)];
                self.location = Some(sq);
                debug!(square = %sq, "mystery box spawned");
            }
        }

        false
    }
}

/// No box on the board, with a new one due after the longest countdown.
impl Default for MysteryBox {
    fn default() -> Self {
        MysteryBox::new(*Self::COUNTDOWN.end())
    }
}
