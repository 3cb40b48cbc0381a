use crate::chess::{Board, Castles, Color, Figure, IllegalMove, Move, Piece, PowerUp, Role};
use crate::chess::{ParseBoardError, ParseCastlesError, ParseSquareError, Square, Status};
use crate::game::{Dice, MysteryBox};
use crate::rules;
use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU8;
use tracing::debug;

#[cfg(test)]
use proptest::{prelude::*, sample::*, strategy::Map};

#[cfg(test)]
use std::ops::Range;

/// The reason why [`GameState::from_fen`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error, From)]
pub enum ParseFenError {
    #[display(fmt = "syntax error at the piece placement field")]
    InvalidPlacement(ParseBoardError),
    #[display(fmt = "syntax error at the side to move field")]
    #[from(ignore)]
    InvalidTurn,
    #[display(fmt = "syntax error at the castling rights field")]
    InvalidCastlingRights(ParseCastlesError),
    #[display(fmt = "syntax error at the en passant field")]
    InvalidEnPassantSquare(ParseSquareError),
    #[display(fmt = "expected at least 4 and at most 6 fields")]
    #[from(ignore)]
    InvalidFieldCount,
}

/// The authoritative record of a game.
///
/// Values are never mutated by the rules engine, instead every committed move
/// yields a new [`GameState`].
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct GameState {
    white_player: String,
    black_player: String,
    turn: Color,
    status: Status,
    board: Board,
    castles: Castles,
    en_passant: Option<Square>,
    mystery_box: MysteryBox,
    white_power_up: Option<PowerUp>,
    black_power_up: Option<PowerUp>,
    white_promotions: u8,
    black_promotions: u8,
}

impl GameState {
    /// A game in progress from the standard starting position.
    pub fn new(white: impl Into<String>, black: impl Into<String>) -> Self {
        GameState {
            white_player: white.into(),
            black_player: black.into(),
            turn: Color::White,
            status: Status::InProgress,
            board: Board::default(),
            castles: Castles::default(),
            en_passant: None,
            mystery_box: MysteryBox::default(),
            white_power_up: None,
            black_power_up: None,
            white_promotions: 0,
            black_promotions: 0,
        }
    }

    /// A game from the position described in [FEN].
    ///
    /// The move counters are ignored if present.
    ///
    /// [FEN]: https://www.chessprogramming.org/Forsyth-Edwards_Notation
    pub fn from_fen(
        white: impl Into<String>,
        black: impl Into<String>,
        fen: &str,
    ) -> Result<Self, ParseFenError> {
        let fields: Vec<_> = fen.split_whitespace().collect();

        let [placement, turn, castles, en_passant, ..] = fields[..] else {
            return Err(ParseFenError::InvalidFieldCount);
        };

        if fields.len() > 6 {
            return Err(ParseFenError::InvalidFieldCount);
        }

        let turn = match turn {
            "w" => Color::White,
            "b" => Color::Black,
            _ => return Err(ParseFenError::InvalidTurn),
        };

        let en_passant = match en_passant {
            "-" => None,
            sq => Some(sq.parse()?),
        };

        let mut state = GameState {
            turn,
            board: placement.parse()?,
            castles: castles.parse()?,
            en_passant,
            ..GameState::new(white, black)
        };

        state.status = rules::evaluate_status(&state, turn);
        Ok(state)
    }

    /// The player with the white pieces.
    pub fn white_player(&self) -> &str {
        &self.white_player
    }

    /// The player with the black pieces.
    pub fn black_player(&self) -> &str {
        &self.black_player
    }

    /// The player of a side.
    pub fn player(&self, side: Color) -> &str {
        match side {
            Color::White => &self.white_player,
            Color::Black => &self.black_player,
        }
    }

    /// The side of a player, if seated.
    pub fn side_of(&self, player: &str) -> Option<Color> {
        Color::ALL.into_iter().find(|&c| self.player(c) == player)
    }

    /// The side to move.
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// The current [`Status`].
    pub fn status(&self) -> Status {
        self.status
    }

    /// The current piece placement.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The castling rights still held.
    pub fn castles(&self) -> Castles {
        self.castles
    }

    /// The square a pawn may capture into en passant, if any.
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// The mystery box.
    pub fn mystery_box(&self) -> &MysteryBox {
        &self.mystery_box
    }

    /// The power-up held by a side, if any.
    pub fn power_up(&self, side: Color) -> Option<PowerUp> {
        match side {
            Color::White => self.white_power_up,
            Color::Black => self.black_power_up,
        }
    }

    /// Plays a [`Move`] for the side to move, if legal.
    ///
    /// Takes care of promotion, castling and the en passant window, but leaves
    /// the mystery box alone.
    pub fn play(&self, m: Move) -> Result<GameState, IllegalMove> {
        let (side, whence, whither) = (self.turn, m.whence(), m.whither());

        let Some(Piece(_, role)) = self.board.piece_on(whence) else {
            return Err(IllegalMove(m));
        };

        let mut board =
            rules::apply_move_if_legal(self, whence, whither, side).ok_or(IllegalMove(m))?;

        let mut next = self.clone();

        if role == Role::Pawn && whither.row() == side.promotion_row() {
            let promotions = match side {
                Color::White => &mut next.white_promotions,
                Color::Black => &mut next.black_promotions,
            };

            // Serials count per side, so the colour code keeps them unique.
            let serial = NonZeroU8::MIN.saturating_add(*promotions);
            let piece = Piece(side, m.promotion().into());
            board.set(whither, Some(Figure::promoted(piece, serial)));
            *promotions = promotions.saturating_add(1);
        }

        next.en_passant = match role {
            Role::Pawn if (whither.row() - whence.row()).abs() == 2 => {
                whence.offset(side.forward(), 0)
            }
            _ => None,
        };

        if role == Role::King {
            next.castles.remove(Castles::side(side));

            if (whither.col() - whence.col()).abs() == 2 {
                let (rook, col) = if whither.col() > whence.col() { (7, 5) } else { (0, 3) };
                let row = whence.row();
                board.relocate(Square::at(row, rook), Square::at(row, col));
            }
        }

        if role == Role::Rook {
            next.castles.remove(Castles::rook_home(whence) & Castles::side(side));
        }

        next.castles.remove(Castles::rook_home(whither) & Castles::side(!side));

        next.board = board;
        next.turn = !side;
        next.status = rules::evaluate_status(&next, next.turn);

        Ok(next)
    }

    /// Updates the mystery box after `m` was played by `mover`.
    ///
    /// Returns whether the box was collected, in which case `mover` is awarded a [`PowerUp`].
    pub fn advance_mystery_box<D: Dice + ?Sized>(
        &mut self,
        m: Move,
        mover: Color,
        dice: &mut D,
    ) -> bool {
        if !self.mystery_box.advance(m, &self.board, dice) {
            return false;
        }

        debug!(player = self.player(mover), "power-up awarded");

        match mover {
            Color::White => self.white_power_up = Some(PowerUp::MysteryBox),
            Color::Black => self.black_power_up = Some(PowerUp::MysteryBox),
        }

        true
    }

    /// Removes any mystery box and draws a fresh countdown.
    pub fn reset_mystery_box<D: Dice + ?Sized>(&mut self, dice: &mut D) {
        self.mystery_box = MysteryBox::roll(dice);
    }

    /// Ends the game without a checkmate or stalemate.
    pub(crate) fn finish(&mut self) {
        self.status = Status::Finished;
    }
}

#[cfg(test)]
impl Arbitrary for GameState {
    type Parameters = ();
    type Strategy = Map<(Range<usize>, SelectorStrategy), fn((usize, Selector)) -> GameState>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (0..64, any::<Selector>()).prop_map(|(moves, selector)| {
            let mut state = GameState::new("white", "black");

            for _ in 0..moves {
                let legal: Vec<_> = rules::moves(&state).collect();
                match selector.try_select(legal).map(|m| state.play(m)) {
                    Some(Ok(next)) => state = next,
                    _ => break,
                }
            }

            state
        })
    }
}
