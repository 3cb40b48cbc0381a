use crate::chess::{IllegalMove, Square, Status};
use crate::game::{Dice, GameState, MoveRequest, Random};
use derive_more::{Display, Error, From};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{info, instrument};

/// The reason why an action was rejected.
///
/// The game is left untouched whenever an action is rejected.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error, From)]
#[error(ignore)]
pub enum Rejection {
    #[display(fmt = "no game has been started")]
    #[from(ignore)]
    NoActiveGame,

    #[display(fmt = "the game has already ended in a {}", _0)]
    #[from(ignore)]
    GameHasEnded(Status),

    #[display(fmt = "it is not the turn of `{}`", _0)]
    #[from(ignore)]
    TurnOfTheOpponent(String),

    #[display(fmt = "`{}` is not playing this game", _0)]
    #[from(ignore)]
    UnknownPlayer(String),

    #[display(fmt = "there is no piece on `{}`", _0)]
    #[from(ignore)]
    EmptySquare(Square),

    #[display(fmt = "{}", _0)]
    IllegalMove(IllegalMove),
}

#[derive(Debug)]
struct Inner<D> {
    game: Option<GameState>,
    dice: D,
}

/// The owner of the live game.
///
/// Every operation holds an exclusive lock for its whole duration, so actions are
/// applied atomically and in the order they are submitted.
#[derive(Debug)]
pub struct Session<D = Random> {
    inner: Mutex<Inner<D>>,
}

impl Default for Session<Random> {
    fn default() -> Self {
        Session::new(Random::default())
    }
}

impl<D: Dice> Session<D> {
    /// Constructs a [`Session`] without a game, drawing mystery boxes from `dice`.
    pub fn new(dice: D) -> Self {
        Session {
            inner: Mutex::new(Inner { game: None, dice }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner<D>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Starts a new game from the standard position, replacing any previous one.
    #[instrument(level = "debug", skip(self), ret)]
    pub fn start_game(&self, white: &str, black: &str) -> GameState {
        let mut inner = self.lock();
        let mut state = GameState::new(white, black);
        state.reset_mystery_box(&mut inner.dice);
        inner.game = Some(state.clone());
        info!(white, black, "game started");
        state
    }

    /// Replaces the game with a prepared one.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, state: GameState) {
        self.lock().game = Some(state);
    }

    /// A snapshot of the game, if any.
    pub fn current_game(&self) -> Option<GameState> {
        self.lock().game.clone()
    }

    /// The [`Status`] of the game, [`Status::WaitingForPlayers`] if there is none.
    pub fn status(&self) -> Status {
        self.lock()
            .game
            .as_ref()
            .map_or(Status::WaitingForPlayers, GameState::status)
    }

    /// Validates and commits a move.
    #[instrument(level = "debug", skip(self, request), fields(%request), err)]
    pub fn apply_move(&self, request: &MoveRequest) -> Result<GameState, Rejection> {
        let mut inner = self.lock();
        let Inner { game, dice } = &mut *inner;
        let state = game.as_ref().ok_or(Rejection::NoActiveGame)?;
        accepts_actions(state)?;

        let side = state.turn();
        if state.player(side) != request.player {
            return Err(match state.side_of(&request.player) {
                Some(_) => Rejection::TurnOfTheOpponent(request.player.clone()),
                None => Rejection::UnknownPlayer(request.player.clone()),
            });
        }

        if state.board()[request.from].is_none() {
            return Err(Rejection::EmptySquare(request.from));
        }

        let m = request.to_move();
        let mut next = state.play(m)?;
        next.advance_mystery_box(m, side, dice);

        info!(player = %request.player, %m, status = %next.status(), "move committed");

        *game = Some(next.clone());
        Ok(next)
    }

    /// Ends the game in favor of the opponent of `player`.
    #[instrument(level = "debug", skip(self), err)]
    pub fn resign(&self, player: &str) -> Result<GameState, Rejection> {
        let mut inner = self.lock();
        let state = inner.game.as_mut().ok_or(Rejection::NoActiveGame)?;
        accepts_actions(state)?;

        if state.side_of(player).is_none() {
            return Err(Rejection::UnknownPlayer(player.into()));
        }

        state.finish();
        info!(player, "player resigned");

        Ok(state.clone())
    }
}

/// Only games in progress accept moves and resignations.
fn accepts_actions(state: &GameState) -> Result<(), Rejection> {
    match state.status() {
        Status::InProgress => Ok(()),
        s if s.is_terminal() => Err(Rejection::GameHasEnded(s)),
        _ => Err(Rejection::NoActiveGame),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess::{Color, Move, Piece, PowerUp, Role};
    use crate::game::{MockDice, MysteryBox};
    use mockall::predicate::eq;
    use proptest::sample::Selector;
    use test_strategy::proptest;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn request(player: &str, m: &str) -> MoveRequest {
        MoveRequest::new(player, sq(&m[..2]), sq(&m[2..]))
    }

    fn dice(countdown: usize) -> MockDice {
        let mut dice = MockDice::new();

        dice.expect_roll()
            .withf(|r| *r == MysteryBox::COUNTDOWN)
            .return_const(countdown);

        dice.expect_roll()
            .withf(|r| *r != MysteryBox::COUNTDOWN)
            .returning(|r| *r.start());

        dice
    }

    fn session() -> Session<MockDice> {
        let session = Session::new(dice(7));
        session.start_game("alice", "bob");
        session
    }

    #[test]
    fn session_without_game_is_waiting_for_players() {
        let session = Session::new(MockDice::new());
        assert_eq!(session.current_game(), None);
        assert_eq!(session.status(), Status::WaitingForPlayers);
    }

    #[proptest]
    fn start_game_draws_the_mystery_box_countdown(
        #[strategy(MysteryBox::COUNTDOWN)] n: usize,
    ) {
        let session = Session::new(dice(n));
        let state = session.start_game("alice", "bob");

        assert_eq!(state.status(), Status::InProgress);
        assert_eq!(state.turn(), Color::White);
        assert_eq!(state.mystery_box(), &MysteryBox::new(n));
        assert_eq!(session.current_game(), Some(state));
    }

    #[proptest]
    fn moves_are_rejected_without_a_game(r: MoveRequest) {
        let session = Session::new(MockDice::new());
        assert_eq!(session.apply_move(&r), Err(Rejection::NoActiveGame));
        assert_eq!(session.resign(&r.player), Err(Rejection::NoActiveGame));
    }

    #[test]
    fn moves_are_rejected_out_of_turn() {
        let session = session();
        let before = session.current_game();

        assert_eq!(
            session.apply_move(&request("bob", "e7e5")),
            Err(Rejection::TurnOfTheOpponent("bob".into()))
        );

        assert_eq!(session.current_game(), before);
    }

    #[proptest]
    fn moves_are_rejected_from_unknown_players(
        #[filter(#p != "alice" && #p != "bob")]
        #[strategy("[a-z]{1,8}")]
        p: String,
    ) {
        let session = session();
        assert_eq!(
            session.apply_move(&request(&p, "e2e4")),
            Err(Rejection::UnknownPlayer(p.clone()))
        );
    }

    #[test]
    fn moves_from_empty_squares_are_rejected() {
        let session = session();
        assert_eq!(
            session.apply_move(&request("alice", "e4e5")),
            Err(Rejection::EmptySquare(sq("e4")))
        );
    }

    #[test]
    fn illegal_moves_are_rejected() {
        let session = session();
        let before = session.current_game();

        assert_eq!(
            session.apply_move(&request("alice", "e2e5")),
            Err(Rejection::IllegalMove(IllegalMove(Move::new(sq("e2"), sq("e5")))))
        );

        assert_eq!(session.current_game(), before);
    }

    #[test]
    fn legal_moves_are_committed() {
        let session = session();
        let state = session.apply_move(&request("alice", "e2e4")).unwrap();

        assert_eq!(state.turn(), Color::Black);
        assert_eq!(state.board().piece_on(sq("e4")), Some(Piece(Color::White, Role::Pawn)));
        assert_eq!(state.mystery_box().countdown(), 6);
        assert_eq!(session.current_game(), Some(state));
    }

    #[proptest]
    fn legal_moves_of_the_side_to_move_are_accepted(
        #[map(|s: Selector| s.select(crate::rules::moves(&GameState::new("alice", "bob"))))]
        m: Move,
    ) {
        let session = session();
        let r = MoveRequest::new("alice", m.whence(), m.whither());
        assert!(session.apply_move(&r).is_ok());
    }

    #[test]
    fn terminal_games_reject_further_moves() {
        let session = session();

        for (player, m) in [
            ("alice", "e2e4"),
            ("bob", "e7e5"),
            ("alice", "f1c4"),
            ("bob", "b8c6"),
            ("alice", "d1h5"),
            ("bob", "g8f6"),
            ("alice", "h5f7"),
        ] {
            session.apply_move(&request(player, m)).unwrap();
        }

        assert_eq!(session.status(), Status::Checkmate);
        assert_eq!(
            session.apply_move(&request("bob", "e8f7")),
            Err(Rejection::GameHasEnded(Status::Checkmate))
        );
    }

    #[test]
    fn resigning_finishes_the_game() {
        let session = session();
        let state = session.resign("bob").unwrap();

        assert_eq!(state.status(), Status::Finished);
        assert_eq!(session.status(), Status::Finished);
        assert_eq!(
            session.apply_move(&request("alice", "e2e4")),
            Err(Rejection::GameHasEnded(Status::Finished))
        );
        assert_eq!(
            session.resign("alice"),
            Err(Rejection::GameHasEnded(Status::Finished))
        );
    }

    #[test]
    fn unknown_players_cannot_resign() {
        let session = session();
        assert_eq!(
            session.resign("carol"),
            Err(Rejection::UnknownPlayer("carol".into()))
        );
    }

    #[test]
    fn mystery_box_is_awarded_to_the_collector() {
        let mut dice = MockDice::new();
        dice.expect_roll()
            .with(eq(MysteryBox::COUNTDOWN))
            .return_const(3usize);
        dice.expect_roll()
            .with(eq(0..=31))
            .return_const(20usize);

        let session = Session::new(dice);
        session.start_game("alice", "bob");

        session.apply_move(&request("alice", "g1f3")).unwrap();
        session.apply_move(&request("bob", "g8f6")).unwrap();
        let state = session.apply_move(&request("alice", "b1c3")).unwrap();

        assert_eq!(state.mystery_box().location(), Some(sq("e4")));
        assert_eq!(state.board()[sq("e4")], None);

        let state = session.apply_move(&request("bob", "f6e4")).unwrap();
        assert_eq!(state.power_up(Color::Black), Some(PowerUp::MysteryBox));
        assert_eq!(state.power_up(Color::White), None);
        assert_eq!(state.mystery_box(), &MysteryBox::new(3));
    }

    #[proptest]
    fn rejection_can_be_converted_from_illegal_move(im: IllegalMove) {
        assert_eq!(Rejection::from(im), Rejection::IllegalMove(im));
    }

    #[test]
    fn games_waiting_for_players_reject_actions() {
        let ron = ron::to_string(&GameState::new("alice", "bob")).unwrap();
        let ron = ron.replace("IN_PROGRESS", "WAITING_FOR_PLAYERS");
        let state: GameState = ron::from_str(&ron).unwrap();
        assert_eq!(state.status(), Status::WaitingForPlayers);

        let session = Session::new(MockDice::new());
        session.load(state.clone());

        assert_eq!(
            session.apply_move(&request("alice", "e2e4")),
            Err(Rejection::NoActiveGame)
        );
        assert_eq!(session.resign("alice"), Err(Rejection::NoActiveGame));
        assert_eq!(session.current_game(), Some(state));
    }

    #[test]
    fn load_installs_a_prepared_game() {
        let session = Session::new(MockDice::new());
        let state = GameState::from_fen("alice", "bob", "8/8/8/8/8/kq6/8/K7 w - - 0 1").unwrap();
        session.load(state.clone());
        assert_eq!(session.current_game(), Some(state));
        assert_eq!(session.status(), Status::Stalemate);
    }
}
