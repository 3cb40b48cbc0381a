use crate::io::Io;
use anyhow::{Context, Error as Anyhow};
use clap::{Parser, ValueEnum};
use derive_more::{Display, Error};
use lib::chess::{Color, Square, Status};
use lib::game::{GameState, MoveRequest, Random, Session};
use std::io::{stdin, stdout, Read, Write};
use std::str::FromStr;
use tracing::{info, instrument, warn};

/// How the game is printed after every action.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, ValueEnum)]
pub enum Format {
    /// An ASCII diagram.
    #[default]
    Board,
    /// The full game state in Rusty Object Notation.
    Ron,
}

/// Two players taking turns at the same terminal.
#[derive(Debug, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Play {
    /// The player with the white pieces.
    #[clap(short, long, default_value = "white")]
    white: String,

    /// The player with the black pieces.
    #[clap(short, long, default_value = "black")]
    black: String,

    /// Seeds the mystery boxes, otherwise drawn from system entropy.
    #[clap(short, long)]
    seed: Option<u64>,

    /// The starting position in FEN notation.
    #[clap(short, long)]
    fen: Option<String>,

    /// How the game is printed.
    #[clap(long, value_enum, default_value_t)]
    format: Format,
}

impl Default for Play {
    fn default() -> Self {
        Play::parse_from(["play"])
    }
}

/// A line typed by the player to move.
#[derive(Debug, Clone, Eq, PartialEq)]
enum Command {
    Move(Square, Square, Option<String>),
    Resign,
}

/// The reason why parsing [`Command`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "expected a move such as `e2e4` or `e7e8n`, or `resign`")]
struct ParseCommandError;

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if s.eq_ignore_ascii_case("resign") {
            return Ok(Command::Resign);
        }

        let whence = s.get(..2).and_then(|s| s.parse().ok());
        let whither = s.get(2..4).and_then(|s| s.parse().ok());
        let promotion = s.get(4..).filter(|p| !p.is_empty()).map(String::from);

        match (whence, whither) {
            (Some(whence), Some(whither)) => Ok(Command::Move(whence, whither, promotion)),
            _ => Err(ParseCommandError),
        }
    }
}

impl Play {
    #[instrument(level = "trace", skip(self), err)]
    pub fn execute(self) -> Result<(), Anyhow> {
        let dice = self.seed.map_or_else(Random::default, Random::seeded);
        let session = Session::new(dice);

        match &self.fen {
            None => {
                session.start_game(&self.white, &self.black);
            }

            Some(fen) => {
                let state = GameState::from_fen(&self.white, &self.black, fen)
                    .context("invalid starting position")?;

                session.load(state);
            }
        }

        let mut io = Io::new(stdout().lock(), stdin().lock());
        self.run(&session, &mut io)
    }

    fn run<W: Write, R: Read>(&self, session: &Session, io: &mut Io<W, R>) -> Result<(), Anyhow> {
        let mut state = session.current_game().context("no game to play")?;
        self.show(io, &state)?;

        while state.status() == Status::InProgress {
            let side = state.turn();
            let player = state.player(side).to_string();

            let Some(line) = io.prompt(format_args!("{player} ({side}) >"))? else {
                break;
            };

            let result = match line.parse() {
                Ok(Command::Resign) => session.resign(&player),
                Ok(Command::Move(whence, whither, promotion)) => {
                    let mut request = MoveRequest::new(&player, whence, whither);
                    request.promotion = promotion;
                    session.apply_move(&request)
                }

                Err(e) => {
                    warn!("{}", e);
                    continue;
                }
            };

            match result {
                Ok(next) => {
                    state = next;
                    self.show(io, &state)?;
                }

                Err(e) => warn!("{}", e),
            }
        }

        info!(status = %state.status(), "game over");
        io.send(format_args!("game over: {}", state.status()))?;

        Ok(())
    }

    fn show<W: Write, R: Read>(&self, io: &mut Io<W, R>, state: &GameState) -> Result<(), Anyhow> {
        match self.format {
            Format::Ron => {
                let config = ron::ser::PrettyConfig::default();
                io.send(ron::ser::to_string_pretty(state, config)?)?;
            }

            Format::Board => {
                io.send(state.board())?;

                if let Some(sq) = state.mystery_box().location() {
                    io.send(format_args!("mystery box on {sq}"))?;
                }

                for side in Color::ALL {
                    if let Some(p) = state.power_up(side) {
                        io.send(format_args!("{} holds a {p}", state.player(side)))?;
                    }
                }

                io.send(format_args!("{} to move, {}", state.turn(), state.status()))?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{collections::VecDeque, str};
    use test_strategy::proptest;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn play(format: Format, input: &str) -> String {
        let play = Play {
            format,
            seed: Some(0),
            ..Play::default()
        };

        let session = Session::new(Random::seeded(0));
        session.start_game(&play.white, &play.black);

        let mut output = Vec::new();
        let mut input = VecDeque::from(input.as_bytes().to_vec());
        play.run(&session, &mut Io::new(&mut output, &mut input)).unwrap();

        String::from_utf8(output).unwrap()
    }

    #[test]
    fn default_players_are_named_after_their_color() {
        let play = Play::default();
        assert_eq!(play.white, "white");
        assert_eq!(play.black, "black");
        assert_eq!(play.format, Format::Board);
    }

    #[test]
    fn parses_moves() {
        assert_eq!("e2e4".parse(), Ok(Command::Move(sq("e2"), sq("e4"), None)));
        assert_eq!(
            " e7e8n ".parse(),
            Ok(Command::Move(sq("e7"), sq("e8"), Some("n".into())))
        );
    }

    #[test]
    fn parses_resignation() {
        assert_eq!("resign".parse(), Ok(Command::Resign));
        assert_eq!("RESIGN".parse(), Ok(Command::Resign));
    }

    #[proptest]
    fn parsing_command_fails_for_invalid_squares(#[strategy("[i-z][0-9]{3}")] s: String) {
        assert_eq!(s.parse::<Command>(), Err(ParseCommandError));
    }

    #[test]
    fn scholars_mate_ends_the_game() {
        let output = play(Format::Board, "e2e4\ne7e5\nf1c4\nb8c6\nd1h5\ng8f6\nh5f7\n");
        assert!(output.ends_with("game over: checkmate\n"));
    }

    #[test]
    fn resigning_ends_the_game() {
        let output = play(Format::Board, "e2e4\nresign\n");
        assert!(output.contains("black (black) >"));
        assert!(output.ends_with("game over: finished\n"));
    }

    #[test]
    fn invalid_input_is_ignored() {
        let output = play(Format::Board, "hello\ne2e5\n");
        assert_eq!(output.matches("white (white) >").count(), 3);
        assert!(output.ends_with("game over: in progress\n"));
    }

    #[test]
    fn game_state_can_be_printed_as_ron() {
        let output = play(Format::Ron, "");
        assert!(output.contains("white_player: \"white\""));
        assert!(output.contains("status: IN_PROGRESS"));
    }
}
