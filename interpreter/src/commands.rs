use std::str::FromStr;

use cube_core::{CubeState, Move};
use thiserror::Error;

/// Why a command was thrown away. The module is untouched in every case.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unrecognized move `{0}`")]
    UnrecognizedToken(String),
    #[error("The cube is still turning from the previous command")]
    Busy,
    #[error("The module is already solved")]
    Solved,
    #[error("Empty command")]
    Empty,
}

/// One line of player input
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Moves in the order they were typed, with doubled tokens already expanded
    Turns(Vec<Move>),
    Reset,
    RotateView,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Command, CommandError> {
        let s = s.trim();

        if s.is_empty() {
            return Err(CommandError::Empty);
        }

        if s.eq_ignore_ascii_case("reset") {
            return Ok(Command::Reset);
        }

        if s.eq_ignore_ascii_case("rotate") {
            return Ok(Command::RotateView);
        }

        let mut moves = Vec::new();

        for token in s.split_whitespace() {
            let unrecognized = || CommandError::UnrecognizedToken(token.to_owned());

            match token.strip_suffix('2') {
                Some(face) => {
                    let mv = face.parse::<Move>().map_err(|_| unrecognized())?;
                    if mv.is_prime() {
                        return Err(unrecognized());
                    }

                    moves.push(mv);
                    moves.push(mv);
                }
                None => moves.push(token.parse::<Move>().map_err(|_| unrecognized())?),
            }
        }

        Ok(Command::Turns(moves))
    }
}

/// Play `moves` on a copy of `live`, stopping as soon as the copy matches `reference`.
///
/// Returns the moves that were actually played.
#[must_use]
pub fn simulate(moves: &[Move], live: &CubeState, reference: &CubeState) -> Vec<Move> {
    let mut state = live.clone();
    let mut played = Vec::with_capacity(moves.len());

    for &mv in moves {
        state = state.apply(mv);
        played.push(mv);

        if state.is_solved(reference) {
            break;
        }
    }

    played
}
