use thiserror::Error;

use crate::puzzle::Move;

/// Errors raised while building states, moving tiles or dispatching commands.
///
/// A search that runs out of budget or frontier is not an error; see
/// [`crate::search::Outcome`].
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid state '{input}': {defect}")]
    InvalidState { input: String, defect: StateDefect },

    #[error("illegal move: blank at position {blank} cannot move {direction}")]
    IllegalMove { blank: usize, direction: Move },

    #[error("unrecognized command '{0}'")]
    UnrecognizedCommand(String),

    #[error("unrecognized heuristic '{0}' (expected h1 or h2)")]
    UnrecognizedHeuristic(String),

    #[error("unrecognized direction '{0}' (expected up, down, left or right)")]
    UnrecognizedDirection(String),

    #[error("{command}: missing {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },

    #[error("{command}: invalid argument '{value}'")]
    InvalidArgument { command: &'static str, value: String },

    #[error("no puzzle state has been set")]
    NoState,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// What exactly is wrong with a rejected state string.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateDefect {
    #[error("expected 9 tiles, got {0}")]
    WrongLength(usize),

    #[error("'{0}' is not a tile in the range [0, 8]")]
    BadCharacter(char),

    #[error("tile {0} is outside the range [0, 8]")]
    OutOfRange(u8),

    #[error("tile {0} is missing")]
    Missing(u8),
}

pub type Result<T> = std::result::Result<T, Error>;
