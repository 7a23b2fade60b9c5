//! An 8-puzzle solver driven by a small command language.
//!
//! A [`session::Session`] holds the board; scripts of commands set it up and
//! ask for A* or beam-search solutions.

pub mod error;
pub mod heuristic;
pub mod puzzle;
pub mod render;
pub mod script;
pub mod search;
pub mod session;

pub use error::{Error, Result};
pub use heuristic::Heuristic;
pub use puzzle::{Move, State};
pub use search::{NodeBudget, Outcome, Problem, SearchReport, Solution};
pub use session::{Command, Session, SessionConfig};
