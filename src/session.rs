//! The puzzle board a command script works on, and the commands it accepts.

use std::io::Write;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, info, instrument};

use crate::error::{Error, Result};
use crate::heuristic::Heuristic;
use crate::puzzle::{Move, State};
use crate::render::render;
use crate::search::{self, NodeBudget, Outcome, Problem, SearchReport};

/// Seed used by `randomizeState` unless configured otherwise.
pub const DEFAULT_SEED: u64 = u64::from_be_bytes(*b"\0\0axw582");

/// One parsed line of a command script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SetState(State),
    PrintState,
    Move(Move),
    RandomizeState(usize),
    SolveAStar(Heuristic),
    SolveBeam { width: usize, heuristic: Heuristic },
    MaxNodes(NodeBudget),
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut args = line.split_whitespace();
        let keyword = args.next().unwrap_or_default().to_ascii_lowercase();

        let command = match keyword.as_str() {
            "setstate" => {
                let digits: String = args.by_ref().collect();
                Command::SetState(digits.parse()?)
            }
            "printstate" => Command::PrintState,
            "move" => Command::Move(required(&mut args, "move", "direction")?.parse()?),
            "randomizestate" => {
                let n = required(&mut args, "randomizeState", "number of moves")?;
                Command::RandomizeState(number(n, "randomizeState")?)
            }
            "solve" => {
                let algorithm = required(&mut args, "solve", "algorithm")?;
                match algorithm.to_ascii_lowercase().as_str() {
                    "a-star" | "astar" => Command::SolveAStar(
                        required(&mut args, "solve a-star", "heuristic")?.parse()?,
                    ),
                    "beam" => {
                        let width = number(
                            required(&mut args, "solve beam", "beam width")?,
                            "solve beam",
                        )?;
                        if width == 0 {
                            return Err(Error::InvalidArgument {
                                command: "solve beam",
                                value: "0".to_string(),
                            });
                        }
                        let heuristic = match args.next() {
                            Some(id) => id.parse()?,
                            None => Heuristic::ManhattanDistance,
                        };
                        Command::SolveBeam { width, heuristic }
                    }
                    other => return Err(Error::UnrecognizedCommand(format!("solve {other}"))),
                }
            }
            "maxnodes" => Command::MaxNodes(required(&mut args, "maxNodes", "node budget")?.parse()?),
            _ => return Err(Error::UnrecognizedCommand(line.trim().to_string())),
        };

        Ok(command)
    }
}

fn required<'a>(
    args: &mut impl Iterator<Item = &'a str>,
    command: &'static str,
    expected: &'static str,
) -> Result<&'a str> {
    args.next()
        .ok_or(Error::MissingArgument { command, expected })
}

fn number(value: &str, command: &'static str) -> Result<usize> {
    value.parse().map_err(|_| Error::InvalidArgument {
        command,
        value: value.to_string(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub max_nodes: NodeBudget,
    pub seed: u64,
    /// Style `printState` output for a terminal.
    pub color: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_nodes: NodeBudget::Unbounded,
            seed: DEFAULT_SEED,
            color: false,
        }
    }
}

/// The board and settings shared by consecutive commands.
#[derive(Debug, Clone)]
pub struct Session {
    board: Option<State>,
    max_nodes: NodeBudget,
    seed: u64,
    color: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            board: None,
            max_nodes: config.max_nodes,
            seed: config.seed,
            color: config.color,
        }
    }

    /// The current board, or `None` until a valid state has been set.
    pub fn board(&self) -> Option<&State> {
        self.board.as_ref()
    }

    pub fn is_valid(&self) -> bool {
        self.board.is_some()
    }

    pub fn max_nodes(&self) -> NodeBudget {
        self.max_nodes
    }

    pub fn reset(&mut self) {
        self.board = None;
    }

    /// Validates and installs a state. On failure the board is untouched.
    pub fn set_state(&mut self, state: &str) -> Result<()> {
        self.board = Some(state.parse()?);
        Ok(())
    }

    pub fn move_blank(&mut self, movement: Move) -> Result<()> {
        let board = self.board.ok_or(Error::NoState)?;
        self.board = Some(board.apply_move(movement)?);
        Ok(())
    }

    /// Puts the goal on the board and walks the blank `moves` times in
    /// random legal directions. The RNG is reseeded on every call so the
    /// result depends on `moves` alone.
    pub fn randomize_state(&mut self, moves: usize) {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut board = State::goal();

        for _ in 0..moves {
            let legal: Vec<Move> = board.legal_moves().collect();
            if let Some(next) = legal.choose(&mut rng).and_then(|&m| board.apply_move(m).ok()) {
                board = next;
            }
        }

        debug!(moves, %board, "randomized");
        self.board = Some(board);
    }

    pub fn set_max_nodes(&mut self, budget: NodeBudget) {
        self.max_nodes = budget;
    }

    fn problem(&self) -> Result<Problem> {
        let initial = self.board.ok_or(Error::NoState)?;
        Ok(Problem::from_states(initial, State::goal()))
    }

    pub fn solve_astar(&self, heuristic: Heuristic) -> Result<SearchReport> {
        let problem = self.problem()?;
        Ok(search::astar(&problem, heuristic.function(), self.max_nodes))
    }

    pub fn solve_beam(&self, width: usize, heuristic: Heuristic) -> Result<SearchReport> {
        let problem = self.problem()?;
        Ok(search::beam(&problem, heuristic.function(), width, self.max_nodes))
    }

    /// Parses and runs one line. Blank lines and `#` comments do nothing.
    pub fn execute(&mut self, line: &str, out: &mut impl Write) -> Result<()> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(());
        }
        let command = line.parse()?;
        self.apply(command, out)
    }

    #[instrument(skip(self, out))]
    pub fn apply(&mut self, command: Command, out: &mut impl Write) -> Result<()> {
        match command {
            Command::SetState(state) => self.board = Some(state),
            Command::PrintState => {
                if let Some(board) = &self.board {
                    write!(out, "{}", render(board, self.color))?;
                }
            }
            Command::Move(movement) => self.move_blank(movement)?,
            Command::RandomizeState(moves) => self.randomize_state(moves),
            Command::SolveAStar(heuristic) => {
                let report = self.solve_astar(heuristic)?;
                write_report(out, &report)?;
            }
            Command::SolveBeam { width, heuristic } => {
                let report = self.solve_beam(width, heuristic)?;
                write_report(out, &report)?;
            }
            Command::MaxNodes(budget) => self.set_max_nodes(budget),
        }
        Ok(())
    }
}

/// Prints a search result in the line format the benchmark scrapers expect.
pub fn write_report(out: &mut impl Write, report: &SearchReport) -> Result<()> {
    match &report.outcome {
        Outcome::Solved(solution) => {
            info!(
                considered = report.nodes_considered,
                depth = solution.depth(),
                "solved"
            );
            writeln!(out, "Nodes considered: {}", report.nodes_considered)?;
            writeln!(out, "d: {}", solution.depth())?;
            for movement in solution.tile_moves() {
                writeln!(out, "{}", movement)?;
            }
        }
        Outcome::BudgetExceeded { limit } => {
            writeln!(out, "Exceeded max nodes to consider: {}.", limit)?;
            writeln!(out, "FAILURE")?;
        }
        Outcome::FrontierExhausted => {
            writeln!(out, "Nodes considered: {}", report.nodes_considered)?;
            writeln!(out, "FAILURE")?;
        }
    }
    Ok(())
}
