use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result, StateDefect};

pub const SIZE: usize = 3;
pub const TILES: usize = SIZE * SIZE;

/// Legal blank-tile moves for each board position, one bit per [`Move`].
///
/// Corners allow two moves, edge centers three and the center all four.
pub const MOVE_MASKS: [u8; TILES] = [
    0b1100, 0b1110, 0b0110, //
    0b1101, 0b1111, 0b0111, //
    0b1001, 0b1011, 0b0011,
];

/// A direction the blank tile moves in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Move {
    Up,
    Left,
    Down,
    Right,
}

impl Move {
    pub const ALL: [Move; 4] = [Move::Up, Move::Left, Move::Down, Move::Right];

    pub fn bit(&self) -> u8 {
        match self {
            Move::Up => 0b0001,
            Move::Left => 0b0010,
            Move::Down => 0b0100,
            Move::Right => 0b1000,
        }
    }

    /// Row-major index offset of the cell the blank swaps with.
    pub fn as_offset(&self) -> isize {
        match self {
            Move::Up => -(SIZE as isize),
            Move::Left => -1,
            Move::Down => SIZE as isize,
            Move::Right => 1,
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Move::Up => "up",
            Move::Left => "left",
            Move::Down => "down",
            Move::Right => "right",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Move {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "up" => Ok(Move::Up),
            "left" => Ok(Move::Left),
            "down" => Ok(Move::Down),
            "right" => Ok(Move::Right),
            _ => Err(Error::UnrecognizedDirection(s.to_string())),
        }
    }
}

/// One arrangement of the nine tiles. `0` is the blank.
///
/// Ordering is lexicographic over the tiles, which is the same as ordering
/// the canonical strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct State {
    tiles: [u8; TILES],
    blank: usize,
}

impl State {
    /// The solved board, `012345678`.
    pub fn goal() -> Self {
        Self {
            tiles: [0, 1, 2, 3, 4, 5, 6, 7, 8],
            blank: 0,
        }
    }

    pub fn tiles(&self) -> &[u8; TILES] {
        &self.tiles
    }

    pub fn blank(&self) -> usize {
        self.blank
    }

    pub fn is_legal(&self, movement: Move) -> bool {
        MOVE_MASKS[self.blank] & movement.bit() != 0
    }

    pub fn legal_moves(&self) -> impl Iterator<Item = Move> + '_ {
        Move::ALL.into_iter().filter(move |&m| self.is_legal(m))
    }

    pub fn apply_move(&self, movement: Move) -> Result<Self> {
        if !self.is_legal(movement) {
            return Err(Error::IllegalMove {
                blank: self.blank,
                direction: movement,
            });
        }
        Ok(self.slide(movement))
    }

    /// Every state one legal move away, in `Up, Left, Down, Right` order.
    pub fn expand(&self) -> Vec<(Move, State)> {
        self.legal_moves().map(|m| (m, self.slide(m))).collect()
    }

    /// Swaps the blank with its neighbour. `movement` must be legal.
    fn slide(&self, movement: Move) -> Self {
        let target = (self.blank as isize + movement.as_offset()) as usize;
        let mut tiles = self.tiles;
        tiles.swap(self.blank, target);

        Self {
            tiles,
            blank: target,
        }
    }

    fn validate(tiles: [u8; TILES], input: impl Fn() -> String) -> Result<Self> {
        let mut seen = [false; TILES];
        for &tile in &tiles {
            if tile as usize >= TILES {
                return Err(Error::InvalidState {
                    input: input(),
                    defect: StateDefect::OutOfRange(tile),
                });
            }
            seen[tile as usize] = true;
        }

        if let Some(missing) = seen.iter().position(|&s| !s) {
            return Err(Error::InvalidState {
                input: input(),
                defect: StateDefect::Missing(missing as u8),
            });
        }

        let blank = tiles.iter().position(|&t| t == 0).unwrap_or_default();
        Ok(Self { tiles, blank })
    }
}

impl TryFrom<[u8; TILES]> for State {
    type Error = Error;

    fn try_from(tiles: [u8; TILES]) -> Result<Self> {
        Self::validate(tiles, || {
            tiles.iter().map(|t| t.to_string()).collect::<String>()
        })
    }
}

impl FromStr for State {
    type Err = Error;

    /// Parses nine digits, ignoring any whitespace between them.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = |defect| Error::InvalidState {
            input: s.to_string(),
            defect,
        };

        let digits: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
        if digits.len() != TILES {
            return Err(invalid(StateDefect::WrongLength(digits.len())));
        }

        let mut tiles = [0u8; TILES];
        for (slot, &c) in tiles.iter_mut().zip(&digits) {
            match c.to_digit(10) {
                Some(d) if (d as usize) < TILES => *slot = d as u8,
                _ => return Err(invalid(StateDefect::BadCharacter(c))),
            }
        }

        Self::validate(tiles, || s.to_string())
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &tile in &self.tiles {
            write!(f, "{}", tile)?;
        }
        Ok(())
    }
}
