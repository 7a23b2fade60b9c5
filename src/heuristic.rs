//! Distance-to-goal estimates for the canonical goal `012345678`.
//!
//! A tile's value doubles as the index of its goal position, so neither
//! function needs to look at a goal state. The blank is never scored: a
//! single move shifts both the blank and one tile, and counting both would
//! overestimate the remaining distance.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::puzzle::{State, SIZE};

/// Number of tiles that are not on their goal position.
pub fn misplaced_tiles(state: &State) -> u32 {
    state
        .tiles()
        .iter()
        .enumerate()
        .filter(|&(i, &value)| value != 0 && value as usize != i)
        .count() as u32
}

/// Sum of row and column distances of every tile from its goal position.
pub fn manhattan_distance(state: &State) -> u32 {
    state
        .tiles()
        .iter()
        .enumerate()
        .filter(|&(_, &value)| value != 0)
        .map(|(i, &value)| {
            let value = value as usize;
            (i / SIZE).abs_diff(value / SIZE) + (i % SIZE).abs_diff(value % SIZE)
        })
        .sum::<usize>() as u32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heuristic {
    /// `h1`
    MisplacedTiles,
    /// `h2`
    ManhattanDistance,
}

impl Heuristic {
    pub fn function(self) -> fn(&State) -> u32 {
        match self {
            Heuristic::MisplacedTiles => misplaced_tiles,
            Heuristic::ManhattanDistance => manhattan_distance,
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Heuristic::MisplacedTiles => write!(f, "h1"),
            Heuristic::ManhattanDistance => write!(f, "h2"),
        }
    }
}

impl FromStr for Heuristic {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s.to_ascii_lowercase().as_str() {
            "h1" => Ok(Heuristic::MisplacedTiles),
            "h2" => Ok(Heuristic::ManhattanDistance),
            _ => Err(Error::UnrecognizedHeuristic(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(s: &str) -> State {
        s.parse().unwrap()
    }

    #[test]
    fn test_goal_scores_zero() {
        assert_eq!(misplaced_tiles(&State::goal()), 0);
        assert_eq!(manhattan_distance(&State::goal()), 0);
    }

    #[test]
    fn test_one_move_from_goal() {
        let s = state("102345678");
        assert_eq!(misplaced_tiles(&s), 1);
        assert_eq!(manhattan_distance(&s), 1);
    }

    #[test]
    fn test_reversed_board() {
        let s = state("876543210");
        assert_eq!(misplaced_tiles(&s), 7);
        // Every tile except the center travels to the mirrored cell.
        assert_eq!(manhattan_distance(&s), 20);
    }

    #[test]
    fn test_nonzero_away_from_goal() {
        let mut s = State::goal();
        for m in [
            crate::puzzle::Move::Right,
            crate::puzzle::Move::Down,
            crate::puzzle::Move::Left,
        ] {
            s = s.apply_move(m).unwrap();
            assert!(misplaced_tiles(&s) > 0);
            assert!(manhattan_distance(&s) >= misplaced_tiles(&s));
        }
    }

    #[test]
    fn test_never_overestimates_one_move() {
        let goal = State::goal();
        for (_, s) in goal.expand() {
            assert_eq!(misplaced_tiles(&s), 1);
            assert_eq!(manhattan_distance(&s), 1);
        }
    }

    #[test]
    fn test_parse_heuristic_ids() {
        assert_eq!("h1".parse::<Heuristic>().unwrap(), Heuristic::MisplacedTiles);
        assert_eq!("H2".parse::<Heuristic>().unwrap(), Heuristic::ManhattanDistance);
        assert!(matches!(
            "h3".parse::<Heuristic>(),
            Err(Error::UnrecognizedHeuristic(id)) if id == "h3"
        ));
    }
}
