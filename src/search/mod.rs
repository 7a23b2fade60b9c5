//! Search over puzzle states: shared bookkeeping plus the two strategies.

mod astar;
mod beam;

use std::fmt;
use std::str::FromStr;

pub use astar::astar;
pub use beam::beam;

use crate::error::{Error, Result};
use crate::puzzle::{Move, State};

/// A start and a goal. The goal is a parameter even though the session
/// always asks for `012345678`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Problem {
    pub initial: State,
    pub goal: State,
}

impl Problem {
    pub fn new(initial: &str, goal: &str) -> Result<Self> {
        Ok(Self {
            initial: initial.parse()?,
            goal: goal.parse()?,
        })
    }

    pub fn from_states(initial: State, goal: State) -> Self {
        Self { initial, goal }
    }

    pub fn is_goal(&self, state: &State) -> bool {
        *state == self.goal
    }
}

/// Cap on how many distinct states a search may finalize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeBudget {
    #[default]
    Unbounded,
    Limited(usize),
}

impl fmt::Display for NodeBudget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeBudget::Unbounded => write!(f, "unbounded"),
            NodeBudget::Limited(n) => write!(f, "{}", n),
        }
    }
}

impl FromStr for NodeBudget {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidArgument {
            command: "maxNodes",
            value: s.to_string(),
        };

        match s.to_ascii_lowercase().as_str() {
            "unbounded" | "inf" | "infinity" => Ok(NodeBudget::Unbounded),
            n => match n.parse::<usize>() {
                Ok(0) | Err(_) => Err(invalid()),
                Ok(n) => Ok(NodeBudget::Limited(n)),
            },
        }
    }
}

/// Counts closed states against a [`NodeBudget`].
#[derive(Debug)]
struct Counter {
    budget: NodeBudget,
    considered: usize,
}

impl Counter {
    fn new(budget: NodeBudget) -> Self {
        Self {
            budget,
            considered: 0,
        }
    }

    /// Records one more finalized state, or returns `false` when the budget
    /// is already spent.
    fn consider(&mut self) -> bool {
        match self.budget {
            NodeBudget::Limited(limit) if self.considered >= limit => false,
            _ => {
                self.considered += 1;
                true
            }
        }
    }
}

pub type NodeId = usize;

/// A state reached during search, linked back to the node it came from.
#[derive(Debug, Clone)]
pub struct Node {
    pub state: State,
    pub parent: Option<NodeId>,
    pub incoming: Option<Move>,
    pub path_cost: u32,
}

/// Append-only storage for search nodes. Parents are referenced by index
/// and never change once a node is stored.
#[derive(Debug, Default)]
pub(crate) struct Arena {
    nodes: Vec<Node>,
}

impl Arena {
    fn root(&mut self, state: State) -> NodeId {
        self.push(Node {
            state,
            parent: None,
            incoming: None,
            path_cost: 0,
        })
    }

    fn child(&mut self, parent: NodeId, movement: Move, state: State) -> NodeId {
        let path_cost = self.nodes[parent].path_cost + 1;
        self.push(Node {
            state,
            parent: Some(parent),
            incoming: Some(movement),
            path_cost,
        })
    }

    fn push(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Walks parent links from `id` back to the root.
    fn solution(&self, id: NodeId) -> Solution {
        let mut blank_moves = Vec::new();
        let mut states = Vec::new();

        let mut current = Some(id);
        while let Some(node) = current.map(|id| self.get(id)) {
            states.push(node.state);
            if let Some(m) = node.incoming {
                blank_moves.push(m);
            }
            current = node.parent;
        }

        blank_moves.reverse();
        states.reverse();
        Solution {
            blank_moves,
            states,
        }
    }
}

/// A path from the initial state to the goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// How the blank moved, first move first.
    pub blank_moves: Vec<Move>,
    /// Every state on the path, initial and goal included.
    pub states: Vec<State>,
}

impl Solution {
    pub fn depth(&self) -> usize {
        self.blank_moves.len()
    }

    /// The direction the tile next to the blank slides at each step.
    pub fn tile_moves(&self) -> Vec<Move> {
        self.blank_moves.iter().map(Move::opposite).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Solved(Solution),
    /// The node budget ran out before the goal was finalized.
    BudgetExceeded { limit: usize },
    /// Nothing left to expand.
    FrontierExhausted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReport {
    pub nodes_considered: usize,
    pub outcome: Outcome,
}

impl SearchReport {
    fn finish(counter: &Counter, outcome: Outcome) -> Self {
        Self {
            nodes_considered: counter.considered,
            outcome,
        }
    }

    fn exceeded(counter: &Counter) -> Self {
        let limit = match counter.budget {
            NodeBudget::Limited(limit) => limit,
            NodeBudget::Unbounded => counter.considered,
        };
        Self::finish(counter, Outcome::BudgetExceeded { limit })
    }

    pub fn solution(&self) -> Option<&Solution> {
        match &self.outcome {
            Outcome::Solved(solution) => Some(solution),
            _ => None,
        }
    }

    pub fn is_failure(&self) -> bool {
        self.solution().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_parsing() {
        assert_eq!("unbounded".parse::<NodeBudget>().unwrap(), NodeBudget::Unbounded);
        assert_eq!("Unbounded".parse::<NodeBudget>().unwrap(), NodeBudget::Unbounded);
        assert_eq!("250".parse::<NodeBudget>().unwrap(), NodeBudget::Limited(250));
        assert!("0".parse::<NodeBudget>().is_err());
        assert!("-3".parse::<NodeBudget>().is_err());
        assert!("lots".parse::<NodeBudget>().is_err());
    }

    #[test]
    fn test_counter_stops_at_limit() {
        let mut counter = Counter::new(NodeBudget::Limited(2));
        assert!(counter.consider());
        assert!(counter.consider());
        assert!(!counter.consider());
        assert_eq!(counter.considered, 2);

        let mut unbounded = Counter::new(NodeBudget::Unbounded);
        for _ in 0..1000 {
            assert!(unbounded.consider());
        }
    }

    #[test]
    fn test_solution_walks_back_to_root() {
        let start: State = "312045678".parse().unwrap();
        let mut arena = Arena::default();
        let root = arena.root(start);

        let a = start.apply_move(Move::Right).unwrap();
        let a_id = arena.child(root, Move::Right, a);
        let b = a.apply_move(Move::Up).unwrap();
        let b_id = arena.child(a_id, Move::Up, b);

        let solution = arena.solution(b_id);
        assert_eq!(solution.blank_moves, vec![Move::Right, Move::Up]);
        assert_eq!(solution.tile_moves(), vec![Move::Left, Move::Down]);
        assert_eq!(solution.states, vec![start, a, b]);
        assert_eq!(solution.depth(), 2);
        assert_eq!(arena.get(b_id).path_cost, 2);
    }

    #[test]
    fn test_root_solution_is_empty() {
        let mut arena = Arena::default();
        let root = arena.root(State::goal());
        let solution = arena.solution(root);
        assert_eq!(solution.depth(), 0);
        assert_eq!(solution.states, vec![State::goal()]);
    }

    #[test]
    fn test_problem_from_strings() {
        let problem = Problem::new("312045678", "012345678").unwrap();
        assert!(problem.is_goal(&State::goal()));
        assert!(!problem.is_goal(&problem.initial));
        assert!(Problem::new("312045678", "0123").is_err());
    }
}
