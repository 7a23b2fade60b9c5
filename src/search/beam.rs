use std::collections::HashSet;

use tracing::{debug, instrument, trace};

use super::{Arena, Counter, NodeBudget, NodeId, Outcome, Problem, SearchReport};
use crate::puzzle::{Move, State};

/// A successor waiting for selection: its score, the state, and how it was
/// reached.
type Candidate = (u32, State, NodeId, Move);

/// Generation-by-generation search that keeps only the `width` successors
/// with the lowest heuristic score.
///
/// Pruned successors are never revisited, so this can fail on solvable
/// boards and its paths are not guaranteed to be shortest.
#[instrument(skip_all, fields(initial = %problem.initial, width = width, budget = %budget))]
pub fn beam(
    problem: &Problem,
    heuristic: fn(&State) -> u32,
    width: usize,
    budget: NodeBudget,
) -> SearchReport {
    let mut arena = Arena::default();
    let mut closed: HashSet<State> = HashSet::new();
    let mut counter = Counter::new(budget);

    let mut frontier: Vec<NodeId> = vec![arena.root(problem.initial)];
    let mut generation = 0usize;

    while !frontier.is_empty() {
        let mut pool: Vec<Candidate> = Vec::new();

        for &id in &frontier {
            let state = arena.get(id).state;
            if !closed.insert(state) {
                continue;
            }

            if !counter.consider() {
                debug!(considered = counter.considered, generation, "node budget exceeded");
                return SearchReport::exceeded(&counter);
            }

            if problem.is_goal(&state) {
                let solution = arena.solution(id);
                debug!(
                    considered = counter.considered,
                    depth = solution.depth(),
                    generation,
                    "goal reached"
                );
                return SearchReport::finish(&counter, Outcome::Solved(solution));
            }

            pool.extend(
                state
                    .expand()
                    .into_iter()
                    .map(|(movement, child)| (heuristic(&child), child, id, movement)),
            );
        }

        // Lowest score first, then canonical state order.
        pool.sort_unstable();
        pool.truncate(width);
        trace!(generation, kept = pool.len(), "selected successors");

        frontier = pool
            .into_iter()
            .map(|(_, child, parent, movement)| arena.child(parent, movement, child))
            .collect();
        generation += 1;
    }

    debug!(considered = counter.considered, generation, "frontier exhausted");
    SearchReport::finish(&counter, Outcome::FrontierExhausted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristic::{manhattan_distance, misplaced_tiles};
    use crate::search::astar;

    fn problem(initial: &str) -> Problem {
        Problem::new(initial, "012345678").unwrap()
    }

    #[test]
    fn test_start_at_goal() {
        let report = beam(&problem("012345678"), manhattan_distance, 1, NodeBudget::Unbounded);
        assert_eq!(report.nodes_considered, 1);
        assert_eq!(report.solution().unwrap().depth(), 0);
    }

    #[test]
    fn test_greedy_single_move() {
        let report = beam(&problem("312045678"), manhattan_distance, 1, NodeBudget::Unbounded);
        let solution = report.solution().unwrap();
        assert_eq!(solution.blank_moves, vec![Move::Up]);
        assert_eq!(solution.tile_moves(), vec![Move::Down]);
        assert_eq!(report.nodes_considered, 2);
    }

    #[test]
    fn test_wide_beam_is_breadth_first() {
        // A beam wider than any generation keeps everything, so it finds the
        // shortest path just like A* does.
        for initial in ["142305678", "142358607", "312475680", "125340678"] {
            let p = problem(initial);
            let optimal = astar(&p, manhattan_distance, NodeBudget::Unbounded);
            let wide = beam(&p, manhattan_distance, 100_000, NodeBudget::Unbounded);
            assert_eq!(
                wide.solution().map(|s| s.depth()),
                optimal.solution().map(|s| s.depth()),
                "initial {initial}"
            );
        }
    }

    #[test]
    fn test_never_shorter_than_astar() {
        let initials = ["142305678", "142358607", "312475680", "125340678", "806547231"];
        for initial in initials {
            let p = problem(initial);
            let optimal = astar(&p, manhattan_distance, NodeBudget::Unbounded)
                .solution()
                .map(|s| s.depth())
                .unwrap();

            for width in [1, 2, 5, 15, 75] {
                for h in [misplaced_tiles as fn(&State) -> u32, manhattan_distance] {
                    let report = beam(&p, h, width, NodeBudget::Unbounded);
                    if let Some(solution) = report.solution() {
                        assert!(solution.depth() >= optimal);
                        let end = solution
                            .blank_moves
                            .iter()
                            .fold(p.initial, |s, &m| s.apply_move(m).unwrap());
                        assert_eq!(end, State::goal());
                    }
                }
            }
        }
    }

    #[test]
    fn test_equal_scores_keep_lowest_state() {
        // From 806547231 moving the blank left or right both score 7 under
        // h1; a width of one keeps 086547231 and drops 860547231.
        let start: State = "806547231".parse().unwrap();
        let kept: State = "086547231".parse().unwrap();
        let dropped: State = "860547231".parse().unwrap();
        assert_eq!(misplaced_tiles(&kept), misplaced_tiles(&dropped));

        let report = beam(
            &Problem::from_states(start, kept),
            misplaced_tiles,
            1,
            NodeBudget::Unbounded,
        );
        let solution = report.solution().unwrap();
        assert_eq!(solution.blank_moves, vec![Move::Left]);
        assert_eq!(solution.states, vec![start, kept]);
        assert_eq!(report.nodes_considered, 2);

        let report = beam(
            &Problem::from_states(start, dropped),
            misplaced_tiles,
            1,
            NodeBudget::Unbounded,
        );
        assert_eq!(report.outcome, Outcome::FrontierExhausted);
        assert_eq!(report.nodes_considered, 3);
    }

    #[test]
    fn test_budget_exceeded() {
        let report = beam(&problem("142358607"), manhattan_distance, 3, NodeBudget::Limited(2));
        assert_eq!(report.nodes_considered, 2);
        assert_eq!(report.outcome, Outcome::BudgetExceeded { limit: 2 });
    }

    #[test]
    fn test_unsolvable_board_fails() {
        let report = beam(&problem("021345678"), manhattan_distance, 4, NodeBudget::Unbounded);
        assert!(report.is_failure());
        assert_eq!(report.outcome, Outcome::FrontierExhausted);
    }
}
