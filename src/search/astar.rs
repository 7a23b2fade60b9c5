use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};

use tracing::{debug, instrument, trace};

use super::{Arena, Counter, NodeBudget, NodeId, Outcome, Problem, SearchReport};
use crate::puzzle::State;

/// Best-first search on `f = g + h`.
///
/// The frontier may hold the same state several times at different
/// priorities; whichever copy is popped first is finalized and the rest are
/// dropped as stale. Equal priorities pop in canonical state order, then in
/// insertion order.
#[instrument(skip_all, fields(initial = %problem.initial, budget = %budget))]
pub fn astar(problem: &Problem, heuristic: fn(&State) -> u32, budget: NodeBudget) -> SearchReport {
    let mut arena = Arena::default();
    let mut frontier: BinaryHeap<Reverse<(u32, State, NodeId)>> = BinaryHeap::new();
    let mut closed: HashSet<State> = HashSet::new();
    let mut g_score: HashMap<State, u32> = HashMap::new();
    let mut counter = Counter::new(budget);

    let root = arena.root(problem.initial);
    g_score.insert(problem.initial, 0);
    frontier.push(Reverse((heuristic(&problem.initial), problem.initial, root)));

    while let Some(Reverse((f, state, id))) = frontier.pop() {
        if !closed.insert(state) {
            continue;
        }

        if !counter.consider() {
            debug!(considered = counter.considered, "node budget exceeded");
            return SearchReport::exceeded(&counter);
        }

        if problem.is_goal(&state) {
            let solution = arena.solution(id);
            debug!(
                considered = counter.considered,
                depth = solution.depth(),
                generated = arena.len(),
                "goal reached"
            );
            return SearchReport::finish(&counter, Outcome::Solved(solution));
        }

        let g = arena.get(id).path_cost;
        trace!(%state, f, g, "expanding");

        for (movement, child) in state.expand() {
            let tentative = g + 1;
            let improves = g_score
                .get(&child)
                .map_or(true, |&known| tentative < known);

            if improves {
                g_score.insert(child, tentative);
                let child_id = arena.child(id, movement, child);
                frontier.push(Reverse((tentative + heuristic(&child), child, child_id)));
            }
        }
    }

    debug!(considered = counter.considered, "frontier exhausted");
    SearchReport::finish(&counter, Outcome::FrontierExhausted)
}
