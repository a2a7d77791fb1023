//! The generalized best-first search loop.
//!
//! One engine covers the informed-search family: with an admissible
//! heuristic it is A*, with the zero heuristic it degenerates to
//! uniform-cost (Dijkstra) search. The loop is iterative with an explicit
//! frontier; there is no recursion to blow the stack on deep state spaces.

use std::fmt::Debug;
use std::marker::PhantomData;

use log::debug;
use log::trace;
use thiserror::Error;

use crate::cost::Cost;
use crate::explored::ExploredSet;
use crate::frontier::Frontier;
use crate::node::SearchTree;
use crate::problem::Heuristic;
use crate::problem::SearchProblem;
use crate::space::Action;
use crate::space::Path;
use crate::space::State;

/// Engine lifecycle. `run()` drives `Ready` through `Running` into one of
/// the two terminal states.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Ready,
    Running,
    Succeeded,
    Failed,
}

/// A successful search: the optimal path plus how much work it took.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResult<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    pub path: Path<St, A, C>,
    /// States expanded (successor generations), not states generated.
    pub nodes_expanded: usize,
}

impl<St, A, C> PathResult<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    #[inline(always)]
    pub fn total_cost(&self) -> C {
        self.path.cost
    }
}

/// Why a search ended without a path.
///
/// These are ordinary negative results returned as values, never panics.
/// A budgeted run that gave up and a genuinely unreachable goal stay
/// distinguishable for the caller.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SearchFailure {
    /// The frontier drained without reaching a goal state.
    #[error("goal unreachable; exhausted {nodes_expanded} reachable states")]
    Unreachable { nodes_expanded: usize },

    /// The caller-imposed expansion budget ran out first.
    #[error("expansion budget of {budget} states exhausted")]
    BudgetExhausted { budget: usize, nodes_expanded: usize },

    /// The adapter broke its contract; failing fast beats looping forever.
    #[error("invalid adapter: {0}")]
    InvalidAdapter(String),
}

/// Best-first search over one problem instance.
///
/// Owns its frontier and explored set exclusively; running two searches
/// at once means two engines with nothing shared. Single-threaded and
/// synchronous throughout.
#[derive(Debug)]
pub struct BestFirstSearch<P, H, St, A, C>
where
    P: SearchProblem<St, A, C>,
    H: Heuristic<P, St, A, C>,
    St: State,
    A: Action,
    C: Cost,
{
    problem: P,

    /// Every node ever generated, holding the parent links paths are
    /// rebuilt from.
    tree: SearchTree<St, A, C>,
    /// Open entries ranked by `(f, insertion sequence)`.
    frontier: Frontier<C>,
    /// Best-known `g` per state plus the finalized flag.
    explored: ExploredSet<St, C>,

    status: Status,
    nodes_expanded: usize,
    budget: Option<usize>,
    /// Terminal result, kept so repeated `run()` calls answer identically.
    outcome: Option<Result<PathResult<St, A, C>, SearchFailure>>,

    _phantom_heuristic: PhantomData<H>,
    _phantom_action: PhantomData<A>,
}

impl<P, H, St, A, C> BestFirstSearch<P, H, St, A, C>
where
    P: SearchProblem<St, A, C>,
    H: Heuristic<P, St, A, C>,
    St: State,
    A: Action,
    C: Cost,
{
    #[must_use]
    pub fn new(problem: P) -> Self {
        let mut search = Self {
            problem,
            tree: SearchTree::new(),
            frontier: Frontier::new(),
            explored: ExploredSet::new(),
            status: Status::Ready,
            nodes_expanded: 0,
            budget: None,
            outcome: None,
            _phantom_heuristic: PhantomData,
            _phantom_action: PhantomData,
        };

        let root = search.problem.initial_state();
        let g = C::zero();
        let h = H::h(&search.problem, &root);
        let root_id = search.tree.push(root, None, g);
        search.explored.record(root, g);
        search.frontier.push(g.saturating_add(&h), root_id);

        search
    }

    /// Caps the number of expansions; exhausting the cap fails the search
    /// with `BudgetExhausted` instead of running an unbounded domain dry.
    #[must_use]
    pub fn with_budget(mut self, max_expansions: usize) -> Self {
        self.budget = Some(max_expansions);
        self
    }

    /// Runs the search to a terminal state and returns the outcome.
    ///
    /// Terminal outcomes are sticky: calling `run()` again returns the
    /// same answer without re-searching.
    pub fn run(&mut self) -> Result<PathResult<St, A, C>, SearchFailure> {
        if let Some(outcome) = &self.outcome {
            return outcome.clone();
        }

        self.status = Status::Running;
        debug!("search started: {:?}", self.problem);

        let outcome = self.run_loop();
        self.status = match outcome {
            Ok(_) => Status::Succeeded,
            Err(_) => Status::Failed,
        };
        self.outcome = Some(outcome.clone());
        outcome
    }

    fn run_loop(&mut self) -> Result<PathResult<St, A, C>, SearchFailure> {
        while let Some(entry) = self.frontier.pop_min() {
            let node_id = entry.node_id;
            let state = *self.tree[node_id].state();
            let g = self.tree[node_id].g();

            // Stale entry: the state was finalized through a route at
            // least as cheap while this entry sat queued.
            if self.explored.is_finalized(&state) {
                if self.explored.best_g(&state).is_some_and(|best| g < best) {
                    // Only possible with an inconsistent heuristic. The
                    // state stays closed; the result may be suboptimal.
                    trace!("ignoring cheaper late route to finalized {state:?}");
                }
                continue;
            }

            self.explored.finalize(state, g);

            if self.problem.is_goal(&state) {
                let path = self.tree.path(node_id);
                debug!(
                    "goal reached: cost {}, {} expanded, {} generated",
                    path.cost,
                    self.nodes_expanded,
                    self.tree.len(),
                );
                return Ok(PathResult {
                    path,
                    nodes_expanded: self.nodes_expanded,
                });
            }

            if let Some(budget) = self.budget
                && self.nodes_expanded >= budget
            {
                debug!("budget of {budget} expansions exhausted");
                return Err(SearchFailure::BudgetExhausted {
                    budget,
                    nodes_expanded: self.nodes_expanded,
                });
            }

            self.nodes_expanded += 1;
            trace!("expanding {state:?} (g={g})");

            for (a, next, c) in self.problem.successors(&state) {
                if c <= C::zero() || !c.valid() {
                    return Err(SearchFailure::InvalidAdapter(format!(
                        "edge cost {c} for action {a:?} out of {state:?} is not strictly positive"
                    )));
                }

                if self.explored.is_finalized(&next) {
                    continue;
                }

                let tentative_g = g.saturating_add(&c);
                if let Some(best) = self.explored.best_g(&next)
                    && tentative_g >= best
                {
                    continue;
                }

                // First sighting, or a strictly better route to a queued
                // state. No decrease-key: the old entry goes stale and is
                // dropped when popped.
                self.explored.record(next, tentative_g);
                let child = self.tree.push(next, Some((node_id, a)), tentative_g);
                let h = H::h(&self.problem, &next);
                self.frontier.push(tentative_g.saturating_add(&h), child);
            }
        }

        debug!(
            "frontier exhausted after {} expansions, no goal",
            self.nodes_expanded
        );
        Err(SearchFailure::Unreachable {
            nodes_expanded: self.nodes_expanded,
        })
    }

    // Read-only diagnostics, meant to be taken after `run()` settles.

    #[inline(always)]
    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    #[inline(always)]
    #[must_use]
    pub fn nodes_expanded(&self) -> usize {
        self.nodes_expanded
    }

    /// Nodes generated, including stale duplicates.
    #[inline(always)]
    #[must_use]
    pub fn nodes_generated(&self) -> usize {
        self.tree.len()
    }

    /// Finalized states with their confirmed optimal costs.
    pub fn finalized(&self) -> impl Iterator<Item = (&St, C)> {
        self.explored.finalized()
    }

    /// The parent-link graph, for external rendering of search trees.
    #[inline(always)]
    #[must_use]
    pub fn tree(&self) -> &SearchTree<St, A, C> {
        &self.tree
    }

    #[inline(always)]
    #[must_use]
    pub fn problem(&self) -> &P {
        &self.problem
    }

    pub fn write_memory_stats<W: std::io::Write>(&self, mut out: W) -> std::io::Result<()> {
        use crate::node::SearchNode;
        use std::mem::size_of;

        writeln!(out, "BestFirstSearch Stats:")?;
        let s = size_of::<SearchNode<St, A, C>>();
        let l = self.tree.len();
        writeln!(out, "  - |Nodes|:    {} ({}B)", l, l * s)?;

        let l = self.frontier.len();
        writeln!(out, "  - |Open|:     {}", l)?;

        let l = self.explored.len();
        writeln!(out, "  - |Explored|: {}", l)?;

        writeln!(out, "  - Expanded nodes: {}", self.nodes_expanded)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::Successors;
    use crate::problem::ZeroHeuristic;
    use std::cell::Cell;

    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    struct V(u8);
    impl State for V {}

    /// Action label: the vertex driven to.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    struct Hop(u8);
    impl Action for Hop {}

    #[derive(Debug)]
    struct Graph {
        /// `edges[v]` lists `(to, cost)` pairs, in a fixed order.
        edges: Vec<Vec<(u8, u32)>>,
        start: u8,
        goals: Vec<u8>,
        expansions: Cell<usize>,
    }

    impl Graph {
        fn new(edges: Vec<Vec<(u8, u32)>>, start: u8, goals: Vec<u8>) -> Self {
            Self {
                edges,
                start,
                goals,
                expansions: Cell::new(0),
            }
        }

        /// Min cost from `v` to any goal over all simple paths. Exponential
        /// reference oracle for the optimality tests.
        fn brute_force(&self, v: u8, visited: &mut Vec<u8>) -> Option<u32> {
            if self.goals.contains(&v) {
                return Some(0);
            }
            visited.push(v);
            let mut best: Option<u32> = None;
            for &(to, c) in &self.edges[v as usize] {
                if visited.contains(&to) {
                    continue;
                }
                if let Some(rest) = self.brute_force(to, visited) {
                    let total = c + rest;
                    best = Some(best.map_or(total, |b| b.min(total)));
                }
            }
            visited.pop();
            best
        }
    }

    impl SearchProblem<V, Hop, u32> for Graph {
        fn initial_state(&self) -> V {
            V(self.start)
        }
        fn is_goal(&self, s: &V) -> bool {
            self.goals.contains(&s.0)
        }
        fn successors(&self, s: &V) -> Successors<V, Hop, u32> {
            self.expansions.set(self.expansions.get() + 1);
            self.edges[s.0 as usize]
                .iter()
                .map(|&(to, c)| (Hop(to), V(to), c))
                .collect()
        }
    }

    /// Wildly overestimates vertex 1. Admissibility is the caller's
    /// precondition; the engine must still terminate without it.
    #[derive(Debug)]
    struct Inadmissible;
    impl Heuristic<Graph, V, Hop, u32> for Inadmissible {
        fn h(_p: &Graph, s: &V) -> u32 {
            if s.0 == 1 { 1_000 } else { 0 }
        }
    }

    /// A 6-vertex weighted graph with a tempting direct edge that loses
    /// to a longer-but-cheaper detour, plus a cycle.
    fn tangled_graph() -> Graph {
        Graph::new(
            vec![
                /* 0 */ vec![(1, 2), (2, 9), (3, 1)],
                /* 1 */ vec![(2, 4), (0, 2)],
                /* 2 */ vec![(5, 1)],
                /* 3 */ vec![(4, 1), (0, 1)],
                /* 4 */ vec![(2, 1), (1, 1)],
                /* 5 */ vec![],
            ],
            0,
            vec![5],
        )
    }

    #[test]
    fn optimality_matches_brute_force() {
        let graph = tangled_graph();
        let expected = graph.brute_force(0, &mut vec![]).unwrap();

        let mut search = BestFirstSearch::<_, ZeroHeuristic, _, _, _>::new(graph);
        let result = search.run().unwrap();
        assert_eq!(result.total_cost(), expected);
        assert_eq!(result.total_cost(), 4); // 0 -> 3 -> 4 -> 2 -> 5
        assert_eq!(search.status(), Status::Succeeded);
    }

    #[test]
    fn deterministic_across_runs() {
        let run = || {
            let mut search = BestFirstSearch::<_, ZeroHeuristic, _, _, _>::new(tangled_graph());
            search.run().unwrap()
        };
        let first = run();
        let second = run();
        assert_eq!(first.path, second.path);
        assert_eq!(first.nodes_expanded, second.nodes_expanded);
    }

    #[test]
    fn rerun_returns_same_outcome() {
        let mut search = BestFirstSearch::<_, ZeroHeuristic, _, _, _>::new(tangled_graph());
        let first = search.run();
        let again = search.run();
        assert_eq!(first, again);
    }

    #[test]
    fn dijkstra_reduction_on_weighted_chain() {
        // 0 -1-> 1 -1-> 2, plus a 5-cost shortcut 0 -> 2.
        let graph = Graph::new(
            vec![vec![(1, 1), (2, 5)], vec![(2, 1)], vec![]],
            0,
            vec![2],
        );
        let mut search = BestFirstSearch::<_, ZeroHeuristic, _, _, _>::new(graph);
        let result = search.run().unwrap();
        assert_eq!(result.total_cost(), 2);
        assert_eq!(
            result.path.states().copied().collect::<Vec<_>>(),
            [V(0), V(1), V(2)]
        );
    }

    #[test]
    fn unreachable_goal_exhausts_reachable_component() {
        // 0 <-> 1 -> 2; vertex 3 is the goal and disconnected.
        let graph = Graph::new(
            vec![vec![(1, 1)], vec![(0, 1), (2, 1)], vec![], vec![]],
            0,
            vec![3],
        );
        let mut search = BestFirstSearch::<_, ZeroHeuristic, _, _, _>::new(graph);
        let failure = search.run().unwrap_err();
        assert_eq!(failure, SearchFailure::Unreachable { nodes_expanded: 3 });
        assert_eq!(search.status(), Status::Failed);
        assert_eq!(search.finalized().count(), 3);
    }

    #[test]
    fn no_state_expanded_twice() {
        let graph = tangled_graph();
        let reachable = graph.edges.len(); // all 6 vertices reachable
        let mut search = BestFirstSearch::<_, ZeroHeuristic, _, _, _>::new(graph);
        let result = search.run().unwrap();
        assert!(result.nodes_expanded <= reachable);
        assert_eq!(search.problem().expansions.get(), result.nodes_expanded);
    }

    #[test]
    fn unreachable_goal_expands_each_state_once() {
        let graph = Graph::new(
            vec![vec![(1, 1)], vec![(0, 1), (2, 3)], vec![(1, 1)], vec![]],
            0,
            vec![3],
        );
        let mut search = BestFirstSearch::<_, ZeroHeuristic, _, _, _>::new(graph);
        let failure = search.run().unwrap_err();
        assert_eq!(failure, SearchFailure::Unreachable { nodes_expanded: 3 });
        assert_eq!(search.problem().expansions.get(), 3);
    }

    #[test]
    fn budget_exhaustion_is_not_unreachable() {
        let graph = Graph::new(
            vec![vec![(1, 1)], vec![(2, 1)], vec![(3, 1)], vec![]],
            0,
            vec![3],
        );
        let mut search =
            BestFirstSearch::<_, ZeroHeuristic, _, _, _>::new(graph).with_budget(1);
        let failure = search.run().unwrap_err();
        assert_eq!(
            failure,
            SearchFailure::BudgetExhausted {
                budget: 1,
                nodes_expanded: 1
            }
        );
    }

    #[test]
    fn zero_cost_edge_fails_fast() {
        let graph = Graph::new(vec![vec![(1, 0)], vec![]], 0, vec![1]);
        let mut search = BestFirstSearch::<_, ZeroHeuristic, _, _, _>::new(graph);
        match search.run() {
            Err(SearchFailure::InvalidAdapter(_)) => {}
            other => panic!("expected InvalidAdapter, got {other:?}"),
        }
    }

    #[test]
    fn start_is_goal() {
        let graph = Graph::new(vec![vec![(1, 1)], vec![]], 0, vec![0]);
        let mut search = BestFirstSearch::<_, ZeroHeuristic, _, _, _>::new(graph);
        let result = search.run().unwrap();
        assert!(result.path.is_empty());
        assert_eq!(result.total_cost(), 0);
        assert_eq!(result.nodes_expanded, 0);
    }

    #[test]
    fn self_loops_are_pruned_not_fatal() {
        let graph = Graph::new(vec![vec![(0, 1), (1, 1)], vec![]], 0, vec![1]);
        let mut search = BestFirstSearch::<_, ZeroHeuristic, _, _, _>::new(graph);
        let result = search.run().unwrap();
        assert_eq!(result.total_cost(), 1);
    }

    #[test]
    fn inadmissible_heuristic_still_terminates() {
        let graph = tangled_graph();
        let mut search = BestFirstSearch::<_, Inadmissible, _, _, _>::new(graph);
        // Optimality is forfeit, termination and *some* valid path are not.
        let result = search.run().unwrap();
        assert!(!result.path.is_empty());
        assert_eq!(*result.path.end(), V(5));
    }

    #[test]
    fn stale_entries_are_discarded_lazily() {
        // Vertex 2 is first queued via the 9-cost edge, then improved to 3
        // before it is ever popped. The stale queue entry must not cause a
        // second expansion.
        let graph = Graph::new(
            vec![vec![(2, 9), (1, 1)], vec![(2, 2)], vec![(3, 1)], vec![]],
            0,
            vec![3],
        );
        let mut search = BestFirstSearch::<_, ZeroHeuristic, _, _, _>::new(graph);
        let result = search.run().unwrap();
        assert_eq!(result.total_cost(), 4);
        assert_eq!(search.problem().expansions.get(), result.nodes_expanded);
        assert!(search.nodes_generated() >= search.finalized().count());
    }
}
