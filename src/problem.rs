//! The capability interface a domain supplies to the engine.
//!
//! A problem describes states, legal transitions and the goal test; a
//! heuristic estimates remaining cost. Both must be pure and deterministic:
//! identical input yields identical, identically-ordered output, which is
//! what makes tie-break order (and thus whole searches) reproducible.

use smallvec::SmallVec;

use crate::cost::Cost;
use crate::space::Action;
use crate::space::State;

/// Successor edges of one expansion: `(action, next_state, edge_cost)`.
///
/// Most domains branch a handful of ways (4 grid moves, 6 jug actions), so
/// expansions stay on the stack.
pub type Successors<St, A, C> = SmallVec<[(A, St, C); 8]>;

/// A single-agent shortest-path problem.
///
/// Edge costs must be strictly positive; the engine rejects zero-cost
/// edges rather than risk a silent infinite loop. Self-transitions with
/// positive cost are fine, they lose to the already-finalized state.
pub trait SearchProblem<St, A, C>: std::fmt::Debug
where
    St: State,
    A: Action,
    C: Cost,
{
    fn initial_state(&self) -> St;
    fn is_goal(&self, s: &St) -> bool;
    fn successors(&self, s: &St) -> Successors<St, A, C>;
}

/// A cost-to-go estimate.
///
/// For the engine's optimality guarantee `h` must be admissible: it never
/// overestimates the true remaining cost, and `h(goal) = 0`. A consistent
/// `h` additionally guarantees no state is popped twice with a better cost.
/// Neither property is checked at runtime; violating admissibility
/// degrades the result to a (still terminating) suboptimal search.
pub trait Heuristic<P, St, A, C>: std::fmt::Debug
where
    P: SearchProblem<St, A, C>,
    St: State,
    A: Action,
    C: Cost,
{
    fn h(_p: &P, _s: &St) -> C {
        C::zero()
    }
}

/// `h = 0` everywhere. Turns the engine into uniform-cost (Dijkstra)
/// search.
#[derive(Debug)]
pub struct ZeroHeuristic;

impl<P, St, A, C> Heuristic<P, St, A, C> for ZeroHeuristic
where
    P: SearchProblem<St, A, C>,
    St: State,
    A: Action,
    C: Cost,
{
}
