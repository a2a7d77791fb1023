//! The two-jug measuring puzzle.
//!
//! Fill, empty, or pour between a big and a small jug until the big jug
//! holds exactly the target volume. Every action costs one step; run with
//! `ZeroHeuristic`, the state space is tiny and no informative bound is
//! worth the trouble.

use std::cmp::min;

use crate::problem::SearchProblem;
use crate::problem::Successors;
use crate::space::Action;
use crate::space::State;

/// Litres currently in `(big, small)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct JugState {
    pub big: u8,
    pub small: u8,
}
impl State for JugState {}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum JugAction {
    FillBig,
    FillSmall,
    EmptyBig,
    EmptySmall,
    PourBigIntoSmall,
    PourSmallIntoBig,
}
impl Action for JugAction {}

pub type JugCost = u32;

/// Measure `target` litres into the big jug, starting from two empty jugs.
#[derive(Debug, Clone)]
pub struct WaterJugProblem {
    big_capacity: u8,
    small_capacity: u8,
    target: u8,
}

impl WaterJugProblem {
    pub fn new(big_capacity: u8, small_capacity: u8, target: u8) -> Self {
        debug_assert!(target <= big_capacity);
        Self {
            big_capacity,
            small_capacity,
            target,
        }
    }
}

impl SearchProblem<JugState, JugAction, JugCost> for WaterJugProblem {
    fn initial_state(&self) -> JugState {
        JugState { big: 0, small: 0 }
    }

    fn is_goal(&self, s: &JugState) -> bool {
        s.big == self.target
    }

    fn successors(&self, s: &JugState) -> Successors<JugState, JugAction, JugCost> {
        let &JugState { big, small } = s;
        let pour_to_small = min(big, self.small_capacity - small);
        let pour_to_big = min(small, self.big_capacity - big);

        // No-op actions (filling a full jug, pouring into a full one)
        // still appear here as unit-cost self-loops; the engine prunes
        // them against the already-finalized state.
        [
            (
                JugAction::FillBig,
                JugState {
                    big: self.big_capacity,
                    small,
                },
            ),
            (
                JugAction::FillSmall,
                JugState {
                    big,
                    small: self.small_capacity,
                },
            ),
            (JugAction::EmptyBig, JugState { big: 0, small }),
            (JugAction::EmptySmall, JugState { big, small: 0 }),
            (
                JugAction::PourBigIntoSmall,
                JugState {
                    big: big - pour_to_small,
                    small: small + pour_to_small,
                },
            ),
            (
                JugAction::PourSmallIntoBig,
                JugState {
                    big: big + pour_to_big,
                    small: small - pour_to_big,
                },
            ),
        ]
        .into_iter()
        .map(|(a, next)| (a, next, 1))
        .collect()
    }
}
