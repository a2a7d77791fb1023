//! The classic 3x3 sliding-tile puzzle (8-puzzle).

use thiserror::Error;

use crate::problem::Heuristic;
use crate::problem::SearchProblem;
use crate::problem::Successors;
use crate::space::Action;
use crate::space::State;

pub const SIDE: usize = 3;
pub const TILES: usize = SIDE * SIDE;

/// Row-major tile labels, `0` marking the blank.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PuzzleState {
    tiles: [u8; TILES],
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PuzzleStateError {
    #[error("Board is not a permutation of 0..9")]
    NotAPermutation,
}

impl PuzzleState {
    /// Builds a board, checking that every tile label appears exactly once.
    pub fn new(tiles: [u8; TILES]) -> Result<Self, PuzzleStateError> {
        let mut seen = [false; TILES];
        for &t in &tiles {
            if (t as usize) >= TILES || seen[t as usize] {
                return Err(PuzzleStateError::NotAPermutation);
            }
            seen[t as usize] = true;
        }
        Ok(Self { tiles })
    }

    #[inline(always)]
    pub fn tiles(&self) -> &[u8; TILES] {
        &self.tiles
    }

    #[inline(always)]
    fn blank_index(&self) -> usize {
        self.tiles.iter().position(|&t| t == 0).unwrap_or(0)
    }

    #[inline(always)]
    fn with_swapped(&self, i: usize, j: usize) -> Self {
        let mut tiles = self.tiles;
        tiles.swap(i, j);
        Self { tiles }
    }
}

impl State for PuzzleState {}

impl std::fmt::Display for PuzzleState {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for row in self.tiles.chunks(SIDE) {
            for &t in row {
                if t == 0 {
                    write!(f, " .")?;
                } else {
                    write!(f, " {t}")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// The direction the blank slides.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PuzzleAction {
    Up,
    Down,
    Left,
    Right,
}
impl Action for PuzzleAction {}

pub type PuzzleCost = u32;

/// Reach `goal` from `start`, one slide at a time.
#[derive(Debug, Clone)]
pub struct PuzzleProblem {
    start: PuzzleState,
    goal: PuzzleState,
    /// Index of each tile label in the goal board, for the Manhattan
    /// heuristic.
    goal_index: [u8; TILES],
}

impl PuzzleProblem {
    pub fn new(start: PuzzleState, goal: PuzzleState) -> Self {
        let mut goal_index = [0u8; TILES];
        for (i, &t) in goal.tiles().iter().enumerate() {
            goal_index[t as usize] = i as u8;
        }
        Self {
            start,
            goal,
            goal_index,
        }
    }

    pub fn goal(&self) -> &PuzzleState {
        &self.goal
    }
}

impl SearchProblem<PuzzleState, PuzzleAction, PuzzleCost> for PuzzleProblem {
    fn initial_state(&self) -> PuzzleState {
        self.start
    }

    fn is_goal(&self, s: &PuzzleState) -> bool {
        *s == self.goal
    }

    fn successors(&self, s: &PuzzleState) -> Successors<PuzzleState, PuzzleAction, PuzzleCost> {
        let blank = s.blank_index();
        let (row, col) = (blank / SIDE, blank % SIDE);

        let mut v = Successors::new();
        if row > 0 {
            v.push((PuzzleAction::Up, s.with_swapped(blank, blank - SIDE), 1));
        }
        if row + 1 < SIDE {
            v.push((PuzzleAction::Down, s.with_swapped(blank, blank + SIDE), 1));
        }
        if col > 0 {
            v.push((PuzzleAction::Left, s.with_swapped(blank, blank - 1), 1));
        }
        if col + 1 < SIDE {
            v.push((PuzzleAction::Right, s.with_swapped(blank, blank + 1), 1));
        }
        v
    }
}

/// Sum over tiles of the Manhattan distance to each tile's goal cell.
/// The stronger of the two classic 8-puzzle bounds.
#[derive(Debug)]
pub struct PuzzleHeuristicManhattan;

impl Heuristic<PuzzleProblem, PuzzleState, PuzzleAction, PuzzleCost> for PuzzleHeuristicManhattan {
    fn h(p: &PuzzleProblem, s: &PuzzleState) -> PuzzleCost {
        let mut distance = 0u32;
        for (i, &t) in s.tiles().iter().enumerate() {
            if t == 0 {
                continue;
            }
            let g = p.goal_index[t as usize] as usize;
            let (row, col) = (i / SIDE, i % SIDE);
            let (goal_row, goal_col) = (g / SIDE, g % SIDE);
            distance += row.abs_diff(goal_row) as u32 + col.abs_diff(goal_col) as u32;
        }
        distance
    }
}

/// Count of tiles out of place. Admissible but weaker than Manhattan.
#[derive(Debug)]
pub struct PuzzleHeuristicMisplaced;

impl Heuristic<PuzzleProblem, PuzzleState, PuzzleAction, PuzzleCost> for PuzzleHeuristicMisplaced {
    fn h(p: &PuzzleProblem, s: &PuzzleState) -> PuzzleCost {
        s.tiles()
            .iter()
            .zip(p.goal().tiles())
            .filter(|&(&t, &g)| t != 0 && t != g)
            .count() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::BestFirstSearch;

    fn board(tiles: [u8; TILES]) -> PuzzleState {
        PuzzleState::new(tiles).unwrap()
    }

    #[test]
    fn rejects_non_permutations() {
        assert_eq!(
            PuzzleState::new([1, 1, 2, 3, 4, 5, 6, 7, 8]),
            Err(PuzzleStateError::NotAPermutation)
        );
        assert_eq!(
            PuzzleState::new([0, 1, 2, 3, 4, 5, 6, 7, 9]),
            Err(PuzzleStateError::NotAPermutation)
        );
    }

    #[test]
    fn corner_blank_has_two_moves() {
        let s = board([0, 1, 2, 3, 4, 5, 6, 7, 8]);
        let p = PuzzleProblem::new(s, board([1, 0, 2, 3, 4, 5, 6, 7, 8]));
        let succ = p.successors(&s);
        let actions: Vec<PuzzleAction> = succ.iter().map(|(a, _, _)| *a).collect();
        assert_eq!(actions, [PuzzleAction::Down, PuzzleAction::Right]);
    }

    #[test]
    fn one_move_to_goal() {
        // Blank in the center; the goal is one slide to the left.
        let start = board([1, 2, 3, 4, 0, 5, 6, 7, 8]);
        let goal = board([1, 2, 3, 0, 4, 5, 6, 7, 8]);
        let p = PuzzleProblem::new(start, goal);
        let mut search = BestFirstSearch::<_, PuzzleHeuristicManhattan, _, _, _>::new(p);
        let result = search.run().unwrap();
        assert_eq!(result.total_cost(), 1);
        assert_eq!(result.path.steps.len(), 1);
        assert_eq!(result.path.steps[0].0, PuzzleAction::Left);
        assert_eq!(*result.path.end(), goal);
    }

    #[test]
    fn heuristics_are_zero_at_goal() {
        let goal = board([1, 2, 3, 8, 0, 4, 7, 6, 5]);
        let p = PuzzleProblem::new(goal, goal);
        assert_eq!(PuzzleHeuristicManhattan::h(&p, &goal), 0);
        assert_eq!(PuzzleHeuristicMisplaced::h(&p, &goal), 0);
    }

    #[test]
    fn manhattan_dominates_misplaced() {
        let start = board([2, 8, 3, 1, 6, 4, 7, 0, 5]);
        let goal = board([1, 2, 3, 8, 0, 4, 7, 6, 5]);
        let p = PuzzleProblem::new(start, goal);
        assert!(
            PuzzleHeuristicManhattan::h(&p, &start) >= PuzzleHeuristicMisplaced::h(&p, &start)
        );
    }

    #[test]
    fn both_heuristics_find_the_same_cost() {
        // The classic 5-move instance from the textbook example.
        let start = board([2, 8, 3, 1, 6, 4, 7, 0, 5]);
        let goal = board([1, 2, 3, 8, 0, 4, 7, 6, 5]);

        let manhattan = {
            let p = PuzzleProblem::new(start, goal);
            let mut s = BestFirstSearch::<_, PuzzleHeuristicManhattan, _, _, _>::new(p);
            s.run().unwrap()
        };
        let misplaced = {
            let p = PuzzleProblem::new(start, goal);
            let mut s = BestFirstSearch::<_, PuzzleHeuristicMisplaced, _, _, _>::new(p);
            s.run().unwrap()
        };

        assert_eq!(manhattan.total_cost(), 5);
        assert_eq!(misplaced.total_cost(), 5);
        // Equal optimal costs, but the better-informed bound expands no
        // more states.
        assert!(manhattan.nodes_expanded <= misplaced.nodes_expanded);
    }
}
