//! Robot navigation on a 4-connected obstacle grid.

use std::hash::Hash;

use derive_more::Display;
use num_traits::identities::one;
use num_traits::identities::zero;
use thiserror::Error;

use crate::problem::Heuristic;
use crate::problem::SearchProblem;
use crate::problem::Successors;
use crate::space::Action;
use crate::space::State;

type Coord = u32;

const MAX_ELEMENTS_DISPLAYED: usize = 20;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct GridState {
    pub x: Coord,
    pub y: Coord,
}
impl State for GridState {}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GridAction {
    Up,    // y--
    Down,  // y++
    Left,  // x--
    Right, // x++
}
impl Action for GridAction {}

pub type GridCost = u32;

#[derive(Copy, Clone, Debug, Display, PartialEq)]
pub enum GridCell {
    #[display("░")]
    Empty,
    #[display("█")]
    Wall,
}

#[derive(Debug, Error)]
pub enum GridCellParseError {
    #[error("Invalid character '{0}' found.")]
    InvalidCharacter(char),
}

impl std::convert::TryFrom<char> for GridCell {
    type Error = GridCellParseError;

    fn try_from(ch: char) -> Result<Self, Self::Error> {
        match ch {
            ' ' | '.' => Ok(GridCell::Empty),
            '#' | '█' => Ok(GridCell::Wall),
            ch => Err(GridCellParseError::InvalidCharacter(ch)),
        }
    }
}

#[derive(Clone)]
pub struct GridMap {
    map: Vec<Vec<GridCell>>,
}

impl GridMap {
    pub fn new_from_map(map: Vec<Vec<GridCell>>) -> Self {
        Self { map }
    }
    pub fn new_empty_with_dimensions(x: usize, y: usize) -> Self {
        Self {
            map: vec![vec![GridCell::Empty; x]; y],
        }
    }

    /// An `x` by `y` map with walls dropped in at `wall_density` (0..=1).
    /// Used by benchmarks; nothing guarantees connectivity.
    pub fn random<R: rand::Rng>(x: usize, y: usize, wall_density: f64, r: &mut R) -> Self {
        let mut map = Self::new_empty_with_dimensions(x, y);
        for row in &mut map.map {
            for cell in row.iter_mut() {
                if r.random::<f64>() < wall_density {
                    *cell = GridCell::Wall;
                }
            }
        }
        map
    }

    pub fn dimensions(&self) -> (Coord, Coord) {
        if self.map.is_empty() {
            return (0, 0);
        }
        (self.map[0].len() as Coord, self.map.len() as Coord)
    }

    #[inline(always)]
    pub fn in_bounds(&self, state: &GridState) -> bool {
        let (max_x, max_y) = self.dimensions();
        state.x < max_x && state.y < max_y
    }

    #[inline(always)]
    fn at(&self, state: &GridState) -> GridCell {
        debug_assert!(self.in_bounds(state));
        self.map[state.y as usize][state.x as usize]
    }

    /// A random empty cell, or `None` if one can't be found quickly.
    pub fn random_empty_state<R: rand::Rng>(&self, r: &mut R) -> Option<GridState> {
        let (max_x, max_y) = self.dimensions();

        for _tries in 0..1000 {
            let x: Coord = r.random::<Coord>() % max_x;
            let y: Coord = r.random::<Coord>() % max_y;
            let s = GridState { x, y };
            if self.at(&s) == GridCell::Empty {
                return Some(s);
            }
        }

        None
    }
}

impl std::fmt::Display for GridMap {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let d = self.dimensions();
        writeln!(f, "Grid({}x{}):", d.0, d.1)?;
        for line in self.map.iter().take(MAX_ELEMENTS_DISPLAYED) {
            for cell in line.iter().take(MAX_ELEMENTS_DISPLAYED) {
                write!(f, "{}", cell)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl std::fmt::Debug for GridMap {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Grid{:?}", self.dimensions())
    }
}

/// Find a route for a robot from `S` to `G` around the walls.
#[derive(Debug, Clone)]
pub struct GridNavProblem {
    map: GridMap,
    start: GridState,
    goal: GridState,
}

impl GridNavProblem {
    pub fn new(map: GridMap, start: GridState, goal: GridState) -> Self {
        Self { map, start, goal }
    }

    pub fn map(&self) -> &GridMap {
        &self.map
    }
    pub fn goal(&self) -> &GridState {
        &self.goal
    }

    /// A random solvable-looking instance: start and goal on empty cells.
    pub fn randomize<R: rand::Rng>(map: GridMap, r: &mut R) -> Option<Self> {
        let start = map.random_empty_state(r)?;
        let goal = map.random_empty_state(r)?;
        Some(Self { map, start, goal })
    }
}

impl SearchProblem<GridState, GridAction, GridCost> for GridNavProblem {
    fn initial_state(&self) -> GridState {
        self.start
    }

    fn is_goal(&self, s: &GridState) -> bool {
        *s == self.goal
    }

    fn successors(&self, s: &GridState) -> Successors<GridState, GridAction, GridCost> {
        let mut v = Successors::new();
        let (max_x, max_y) = self.map.dimensions();

        let prev = Coord::MAX;
        let same = zero::<Coord>();
        let next = one::<Coord>();

        for (dx, dy, action) in [
            (same, prev, GridAction::Up),
            (same, next, GridAction::Down),
            (prev, same, GridAction::Left),
            (next, same, GridAction::Right),
        ] {
            let new_x: Coord = s.x.wrapping_add(dx);
            let new_y: Coord = s.y.wrapping_add(dy);
            if new_x < max_x && new_y < max_y {
                let n = GridState { x: new_x, y: new_y };
                debug_assert!(self.map.in_bounds(&n));
                if self.map.at(&n) != GridCell::Wall {
                    v.push((action, n, 1));
                }
            }
        }
        v
    }
}

impl std::fmt::Display for GridNavProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let d = self.map.dimensions();
        writeln!(
            f,
            "GridNavProblem({}x{}) (s:{:?}, g:{:?}):",
            d.0, d.1, self.start, self.goal
        )?;
        for (y, line) in self.map.map.iter().enumerate().take(MAX_ELEMENTS_DISPLAYED) {
            for (x, cell) in line.iter().enumerate().take(MAX_ELEMENTS_DISPLAYED) {
                let here = GridState {
                    x: x as Coord,
                    y: y as Coord,
                };

                match (here == self.start, here == self.goal) {
                    (true, true) => write!(f, "!")?,
                    (true, false) => write!(f, "S")?,
                    (false, true) => write!(f, "G")?,
                    (false, false) => write!(f, "{}", cell)?,
                }
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

#[derive(Copy, Clone, Debug, Display, PartialEq)]
enum GridProblemCell {
    Cell(GridCell),
    #[display("S")]
    Start,
    #[display("G")]
    Goal,
}

impl std::convert::TryFrom<char> for GridProblemCell {
    type Error = GridCellParseError;

    fn try_from(ch: char) -> Result<Self, Self::Error> {
        match ch {
            'S' => Ok(GridProblemCell::Start),
            'G' => Ok(GridProblemCell::Goal),
            ch => Ok(GridProblemCell::Cell(GridCell::try_from(ch)?)),
        }
    }
}

#[derive(Debug, Error)]
pub enum GridNavParseError {
    #[error("Empty input")]
    EmptyInput,
    #[error("Invalid cell {e} found at ({x},{y})")]
    InvalidCell {
        e: GridCellParseError,
        x: usize,
        y: usize,
    },
    #[error("No start cell 'S' in map")]
    MissingStart,
    #[error("No goal cell 'G' in map")]
    MissingGoal,
    #[error("More than one start cell 'S' in map")]
    DuplicateStart,
    #[error("More than one goal cell 'G' in map")]
    DuplicateGoal,
}

impl std::convert::TryFrom<&str> for GridNavProblem {
    type Error = GridNavParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let lines: Vec<&str> = s.lines().collect();

        if lines.is_empty() || lines[0].is_empty() {
            return Err(GridNavParseError::EmptyInput);
        }

        let max_x = lines[0].chars().count();
        let max_y = lines.len();
        let mut map = GridMap::new_empty_with_dimensions(max_x, max_y);
        let mut start: Option<GridState> = None;
        let mut goal: Option<GridState> = None;

        for (y, line) in lines.iter().enumerate() {
            for (x, ch) in line.chars().enumerate() {
                let cell = GridProblemCell::try_from(ch)
                    .map_err(|e| GridNavParseError::InvalidCell { e, x, y })?;

                map.map[y][x] = match cell {
                    GridProblemCell::Start => {
                        let here = GridState {
                            x: x as Coord,
                            y: y as Coord,
                        };
                        if start.replace(here).is_some() {
                            return Err(GridNavParseError::DuplicateStart);
                        }
                        GridCell::Empty
                    }
                    GridProblemCell::Goal => {
                        let here = GridState {
                            x: x as Coord,
                            y: y as Coord,
                        };
                        if goal.replace(here).is_some() {
                            return Err(GridNavParseError::DuplicateGoal);
                        }
                        GridCell::Empty
                    }
                    GridProblemCell::Cell(c) => c,
                }
            }
        }

        Ok(Self {
            map,
            start: start.ok_or(GridNavParseError::MissingStart)?,
            goal: goal.ok_or(GridNavParseError::MissingGoal)?,
        })
    }
}

/// Manhattan distance to the goal. Admissible and consistent on a
/// 4-connected unit-cost grid.
#[derive(Debug)]
pub struct GridHeuristicManhattan;

#[inline(always)]
fn manhattan_distance(a: &GridState, b: &GridState) -> GridCost {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}

impl Heuristic<GridNavProblem, GridState, GridAction, GridCost> for GridHeuristicManhattan {
    #[inline(always)]
    fn h(p: &GridNavProblem, s: &GridState) -> GridCost {
        manhattan_distance(s, p.goal())
    }
}
