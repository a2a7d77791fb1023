//! Shortest routes between named places on a road network.

use thiserror::Error;

use crate::float_cost::FloatCost;
use crate::problem::Heuristic;
use crate::problem::SearchProblem;
use crate::problem::Successors;
use crate::space::Action;
use crate::space::State;

/// A place interned into its `RouteMap`. Ids are only meaningful against
/// the map that minted them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct City(pub u16);
impl State for City {}

/// The road taken: "drive to `to`".
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Drive {
    pub to: City,
}
impl Action for Drive {}

pub type RouteCost = FloatCost<f64>;

/// An undirected road network with distance-weighted edges.
#[derive(Debug, Clone, Default)]
pub struct RouteMap {
    names: Vec<String>,
    roads: Vec<Vec<(City, RouteCost)>>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteMapError {
    #[error("Unknown city '{0}'")]
    UnknownCity(String),
    #[error("Road {0} -> {1} has non-positive length")]
    NonPositiveRoad(String, String),
}

impl RouteMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_city(&mut self, name: &str) -> City {
        if let Some(existing) = self.city(name) {
            return existing;
        }
        let id = City(self.names.len() as u16);
        self.names.push(name.to_owned());
        self.roads.push(vec![]);
        id
    }

    /// Adds a two-way road of `distance` between existing cities.
    pub fn add_road(&mut self, from: &str, to: &str, distance: f64) -> Result<(), RouteMapError> {
        if distance <= 0.0 {
            return Err(RouteMapError::NonPositiveRoad(
                from.to_owned(),
                to.to_owned(),
            ));
        }
        let a = self
            .city(from)
            .ok_or_else(|| RouteMapError::UnknownCity(from.to_owned()))?;
        let b = self
            .city(to)
            .ok_or_else(|| RouteMapError::UnknownCity(to.to_owned()))?;
        let d = FloatCost::new(distance);
        self.roads[a.0 as usize].push((b, d));
        self.roads[b.0 as usize].push((a, d));
        Ok(())
    }

    #[must_use]
    pub fn city(&self, name: &str) -> Option<City> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| City(i as u16))
    }

    #[must_use]
    pub fn name(&self, city: City) -> &str {
        &self.names[city.0 as usize]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Find the shortest route from `start` to `goal`.
///
/// Carries an optional straight-line distance table (one entry per city,
/// distance to the goal as the crow flies) for the informed variant.
/// Without one the search is uniform-cost.
#[derive(Debug, Clone)]
pub struct RouteProblem {
    map: RouteMap,
    start: City,
    goal: City,
    straight_line: Vec<RouteCost>,
}

impl RouteProblem {
    pub fn new(map: RouteMap, start: City, goal: City) -> Self {
        let straight_line = vec![FloatCost::new(0.0); map.len()];
        Self {
            map,
            start,
            goal,
            straight_line,
        }
    }

    /// Installs straight-line distances to the goal, indexed by city id.
    ///
    /// The table must be admissible: no entry may exceed the true road
    /// distance from that city to the goal, and the goal's own entry must
    /// be zero.
    pub fn with_straight_line_distances(mut self, distances: Vec<f64>) -> Self {
        debug_assert_eq!(distances.len(), self.map.len());
        debug_assert_eq!(distances[self.goal.0 as usize], 0.0);
        self.straight_line = distances.into_iter().map(FloatCost::new).collect();
        self
    }

    pub fn map(&self) -> &RouteMap {
        &self.map
    }
    pub fn goal(&self) -> City {
        self.goal
    }
    pub(crate) fn straight_line(&self, c: City) -> RouteCost {
        self.straight_line[c.0 as usize]
    }
}

impl SearchProblem<City, Drive, RouteCost> for RouteProblem {
    fn initial_state(&self) -> City {
        self.start
    }

    fn is_goal(&self, s: &City) -> bool {
        *s == self.goal
    }

    fn successors(&self, s: &City) -> Successors<City, Drive, RouteCost> {
        self.map.roads[s.0 as usize]
            .iter()
            .map(|&(to, d)| (Drive { to }, to, d))
            .collect()
    }
}

/// Straight-line distance to the goal, read from the problem's table.
#[derive(Debug)]
pub struct RouteHeuristicStraightLine;

impl Heuristic<RouteProblem, City, Drive, RouteCost> for RouteHeuristicStraightLine {
    #[inline(always)]
    fn h(p: &RouteProblem, s: &City) -> RouteCost {
        p.straight_line(*s)
    }
}
