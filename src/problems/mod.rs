//! Implementation of search problems.
//!
//! Each domain supplies states, actions and successor edges through the
//! `SearchProblem` trait so the one engine can do pathfinding against a
//! generic graph-like API, plus whatever admissible heuristics the domain
//! admits.

pub mod grid_nav;
pub mod route_graph;
pub mod tile_puzzle;
pub mod water_jug;
