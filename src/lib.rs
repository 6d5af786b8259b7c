//! Dijkstra shortest paths on a 2D grid of free and blocked cells.
//!
//! The search borrows an [`ObstacleMap`], finalizes cells in non-decreasing
//! cost order and returns a [`CostField`] plus the reconstructed path.

pub mod algorithms;
pub mod config;
pub mod error;
pub mod field;
pub mod grid;
pub mod planner;
pub mod render;
pub mod scene;
pub mod statistics;

pub use algorithms::common::PathfindingAlgorithm;
pub use algorithms::dijkstra::{Dijkstra, SearchResult};
pub use algorithms::movement::{Movement, MovementTable};
pub use error::{Error, Result};
pub use field::CostField;
pub use grid::{ObstacleMap, Position};
