use crate::algorithms::common::PathfindingAlgorithm;
use crate::algorithms::movement::MovementTable;
use crate::error::{Error, Result};
use crate::grid::{ObstacleMap, Position};
use pathfinding::prelude::astar;

/// Fixed-point scale for step costs handed to the `pathfinding` crate,
/// which needs an `Ord` cost type.
const COST_SCALE: f64 = 1_000_000.0;

fn to_fixed(cost: f64) -> u64 {
    (cost * COST_SCALE).round() as u64
}

/// A* from the `pathfinding` crate over the same movement table, used as an
/// independent baseline for the Dijkstra search.
#[derive(Debug, Clone, Default)]
pub struct AStar {
    movement: MovementTable,
}

impl AStar {
    pub fn new(movement: MovementTable) -> Self {
        AStar { movement }
    }

    /// Rejects step costs whose fixed-point sum over a path visiting every
    /// cell of `map` could overflow `u64`.
    fn check_cost_range(&self, map: &ObstacleMap) -> Result<()> {
        let cells = (map.width() * map.height()) as f64;
        let limit = u64::MAX as f64 / 2.0;
        for m in self.movement.moves() {
            if (m.cost * COST_SCALE + 1.0) * cells >= limit {
                return Err(Error::InvalidMovement {
                    dx: m.dx,
                    dy: m.dy,
                    cost: m.cost,
                });
            }
        }
        Ok(())
    }

    /// Octile (or Manhattan) distance in fixed-point units for the built-in
    /// tables; zero for custom tables, which turns A* into plain Dijkstra.
    fn heuristic(&self, from: &Position, goal: Position) -> u64 {
        if !self.movement.is_octile() {
            return 0;
        }
        let dx = from.x.abs_diff(goal.x) as u64;
        let dy = from.y.abs_diff(goal.y) as u64;
        let axis = to_fixed(1.0);
        if self.movement.has_diagonals() {
            let diagonal = to_fixed(std::f64::consts::SQRT_2);
            dx.min(dy) * diagonal + dx.abs_diff(dy) * axis
        } else {
            (dx + dy) * axis
        }
    }
}

impl PathfindingAlgorithm for AStar {
    fn name(&self) -> &'static str {
        "a_star"
    }

    fn find_path(
        &mut self,
        map: &ObstacleMap,
        start: Position,
        goal: Position,
    ) -> Result<Option<(Vec<Position>, f64)>> {
        // Same rule as the Dijkstra search: a blocked start is never expanded.
        let start_blocked = map.is_blocked(start)?;
        map.is_blocked(goal)?;
        if start_blocked && start != goal {
            return Ok(None);
        }
        self.check_cost_range(map)?;

        let (width, height) = (map.width(), map.height());
        let result = astar(
            &start,
            |p| {
                self.movement
                    .moves()
                    .iter()
                    .filter_map(|m| {
                        p.offset(m.dx, m.dy, width, height)
                            .filter(|next| !map.blocked_at(*next))
                            .map(|next| (next, to_fixed(m.cost)))
                    })
                    .collect::<Vec<_>>()
            },
            |p| self.heuristic(p, goal),
            |p| *p == goal,
        );

        Ok(result.map(|(path, cost)| (path, cost as f64 / COST_SCALE)))
    }
}
