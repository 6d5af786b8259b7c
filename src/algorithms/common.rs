use crate::error::Result;
use crate::grid::{ObstacleMap, Position};

pub trait PathfindingAlgorithm {
    /// Short identifier used in CLI and log output.
    fn name(&self) -> &'static str;

    /// Finds a cheapest path from start to goal.
    ///
    /// Returns `Ok(None)` when the goal cannot be reached; errors are reserved
    /// for invalid input such as out-of-bounds endpoints.
    fn find_path(
        &mut self,
        map: &ObstacleMap,
        start: Position,
        goal: Position,
    ) -> Result<Option<(Vec<Position>, f64)>>;
}
