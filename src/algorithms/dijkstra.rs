use crate::algorithms::common::PathfindingAlgorithm;
use crate::algorithms::movement::MovementTable;
use crate::error::{Error, Result};
use crate::field::CostField;
use crate::grid::{ObstacleMap, Position};
use crate::statistics::SearchStats;
use log::{debug, trace};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::Instant;

/// Candidate in the frontier. `seq` is the insertion counter used to break
/// cost ties in favour of the entry pushed first.
#[derive(Clone, Copy, Debug)]
struct FrontierEntry {
    cost: f64,
    seq: u64,
    pos: Position,
    from: Option<Position>,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the BinaryHeap pops the cheapest, oldest entry first.
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Output of one search run.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub start: Position,
    pub goal: Position,
    pub costs: CostField,
    /// Start to goal inclusive; empty if the goal was not reached or path
    /// reconstruction was disabled.
    pub path: Vec<Position>,
    /// Cells in the order they were finalized.
    pub finalize_order: Vec<Position>,
    pub stats: SearchStats,
}

impl SearchResult {
    pub fn goal_cost(&self) -> Option<f64> {
        self.costs.get(self.goal)
    }

    pub fn reached_goal(&self) -> bool {
        self.costs.is_finalized(self.goal)
    }
}

/// Label-setting Dijkstra over an implicit grid graph.
#[derive(Debug, Clone)]
pub struct Dijkstra {
    movement: MovementTable,
    reconstruct_path: bool,
    cancel: Option<Arc<AtomicBool>>,
}

impl Default for Dijkstra {
    fn default() -> Self {
        Dijkstra::new()
    }
}

impl Dijkstra {
    /// Eight-connected search with path reconstruction enabled.
    pub fn new() -> Self {
        Dijkstra {
            movement: MovementTable::eight_connected(),
            reconstruct_path: true,
            cancel: None,
        }
    }

    pub fn with_movement(mut self, movement: MovementTable) -> Self {
        self.movement = movement;
        self
    }

    pub fn with_path(mut self, reconstruct_path: bool) -> Self {
        self.reconstruct_path = reconstruct_path;
        self
    }

    /// Checks `flag` before every frontier pop; once it reads `true` the
    /// search stops with [`Error::Cancelled`].
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn movement(&self) -> &MovementTable {
        &self.movement
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(AtomicOrdering::Relaxed))
    }

    pub fn search(
        &self,
        start: Position,
        goal: Position,
        map: &ObstacleMap,
    ) -> Result<SearchResult> {
        self.run(start, goal, map, self.reconstruct_path)
    }

    fn run(
        &self,
        start: Position,
        goal: Position,
        map: &ObstacleMap,
        reconstruct_path: bool,
    ) -> Result<SearchResult> {
        map.check_bounds(start)?;
        map.check_bounds(goal)?;

        let started = Instant::now();
        let (width, height) = (map.width(), map.height());
        let mut costs = CostField::new(width, height);
        let mut parents: Vec<Option<Position>> = vec![None; width * height];
        let mut finalize_order = Vec::new();
        let mut stats = SearchStats::default();

        let mut frontier = BinaryHeap::new();
        let mut seq = 0u64;
        frontier.push(FrontierEntry {
            cost: 0.0,
            seq,
            pos: start,
            from: None,
        });
        seq += 1;
        stats.pushes = 1;
        stats.max_frontier = 1;

        loop {
            if self.is_cancelled() {
                debug!("Search {} -> {} cancelled after {} pops", start, goal, stats.pops);
                return Err(Error::Cancelled);
            }
            let Some(entry) = frontier.pop() else {
                break;
            };
            stats.pops += 1;

            if costs.is_finalized(entry.pos) {
                trace!("Discarding stale entry {} at cost {:.4}", entry.pos, entry.cost);
                stats.stale_pops += 1;
                continue;
            }

            costs.finalize(entry.pos, entry.cost);
            parents[entry.pos.y * width + entry.pos.x] = entry.from;
            finalize_order.push(entry.pos);

            if entry.pos == goal {
                break;
            }
            // Only the start can be blocked here; it is finalized but never expanded.
            if map.blocked_at(entry.pos) {
                continue;
            }

            for m in self.movement.moves() {
                let Some(next) = entry.pos.offset(m.dx, m.dy, width, height) else {
                    continue;
                };
                if map.blocked_at(next) || costs.is_finalized(next) {
                    continue;
                }
                frontier.push(FrontierEntry {
                    cost: entry.cost + m.cost,
                    seq,
                    pos: next,
                    from: Some(entry.pos),
                });
                seq += 1;
                stats.pushes += 1;
            }
            stats.max_frontier = stats.max_frontier.max(frontier.len());
        }

        let path = if reconstruct_path && costs.is_finalized(goal) {
            let mut path = vec![goal];
            let mut current = goal;
            while let Some(prev) = parents[current.y * width + current.x] {
                path.push(prev);
                current = prev;
            }
            path.reverse();
            path
        } else {
            Vec::new()
        };

        stats.finalized = finalize_order.len();
        stats.elapsed = started.elapsed();
        debug!(
            "Search {} -> {}: finalized {} cells, goal cost {:?}",
            start,
            goal,
            stats.finalized,
            costs.get(goal)
        );

        Ok(SearchResult {
            start,
            goal,
            costs,
            path,
            finalize_order,
            stats,
        })
    }
}

impl PathfindingAlgorithm for Dijkstra {
    fn name(&self) -> &'static str {
        "dijkstra"
    }

    fn find_path(
        &mut self,
        map: &ObstacleMap,
        start: Position,
        goal: Position,
    ) -> Result<Option<(Vec<Position>, f64)>> {
        let result = self.run(start, goal, map, true)?;
        Ok(result.goal_cost().map(|cost| (result.path, cost)))
    }
}
