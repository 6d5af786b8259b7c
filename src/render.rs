use crate::algorithms::dijkstra::SearchResult;
use crate::error::Result;
use crate::grid::{ObstacleMap, Position};
use rustc_hash::FxHashSet;
use std::fmt::Write as _;
use std::io::Write;

/// Consumer of search output, e.g. a display.
pub trait SearchSink {
    fn present(
        &mut self,
        map: &ObstacleMap,
        start: Option<Position>,
        goal: Option<Position>,
        result: Option<&SearchResult>,
    ) -> Result<()>;
}

/// Renders the map as text, row 0 at the top.
///
/// Finalized cells show their cost as a digit scaled against the most
/// expensive finalized cell, so the cost field reads as a gradient.
pub fn render(
    map: &ObstacleMap,
    start: Option<Position>,
    goal: Option<Position>,
    result: Option<&SearchResult>,
) -> String {
    let path: FxHashSet<Position> = result
        .map(|r| r.path.iter().copied().collect())
        .unwrap_or_default();
    let max_cost = result.and_then(|r| r.costs.max_cost()).unwrap_or(0.0);

    let mut out = String::new();
    out.push_str("Legend: S=Start, G=Goal, *=Path, #=Blocked, 0-9=Cost, .=Unvisited\n");

    out.push_str("   ");
    for x in 0..map.width() {
        let _ = write!(out, "{:2}", x % 10);
    }
    out.push('\n');

    for y in 0..map.height() {
        let _ = write!(out, "{:2} ", y);
        for x in 0..map.width() {
            let pos = Position { x, y };
            let symbol = if Some(pos) == start {
                'S'
            } else if Some(pos) == goal {
                'G'
            } else if path.contains(&pos) {
                '*'
            } else if map.blocked_at(pos) {
                '#'
            } else {
                match result.and_then(|r| r.costs.get(pos)) {
                    Some(cost) => shade(cost, max_cost),
                    None => '.',
                }
            };
            out.push(' ');
            out.push(symbol);
        }
        out.push('\n');
    }
    out
}

fn shade(cost: f64, max_cost: f64) -> char {
    let level = if max_cost > 0.0 {
        ((cost / max_cost) * 9.0).round() as u32
    } else {
        0
    };
    char::from_digit(level.min(9), 10).unwrap_or('9')
}

/// Writes rendered frames and a one-line summary to any `Write`.
pub struct TerminalSink<W: Write> {
    out: W,
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W) -> Self {
        TerminalSink { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> SearchSink for TerminalSink<W> {
    fn present(
        &mut self,
        map: &ObstacleMap,
        start: Option<Position>,
        goal: Option<Position>,
        result: Option<&SearchResult>,
    ) -> Result<()> {
        write!(self.out, "{}", render(map, start, goal, result))?;
        match result {
            Some(r) => match r.goal_cost() {
                Some(cost) => writeln!(
                    self.out,
                    "Goal cost: {:.3} | Path: {} cells | Finalized: {} cells",
                    cost,
                    r.path.len(),
                    r.stats.finalized
                )?,
                None => writeln!(
                    self.out,
                    "Goal unreachable | Finalized: {} cells",
                    r.stats.finalized
                )?,
            },
            None => writeln!(self.out, "No search yet: set both start and goal")?,
        }
        self.out.flush()?;
        Ok(())
    }
}
