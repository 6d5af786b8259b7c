use crate::algorithms::dijkstra::{Dijkstra, SearchResult};
use crate::error::{Error, Result};
use crate::grid::{ObstacleMap, Position};
use crate::render::SearchSink;
use log::{debug, warn};
use std::str::FromStr;

/// Editing session: an obstacle map plus endpoints, re-searched on demand.
///
/// Obstacle edits only mark the last result stale; endpoint changes and
/// [`Planner::update`] recompute it.
pub struct Planner {
    map: ObstacleMap,
    search: Dijkstra,
    start: Option<Position>,
    goal: Option<Position>,
    result: Option<SearchResult>,
    stale: bool,
}

impl Planner {
    pub fn new(map: ObstacleMap, search: Dijkstra) -> Self {
        Planner {
            map,
            search,
            start: None,
            goal: None,
            result: None,
            stale: false,
        }
    }

    pub fn map(&self) -> &ObstacleMap {
        &self.map
    }

    pub fn start(&self) -> Option<Position> {
        self.start
    }

    pub fn goal(&self) -> Option<Position> {
        self.goal
    }

    pub fn result(&self) -> Option<&SearchResult> {
        self.result.as_ref()
    }

    /// True when the map changed after the last search.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub fn add_obstacle(&mut self, pos: Position) -> Result<()> {
        self.map.set_blocked(pos, true)?;
        self.stale = self.result.is_some();
        Ok(())
    }

    pub fn remove_obstacle(&mut self, pos: Position) -> Result<()> {
        self.map.set_blocked(pos, false)?;
        self.stale = self.result.is_some();
        Ok(())
    }

    pub fn clear_obstacles(&mut self) -> Result<Option<&SearchResult>> {
        self.map.clear();
        self.update()
    }

    pub fn set_start(&mut self, pos: Position) -> Result<Option<&SearchResult>> {
        self.map.check_bounds(pos)?;
        self.commit(Some(pos), self.goal)
    }

    pub fn set_goal(&mut self, pos: Position) -> Result<Option<&SearchResult>> {
        self.map.check_bounds(pos)?;
        self.commit(self.start, Some(pos))
    }

    /// Re-runs the search if both endpoints are set. On error the previous
    /// result is left untouched.
    pub fn update(&mut self) -> Result<Option<&SearchResult>> {
        self.commit(self.start, self.goal)
    }

    /// Searches with the candidate endpoints and stores them only once the
    /// search succeeded, so a failed search leaves the session as it was.
    fn commit(
        &mut self,
        start: Option<Position>,
        goal: Option<Position>,
    ) -> Result<Option<&SearchResult>> {
        let (Some(from), Some(to)) = (start, goal) else {
            self.start = start;
            self.goal = goal;
            return Ok(None);
        };

        let result = self.search.search(from, to, &self.map)?;
        match result.goal_cost() {
            Some(cost) => debug!("Path {} -> {} found with cost {:.3}", from, to, cost),
            None => warn!("Goal {} is unreachable from {}", to, from),
        }
        self.start = start;
        self.goal = goal;
        self.result = Some(result);
        self.stale = false;
        Ok(self.result.as_ref())
    }

    pub fn present(&self, sink: &mut dyn SearchSink) -> Result<()> {
        sink.present(&self.map, self.start, self.goal, self.result.as_ref())
    }

    /// Applies one editor command. Obstacle edits are followed by a
    /// recompute, like releasing the mouse button after painting.
    pub fn apply(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Block(pos) => {
                self.add_obstacle(pos)?;
                self.update()?;
            }
            Command::Free(pos) => {
                self.remove_obstacle(pos)?;
                self.update()?;
            }
            Command::Clear => {
                self.clear_obstacles()?;
            }
            Command::Start(pos) => {
                self.set_start(pos)?;
            }
            Command::Goal(pos) => {
                self.set_goal(pos)?;
            }
            Command::Show | Command::Quit => {}
        }
        Ok(())
    }
}

/// One line of the interactive editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Block(Position),
    Free(Position),
    Clear,
    Start(Position),
    Goal(Position),
    Show,
    Quit,
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let verb = words.next().unwrap_or("");
        let args: Vec<&str> = words.collect();

        let position = |args: &[&str]| -> Result<Position> {
            match args {
                [x, y] => {
                    let x = x
                        .parse()
                        .map_err(|_| Error::Command(format!("invalid x coordinate '{x}'")))?;
                    let y = y
                        .parse()
                        .map_err(|_| Error::Command(format!("invalid y coordinate '{y}'")))?;
                    Ok(Position { x, y })
                }
                _ => Err(Error::Command(format!("'{verb}' expects two coordinates"))),
            }
        };

        let command = match verb {
            "block" | "b" => Command::Block(position(&args)?),
            "free" | "f" => Command::Free(position(&args)?),
            "start" | "s" => Command::Start(position(&args)?),
            "goal" | "g" => Command::Goal(position(&args)?),
            "clear" => Command::Clear,
            "show" | "" => Command::Show,
            "quit" | "q" | "exit" => Command::Quit,
            other => return Err(Error::Command(format!("unknown command '{other}'"))),
        };
        Ok(command)
    }
}
