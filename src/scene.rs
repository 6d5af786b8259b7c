//! TOML scene files: grid extents, endpoints and obstacles.
//!
//! ```toml
//! width = 20
//! height = 15
//! start = [0, 0]
//! goal = [19, 14]
//! movement = "eight"
//! blocked = [[3, 4], [3, 5]]
//!
//! [[rect]]
//! from = [5, 0]
//! to = [5, 10]
//! ```

use crate::algorithms::movement::MovementTable;
use crate::error::{Error, Result};
use crate::grid::{ObstacleMap, Position};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Connectivity {
    Four,
    #[default]
    Eight,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RectSpec {
    pub from: Position,
    pub to: Position,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scene {
    pub width: usize,
    pub height: usize,
    pub start: Option<Position>,
    pub goal: Option<Position>,
    #[serde(default)]
    pub movement: Connectivity,
    #[serde(default)]
    pub blocked: Vec<Position>,
    #[serde(default, rename = "rect")]
    pub rects: Vec<RectSpec>,
}

impl Scene {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let scene: Scene = toml::from_str(contents)?;
        scene.validate()?;
        Ok(scene)
    }

    fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::EmptyGrid);
        }
        let named = [("start", self.start), ("goal", self.goal)];
        let endpoints = named
            .into_iter()
            .filter_map(|(name, pos)| pos.map(|p| (name, p)));
        let cells = self.blocked.iter().map(|&p| ("blocked cell", p));
        let corners = self
            .rects
            .iter()
            .flat_map(|r| [("rect corner", r.from), ("rect corner", r.to)]);

        for (what, pos) in endpoints.chain(cells).chain(corners) {
            if pos.x >= self.width || pos.y >= self.height {
                return Err(Error::Scene(format!(
                    "{what} {pos} lies outside the {}x{} grid",
                    self.width, self.height
                )));
            }
        }
        Ok(())
    }

    pub fn obstacle_map(&self) -> Result<ObstacleMap> {
        let mut map = ObstacleMap::new(self.width, self.height)?;
        for rect in &self.rects {
            map.fill_rect(rect.from, rect.to, true);
        }
        for &pos in &self.blocked {
            map.set_blocked(pos, true)?;
        }
        Ok(map)
    }

    pub fn movement_table(&self) -> MovementTable {
        match self.movement {
            Connectivity::Four => MovementTable::four_connected(),
            Connectivity::Eight => MovementTable::eight_connected(),
        }
    }
}
