use crate::error::{Error, Result};
use rand::Rng;
use rustc_hash::FxHashSet;
use serde::Deserialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(from = "[usize; 2]")]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Position { x, y }
    }

    /// Applies a signed step, returning `None` if the result leaves a
    /// `width` x `height` grid.
    pub fn offset(&self, dx: i32, dy: i32, width: usize, height: usize) -> Option<Position> {
        let nx = self.x as i64 + dx as i64;
        let ny = self.y as i64 + dy as i64;
        if nx >= 0 && nx < width as i64 && ny >= 0 && ny < height as i64 {
            Some(Position {
                x: nx as usize,
                y: ny as usize,
            })
        } else {
            None
        }
    }
}

impl From<[usize; 2]> for Position {
    fn from([x, y]: [usize; 2]) -> Self {
        Position { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Fixed-size field of blocked cells, indexed `cells[x][y]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ObstacleMap {
    width: usize,
    height: usize,
    cells: Vec<Vec<bool>>,
}

impl ObstacleMap {
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::EmptyGrid);
        }
        Ok(ObstacleMap {
            width,
            height,
            cells: vec![vec![false; height]; width],
        })
    }

    /// Generates a map with up to `num_walls` randomly blocked cells.
    ///
    /// Cells listed in `keep_clear` are never blocked. Placement gives up
    /// after `3 * num_walls` attempts, so dense requests on small grids may
    /// place fewer walls than asked for.
    pub fn random<R: Rng>(
        width: usize,
        height: usize,
        num_walls: usize,
        keep_clear: &[Position],
        rng: &mut R,
    ) -> Result<Self> {
        let mut map = ObstacleMap::new(width, height)?;
        let reserved: FxHashSet<Position> = keep_clear.iter().copied().collect();

        let mut walls_placed = 0;
        let mut attempts = 0;
        while walls_placed < num_walls && attempts < num_walls * 3 {
            let pos = Position {
                x: rng.gen_range(0..width),
                y: rng.gen_range(0..height),
            };

            if !reserved.contains(&pos) && !map.cells[pos.x][pos.y] {
                map.cells[pos.x][pos.y] = true;
                walls_placed += 1;
            }
            attempts += 1;
        }

        Ok(map)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    pub(crate) fn check_bounds(&self, pos: Position) -> Result<()> {
        if self.contains(pos) {
            Ok(())
        } else {
            Err(Error::OutOfBounds {
                x: pos.x,
                y: pos.y,
                width: self.width,
                height: self.height,
            })
        }
    }

    pub fn is_blocked(&self, pos: Position) -> Result<bool> {
        self.check_bounds(pos)?;
        Ok(self.cells[pos.x][pos.y])
    }

    /// Unchecked variant for callers that already hold an in-bounds position.
    pub(crate) fn blocked_at(&self, pos: Position) -> bool {
        self.cells[pos.x][pos.y]
    }

    pub fn set_blocked(&mut self, pos: Position, blocked: bool) -> Result<()> {
        self.check_bounds(pos)?;
        self.cells[pos.x][pos.y] = blocked;
        Ok(())
    }

    /// Sets every cell of the inclusive rectangle spanned by `from` and `to`.
    /// Parts of the rectangle outside the grid are ignored.
    pub fn fill_rect(&mut self, from: Position, to: Position, blocked: bool) {
        let (x0, x1) = (from.x.min(to.x), from.x.max(to.x).min(self.width - 1));
        let (y0, y1) = (from.y.min(to.y), from.y.max(to.y).min(self.height - 1));
        for column in self.cells.iter_mut().take(x1 + 1).skip(x0) {
            for cell in column.iter_mut().take(y1 + 1).skip(y0) {
                *cell = blocked;
            }
        }
    }

    pub fn clear(&mut self) {
        for column in &mut self.cells {
            column.fill(false);
        }
    }

    pub fn blocked_count(&self) -> usize {
        self.cells
            .iter()
            .map(|column| column.iter().filter(|&&b| b).count())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_new_rejects_empty_extents() {
        assert!(matches!(ObstacleMap::new(0, 4), Err(Error::EmptyGrid)));
        assert!(matches!(ObstacleMap::new(4, 0), Err(Error::EmptyGrid)));
    }

    #[test]
    fn test_set_and_query() {
        let mut map = ObstacleMap::new(5, 3).unwrap();
        let pos = Position::new(4, 2);
        assert!(!map.is_blocked(pos).unwrap());

        map.set_blocked(pos, true).unwrap();
        assert!(map.is_blocked(pos).unwrap());
        assert_eq!(map.blocked_count(), 1);

        map.set_blocked(pos, false).unwrap();
        assert!(!map.is_blocked(pos).unwrap());
    }

    #[test]
    fn test_out_of_bounds() {
        let mut map = ObstacleMap::new(5, 3).unwrap();
        let outside = Position::new(5, 0);
        assert!(matches!(
            map.is_blocked(outside),
            Err(Error::OutOfBounds { x: 5, y: 0, width: 5, height: 3 })
        ));
        assert!(map.set_blocked(Position::new(0, 3), true).is_err());
        assert_eq!(map.blocked_count(), 0);
    }

    #[test]
    fn test_fill_rect_and_clear() {
        let mut map = ObstacleMap::new(6, 6).unwrap();
        map.fill_rect(Position::new(4, 1), Position::new(2, 2), true);
        assert_eq!(map.blocked_count(), 6);
        assert!(map.is_blocked(Position::new(3, 1)).unwrap());

        // Clipped to the grid.
        map.fill_rect(Position::new(5, 5), Position::new(9, 9), true);
        assert_eq!(map.blocked_count(), 7);

        map.clear();
        assert_eq!(map.blocked_count(), 0);
    }

    #[test]
    fn test_offset() {
        let pos = Position::new(0, 2);
        assert_eq!(pos.offset(-1, 0, 3, 3), None);
        assert_eq!(pos.offset(1, 0, 3, 3), Some(Position::new(1, 2)));
        assert_eq!(pos.offset(0, 1, 3, 3), None);
    }

    #[test]
    fn test_random_keeps_cells_clear() {
        let mut rng = StdRng::seed_from_u64(7);
        let keep = [Position::new(0, 0), Position::new(9, 9)];
        let map = ObstacleMap::random(10, 10, 60, &keep, &mut rng).unwrap();
        assert!(map.blocked_count() > 0);
        assert!(map.blocked_count() <= 60);
        for pos in keep {
            assert!(!map.is_blocked(pos).unwrap());
        }
    }

    #[test]
    fn test_random_dense_request_spares_reserved_column() {
        let mut rng = StdRng::seed_from_u64(3);
        let keep: Vec<Position> = (0..4).map(|y| Position::new(0, y)).collect();
        let map = ObstacleMap::random(4, 4, 200, &keep, &mut rng).unwrap();
        assert!(map.blocked_count() <= 12);
        for pos in keep {
            assert!(!map.is_blocked(pos).unwrap());
        }
    }
}
